use serde::{Serialize, Deserialize};
use std::fmt;

/// Training progress emitted by `Trainer::train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one
/// `StepStats` value is sent per report period. Sending is best-effort: a
/// dropped receiver never affects the training loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based step number.
    pub step: usize,
    /// Aggregate error after this step.
    pub error: f64,
    /// Learning rate after this step's adaptation.
    pub lambda: f64,
    /// Number of accepted steps so far.
    pub accepted_steps: usize,
}

/// A stop predicate that held when the training loop exited.
///
/// More than one may hold simultaneously; `TrainReport::reasons` lists
/// every one that did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Aggregate error fell to or below the requested minimum.
    Converged,
    /// The step limit was reached.
    StepLimitReached,
    /// Lambda shrank to or below its floor.
    LambdaExhausted,
    /// Adaptation was disabled (adapt constant of 1) and a step failed to
    /// improve the error, which is then permanent.
    Stalled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Converged => write!(f, "error fell below the requested minimum"),
            StopReason::StepLimitReached => write!(f, "step limit reached"),
            StopReason::LambdaExhausted => write!(f, "lambda fell below its floor"),
            StopReason::Stalled => write!(f, "unable to improve the error"),
        }
    }
}

/// Terminal summary of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// Steps actually taken (accepted or rejected).
    pub steps: usize,
    pub final_error: f64,
    pub final_lambda: f64,
    /// Every stop predicate that held on exit.
    pub reasons: Vec<StopReason>,
}

impl TrainReport {
    pub fn converged(&self) -> bool {
        self.reasons.contains(&StopReason::Converged)
    }
}
