use std::path::PathBuf;
use std::sync::mpsc;

use serde::{Serialize, Deserialize};

use crate::train::step_stats::StepStats;

/// Configuration for a `Trainer::train` run.
///
/// # Fields
/// - `initial_lambda`    - starting learning rate; must be positive
/// - `adapt_constant`    - lambda is multiplied by this after an accepted
///                         step and divided by it after a rejected one; a
///                         value of 1 disables adaptation, in which case a
///                         single rejected step ends the run
/// - `max_steps`         - hard limit on steps (accepted or rejected)
/// - `min_error`         - stop once the aggregate error reaches this
/// - `min_lambda`        - stop once lambda shrinks to this floor
/// - `report_period`     - log progress and emit stats every N steps;
///                         0 disables periodic reporting
/// - `checkpoint_period` - save the network every N steps; 0 disables
/// - `checkpoint_dir`    - directory for periodic saves, named by step
/// - `progress_tx`       - optional channel sender; one `StepStats` per
///                         report period, best-effort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub initial_lambda: f64,
    pub adapt_constant: f64,
    pub max_steps: usize,
    pub min_error: f64,
    pub min_lambda: f64,
    #[serde(default)]
    pub report_period: usize,
    #[serde(default)]
    pub checkpoint_period: usize,
    #[serde(default)]
    pub checkpoint_dir: Option<PathBuf>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<StepStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with reporting and checkpointing
    /// disabled.
    pub fn new(
        initial_lambda: f64,
        adapt_constant: f64,
        max_steps: usize,
        min_error: f64,
        min_lambda: f64,
    ) -> Self {
        TrainConfig {
            initial_lambda,
            adapt_constant,
            max_steps,
            min_error,
            min_lambda,
            report_period: 0,
            checkpoint_period: 0,
            checkpoint_dir: None,
            progress_tx: None,
        }
    }
}
