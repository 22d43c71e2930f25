use log::{info, trace, warn};

use crate::dataset::dataset::TrainingSet;
use crate::error::ModelError;
use crate::math::tensor::WeightTensor;
use crate::network::network::Network;
use crate::train::step_stats::{StepStats, StopReason, TrainReport};
use crate::train::train_config::TrainConfig;

/// Full-batch gradient-descent trainer with an adaptive learning rate.
///
/// A `Trainer` owns one network and one training set for the lifetime of a
/// run. Each adaptive step computes the summed gradient over every case,
/// tentatively applies `weights − lambda × gradient`, and either keeps the
/// update (growing lambda) or restores the previous weights exactly
/// (shrinking lambda). No partially-applied update is ever observable.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    cases: TrainingSet,
    error: f64,
    lambda: f64,
}

impl Trainer {
    /// Validates the training set against the network's topology and caches
    /// the initial aggregate error.
    pub fn new(network: Network, cases: TrainingSet) -> Result<Trainer, ModelError> {
        cases.validate(network.input_count(), network.output_count())?;
        let mut trainer = Trainer {
            network,
            cases,
            error: 0.0,
            lambda: 1.0,
        };
        trainer.error = trainer.aggregate_error();
        Ok(trainer)
    }

    /// Half the summed squared difference between target and actual outputs
    /// across every case and every output node. The sole convergence
    /// metric; never negative.
    pub fn aggregate_error(&mut self) -> f64 {
        let mut total = 0.0;
        for case in self.cases.cases() {
            let results = self.network.evaluate(&case.input);
            for (&target, &actual) in case.target.iter().zip(results.iter()) {
                let diff = target - actual;
                total += diff * diff;
            }
        }
        total / 2.0
    }

    /// Sum of per-case gradients over the entire training set.
    pub fn aggregate_gradient(&mut self) -> WeightTensor {
        let mut total = WeightTensor::zeros(self.network.topology());
        for case in self.cases.cases() {
            let gradient = self.network.compute_gradient(&case.input, &case.target);
            total.accumulate(&gradient);
        }
        total
    }

    /// Runs one adaptive step: tentatively applies `weights − lambda ×
    /// gradient` and re-measures the aggregate error. If the error
    /// decreased, the update is kept and lambda grows by `adapt_constant`;
    /// otherwise the previous weights are restored exactly and lambda
    /// shrinks by the same factor. Returns whether the error improved.
    pub fn adaptive_step(&mut self, adapt_constant: f64) -> bool {
        let gradient = self.aggregate_gradient();
        let previous = self.network.weights().clone();

        self.network
            .set_weights(previous.step(self.lambda, &gradient));
        let new_error = self.aggregate_error();

        if new_error < self.error {
            self.error = new_error;
            self.lambda *= adapt_constant;
            true
        } else {
            self.network.set_weights(previous);
            self.lambda /= adapt_constant;
            false
        }
    }

    /// Runs adaptive steps until a stop predicate holds: the step limit is
    /// reached, the error falls to `min_error`, lambda falls to
    /// `min_lambda`, or (with adaptation disabled) a single step fails.
    /// The report lists every predicate that held on exit.
    pub fn train(&mut self, config: &TrainConfig) -> TrainReport {
        assert!(config.initial_lambda > 0.0, "lambda must be positive");
        self.lambda = config.initial_lambda;

        let mut step = 0;
        let mut accepted = 0;
        let mut improved = true;

        while step < config.max_steps
            && self.error > config.min_error
            && self.lambda > config.min_lambda
            && (config.adapt_constant != 1.0 || improved)
        {
            step += 1;
            improved = self.adaptive_step(config.adapt_constant);
            if improved {
                accepted += 1;
            }
            trace!(
                "step {step}: error {:.9}, lambda {:.9}, {}",
                self.error,
                self.lambda,
                if improved { "accepted" } else { "rolled back" }
            );

            if config.report_period > 0 && step % config.report_period == 0 {
                info!(
                    "step {step}: error {:.9}, lambda {:.9} ({accepted} accepted)",
                    self.error, self.lambda
                );
                if let Some(tx) = &config.progress_tx {
                    // Best-effort: a dropped receiver never stops training.
                    let _ = tx.send(StepStats {
                        step,
                        error: self.error,
                        lambda: self.lambda,
                        accepted_steps: accepted,
                    });
                }
            }

            if config.checkpoint_period > 0 && step % config.checkpoint_period == 0 {
                if let Some(dir) = &config.checkpoint_dir {
                    let path = dir.join(format!("step_{step:08}.txt"));
                    if let Err(e) = self.network.save(&path) {
                        warn!("failed to write checkpoint {}: {e}", path.display());
                    }
                }
            }
        }

        let mut reasons = Vec::new();
        if step >= config.max_steps {
            reasons.push(StopReason::StepLimitReached);
        }
        if self.error <= config.min_error {
            reasons.push(StopReason::Converged);
        }
        if self.lambda <= config.min_lambda {
            reasons.push(StopReason::LambdaExhausted);
        }
        if config.adapt_constant == 1.0 && !improved {
            reasons.push(StopReason::Stalled);
        }

        info!("terminated after {step} steps, error {:.9}", self.error);
        for reason in &reasons {
            info!("stop condition: {reason}");
        }

        TrainReport {
            steps: step,
            final_error: self.error,
            final_lambda: self.lambda,
            reasons,
        }
    }

    /// The network in its current, possibly partially trained state.
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Aggregate error as of the last step (or construction).
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Overrides the learning rate used by the next `adaptive_step` call.
    /// `train` resets it from its config.
    pub fn set_lambda(&mut self, lambda: f64) {
        assert!(lambda > 0.0, "lambda must be positive");
        self.lambda = lambda;
    }
}
