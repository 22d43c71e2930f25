pub mod error;
pub mod math;
pub mod network;
pub mod dataset;
pub mod train;
pub mod pixel;

// Convenience re-exports
pub use error::ModelError;
pub use math::matrix::Matrix;
pub use math::tensor::WeightTensor;
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use dataset::dataset::{TrainingCase, TrainingSet};
pub use train::trainer::Trainer;
pub use train::train_config::TrainConfig;
pub use train::step_stats::{StepStats, StopReason, TrainReport};
