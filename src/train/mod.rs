pub mod trainer;
pub mod train_config;
pub mod step_stats;

pub use trainer::Trainer;
pub use train_config::TrainConfig;
pub use step_stats::{StepStats, StopReason, TrainReport};
