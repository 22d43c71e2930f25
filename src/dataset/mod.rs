pub mod dataset;

pub use dataset::{TrainingCase, TrainingSet};
