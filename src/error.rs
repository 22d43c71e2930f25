use thiserror::Error;

/// Errors produced while loading persisted networks, parsing training data,
/// or converting external inputs.
///
/// Shape disagreements between the live weight tensor and a gradient or
/// replacement tensor are not represented here: they indicate a bug in the
/// caller, never bad external input, and the tensor operations assert on
/// them instead.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The token stream of a persisted network was short, malformed, or
    /// inconsistent with its declared shape.
    #[error("malformed persisted network: {0}")]
    MalformedPersistedNetwork(String),

    /// A training-data file could not be parsed.
    #[error("malformed training data: {0}")]
    MalformedTrainingData(String),

    /// A vector's length does not match the network's declared topology.
    #[error("{context}: expected {expected} values, got {got}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        got: usize,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
