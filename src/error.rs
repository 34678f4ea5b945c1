use thiserror::Error;

/// Errors raised by distance computation, neighbor selection, voting and classification.
#[derive(Debug, Error)]
pub enum KnnError {
    #[error("Dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient data: k = {k} but only {available} instances available")]
    InsufficientData { k: usize, available: usize },

    #[error("Cannot vote on an empty set of labels")]
    EmptyInput,

    #[error("Feature vectors must have at least one dimension")]
    EmptyFeatures,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, KnnError>;
