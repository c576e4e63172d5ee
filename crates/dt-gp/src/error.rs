//! Error types for Gaussian process fitting

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GpError {
    #[error("No training data")]
    Empty,

    #[error("Input length mismatch: {x} inputs, {y} targets")]
    LengthMismatch { x: usize, y: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Kernel matrix is not positive definite")]
    NotPositiveDefinite,
}

pub type Result<T> = std::result::Result<T, GpError>;
