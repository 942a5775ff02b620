//! Error types for hdrkit-sampler

use thiserror::Error;

/// Errors that can occur while building or persisting sample patterns
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Persisted pattern could not be parsed
    #[error("decode error: {0}")]
    Decode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sampler operations
pub type SamplerResult<T> = Result<T, SamplerError>;
