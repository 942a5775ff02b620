//! Error types for hdrkit-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] hdrkit_core::Error),

    /// Sampler library error
    #[error("sampler error: {0}")]
    Sampler(#[from] hdrkit_sampler::SamplerError),

    /// No source images were supplied
    #[error("no source images supplied")]
    EmptySource,

    /// A required source image is missing
    #[error("missing source image: {0}")]
    MissingSource(&'static str),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
