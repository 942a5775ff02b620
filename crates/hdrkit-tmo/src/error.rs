//! Error types for hdrkit-tmo

use thiserror::Error;

/// Errors that can occur during tone mapping
#[derive(Debug, Error)]
pub enum TmoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] hdrkit_core::Error),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] hdrkit_filter::FilterError),

    /// The input image cannot be tone mapped
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Result type for tone mapping operations
pub type TmoResult<T> = Result<T, TmoError>;
