//! Error types for hdrkit-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// hdrkit core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {frames} frame(s) of {width}x{height}x{channels}")]
    InvalidDimension {
        frames: u32,
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Incompatible channel counts
    #[error("incompatible channel counts: {0} vs {1}")]
    IncompatibleChannels(u32, u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Null or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hdrkit core operations
pub type Result<T> = std::result::Result<T, Error>;
