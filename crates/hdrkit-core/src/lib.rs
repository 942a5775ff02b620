//! hdrkit-core - Basic data structures for HDR image processing
//!
//! This crate provides the fundamental pieces used throughout hdrkit:
//!
//! - [`Image`] - Dense floating-point image buffer (frames × height ×
//!   width × channels, channel-interleaved)
//! - [`ImageSampler`] / [`NearestSampler`] / [`BilinearSampler`] - Lookup
//!   at normalized coordinates
//! - [`Error`] / [`Result`] - Unified error type for core operations

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::Image;
pub use image::sample::{BilinearSampler, ImageSampler, NearestSampler};
