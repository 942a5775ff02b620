//! hdrkit - HDR image processing for Rust
//!
//! An HDR imaging toolkit centered on stochastic bilateral filtering:
//! edge-preserving smoothing evaluated over sparse Poisson-disk sample
//! patterns instead of full kernel windows, with optional per-pixel
//! sample budgets driven by an image-content density map.
//!
//! # Overview
//!
//! - Dense floating-point images with nearest/bilinear sampling
//! - Poisson-disk (Bridson) point sets and multi-resolution sample
//!   patterns, with persistence
//! - A tiled box-parallel filter engine, Gaussian blur, gradient and
//!   luminance filters
//! - Fixed-budget and density-adaptive stochastic bilateral filters
//! - Reinhard photographic tone mapping built on the bilateral filter
//!
//! # Example
//!
//! ```
//! use hdrkit::Image;
//! use hdrkit::filter::BilateralStochastic;
//!
//! let img = Image::new_with_value(1, 32, 32, 3, 1.0).unwrap();
//! let flt = BilateralStochastic::new(2.0, 0.1, 1).unwrap();
//! let out = flt.evaluate(&[&img]).unwrap();
//! assert_eq!(out.dimensions(), img.dimensions());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use hdrkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use hdrkit_filter as filter;
pub use hdrkit_sampler as sampler;
pub use hdrkit_tmo as tmo;
