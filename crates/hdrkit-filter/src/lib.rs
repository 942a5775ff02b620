//! hdrkit-filter - Image filtering for HDR pipelines
//!
//! This crate provides:
//!
//! - [`PrecomputedGaussian`] - shared 1D Gaussian coefficient tables
//! - [`engine`] - the tiled box-parallel execution engine
//!   ([`engine::RegionFilter`], [`engine::apply`], [`engine::apply_parallel`])
//! - [`GaussianBlur`], [`NsweGradient`], [`Luminance`] - building-block
//!   filters
//! - [`SamplingMap`] - normalized per-pixel importance maps
//! - [`BilateralStochastic`] / [`BilateralAdaptive`] - edge-preserving
//!   smoothing over sparse Poisson-disk sample patterns, with fixed or
//!   density-driven per-pixel budgets

pub mod bilateral;
pub mod blur;
pub mod engine;
mod error;
pub mod gaussian;
pub mod gradient;
pub mod luminance;
pub mod sampling_map;

pub use bilateral::{BilateralAdaptive, BilateralStochastic, bilateral_sto_k};
pub use blur::GaussianBlur;
pub use error::{FilterError, FilterResult};
pub use gaussian::PrecomputedGaussian;
pub use gradient::NsweGradient;
pub use luminance::Luminance;
pub use sampling_map::SamplingMap;
