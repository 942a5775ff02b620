//! hdrkit-sampler - Randomized point sampling for stochastic filters
//!
//! This crate provides:
//!
//! - [`bridson`] - Poisson-disk point sets with a minimum-separation
//!   guarantee (Bridson's algorithm)
//! - [`MultiResSamplers`] / [`PatternSampler`] - Pools of integer-offset
//!   sample patterns organized in density levels, for adaptive per-pixel
//!   sample budgets
//! - Pattern persistence ([`serial`]) so expensive generation can be cached
//!   across runs

pub mod bridson;
mod error;
pub mod multires;
pub mod serial;

pub use error::{SamplerError, SamplerResult};
pub use multires::{DEFAULT_PATTERNS, MultiResSamplers, PatternSampler};
