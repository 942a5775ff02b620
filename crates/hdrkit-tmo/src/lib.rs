//! hdrkit-tmo - Tone mapping for HDR images
//!
//! This crate provides the local Reinhard photographic operator
//! ([`reinhard_tmo`]) built on the stochastic bilateral filter, together
//! with its parameter estimators ([`estimate_alpha`],
//! [`estimate_white_point`]).

mod error;
pub mod reinhard;

pub use error::{TmoError, TmoResult};
pub use reinhard::{estimate_alpha, estimate_white_point, reinhard_tmo, sigmoid, sigmoid_inv};
