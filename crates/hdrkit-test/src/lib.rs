//! hdrkit-test - Regression test framework for hdrkit
//!
//! A regression test framework supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! Since hdrkit carries no file codecs, test inputs are synthetic: the
//! builders here create the constant, ramp, impulse, and step images the
//! regression suites filter.
//!
//! # Usage
//!
//! ```ignore
//! use hdrkit_test::RegParams;
//!
//! let mut rp = RegParams::new("bilateral_sto");
//! rp.compare_values(1.0, mean as f64, 1e-5);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use hdrkit_core::Image;

/// Uniform image with every sample set to `value`
pub fn constant_image(
    width: u32,
    height: u32,
    channels: u32,
    value: f32,
) -> TestResult<Image> {
    Ok(Image::new_with_value(1, width, height, channels, value)?)
}

/// Horizontal ramp: every channel of column `x` holds `x / (width - 1)`
pub fn ramp_image(width: u32, height: u32, channels: u32) -> TestResult<Image> {
    let mut img = Image::new(1, width, height, channels)?;
    let denom = (width.max(2) - 1) as f32;
    for y in 0..height {
        for x in 0..width {
            img.pixel_mut(x, y).fill(x as f32 / denom);
        }
    }
    Ok(img)
}

/// Zero image with a single pixel of `value` at the center
pub fn impulse_image(width: u32, height: u32, channels: u32, value: f32) -> TestResult<Image> {
    let mut img = Image::new(1, width, height, channels)?;
    img.pixel_mut(width / 2, height / 2).fill(value);
    Ok(img)
}

/// Vertical step edge: columns left of `width / 2` hold `low`, the rest
/// hold `high`
pub fn step_image(
    width: u32,
    height: u32,
    channels: u32,
    low: f32,
    high: f32,
) -> TestResult<Image> {
    let mut img = Image::new_with_value(1, width, height, channels, low)?;
    for y in 0..height {
        for x in width / 2..width {
            img.pixel_mut(x, y).fill(high);
        }
    }
    Ok(img)
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // hdrkit-test is at crates/hdrkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
