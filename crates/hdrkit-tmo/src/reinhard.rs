//! Reinhard photographic tone mapping
//!
//! Local variant of the photographic operator: luminance is compressed by
//! a sigmoid whose adaptation term comes from an edge-preserving pass of
//! the stochastic bilateral filter, run in sigmoid space so the filter
//! sees a bounded signal. Color is reassembled by the per-pixel ratio of
//! tone-mapped to original luminance.

use crate::error::{TmoError, TmoResult};
use hdrkit_core::Image;
use hdrkit_filter::{BilateralStochastic, Luminance, engine};

/// Photographic key for a luminance distribution
///
/// Places the key by where the log-average sits between the log extremes:
/// `0.18 · 4^((2·log2(avg) − log2(min) − log2(max)) / (log2(max) − log2(min)))`.
pub fn estimate_alpha(l_max: f32, l_min: f32, log_average: f32) -> f32 {
    let log2_max = (l_max + 1e-9).log2();
    let log2_min = (l_min + 1e-9).log2();
    let log2_avg = (log_average + 1e-9).log2();

    let t = (2.0 * log2_avg - log2_min - log2_max) / (log2_max - log2_min);
    0.18 * 4.0f32.powf(t)
}

/// Burn-out threshold from the luminance dynamic range:
/// `1.5 · 2^(log2(max) − log2(min) − 5)`
pub fn estimate_white_point(l_max: f32, l_min: f32) -> f32 {
    let log2_max = (l_max + 1e-9).log2();
    let log2_min = (l_min + 1e-9).log2();
    1.5 * 2.0f32.powf(log2_max - log2_min - 5.0)
}

/// `x / (x + 1)`, maps `[0, ∞)` onto `[0, 1)`
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    x / (x + 1.0)
}

/// Inverse of [`sigmoid`]
#[inline]
pub fn sigmoid_inv(x: f32) -> f32 {
    x / (1.0 - x)
}

/// Tone map an HDR image with the local photographic operator
///
/// # Arguments
///
/// * `img` - Linear HDR input (3-channel RGB, or any channel count the
///   luminance filter accepts)
/// * `alpha` - Photographic key; `None` estimates it from the luminance
///   statistics
/// * `white_point` - Luminance mapped to pure white; `None` estimates it
///   from the dynamic range
/// * `phi` - Sharpening exponent for the adaptation filter's range sigma
///   (the reference value is 8.0)
///
/// # Errors
///
/// Returns an error for degenerate luminance (non-positive everywhere) or
/// a filtering failure.
///
/// # Examples
///
/// ```
/// use hdrkit_core::Image;
/// use hdrkit_tmo::reinhard_tmo;
///
/// let mut img = Image::new_with_value(1, 16, 16, 3, 0.25).unwrap();
/// img.pixel_mut(8, 8).copy_from_slice(&[40.0, 40.0, 40.0]);
///
/// let out = reinhard_tmo(&img, None, None, 8.0).unwrap();
/// assert!(out.max_value(0).unwrap() < img.max_value(0).unwrap());
/// ```
pub fn reinhard_tmo(
    img: &Image,
    alpha: Option<f32>,
    white_point: Option<f32>,
    phi: f32,
) -> TmoResult<Image> {
    let mut lum = engine::apply_parallel(&Luminance, &[img])?;

    let l_max = lum
        .max_value(0)
        .ok_or(TmoError::InvalidInput("luminance image has no channel 0"))?;
    let l_min = lum.min_value(0).unwrap_or(0.0);
    let log_average = lum.log_mean(0).unwrap_or(0.0);

    if l_max <= 0.0 {
        return Err(TmoError::InvalidInput(
            "input luminance is non-positive everywhere",
        ));
    }

    let alpha = match alpha {
        Some(a) if a > 0.0 => a,
        _ => estimate_alpha(l_max, l_min, log_average),
    };
    let white_point = match white_point {
        Some(w) if w > 0.0 => w,
        _ => estimate_white_point(l_max, l_min),
    };

    // filter the luminance in sigmoid space so the bilateral pass sees a
    // bounded signal
    lum.apply(sigmoid);

    let s_max = 8.0f32;
    let sigma_s = 0.56 * 1.6f32.powf(s_max);
    let sigma_r = 2.0f32.powf(phi) * alpha / (s_max * s_max);

    let flt = BilateralStochastic::new(sigma_s, sigma_r, 1)?;
    let mut adapt = flt.evaluate(&[&lum])?;

    lum.apply(sigmoid_inv);
    adapt.apply(sigmoid_inv);

    // two-scale photographic operator: the adaptation term comes from the
    // filtered luminance, the burn-out term from the white point
    let c = alpha / log_average.max(1e-9);
    let inv_wp2 = 1.0 / (white_point * white_point);
    let mut mapped = lum.similar();
    for ((m, &l), &la) in mapped
        .data_mut()
        .iter_mut()
        .zip(lum.data().iter())
        .zip(adapt.data().iter())
    {
        let ls = c * l;
        let ls_adapt = c * la;
        *m = ls * (1.0 + ls * inv_wp2) / (1.0 + ls_adapt);
    }

    // swap the HDR luminance for the tone-mapped one, channel by channel
    let mut out = img.clone();
    let channels = img.channels() as usize;
    for (i, pixel) in out.data_mut().chunks_mut(channels).enumerate() {
        let l_old = lum.data()[i];
        let l_new = mapped.data()[i];
        let ratio = if l_old > 0.0 { l_new / l_old } else { 0.0 };
        for v in pixel.iter_mut() {
            *v *= ratio;
        }
    }
    out.remove_specials();

    Ok(out)
}
