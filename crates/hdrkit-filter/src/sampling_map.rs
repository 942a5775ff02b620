//! Sampling-density map
//!
//! Produces a normalized per-pixel importance map for the adaptive
//! bilateral filter: luminance, then NSWE gradient magnitude, then a
//! Gaussian smoothing pass, then division by the global maximum. Values lie
//! in `[0, 1]`; higher values mark image structure that deserves a larger
//! per-pixel sample budget.

use crate::blur::GaussianBlur;
use crate::engine;
use crate::error::FilterResult;
use crate::gradient::NsweGradient;
use crate::luminance::Luminance;
use hdrkit_core::Image;

/// Sampling-density map builder
///
/// # Examples
///
/// ```
/// use hdrkit_core::Image;
/// use hdrkit_filter::SamplingMap;
///
/// let mut img = Image::new(1, 32, 32, 3).unwrap();
/// img.pixel_mut(16, 16).copy_from_slice(&[10.0, 10.0, 10.0]);
///
/// let map = SamplingMap::new(2.0).evaluate(&img).unwrap();
/// assert_eq!(map.channels(), 1);
/// assert!(map.max_value(0).unwrap() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SamplingMap {
    blur: GaussianBlur,
}

impl SamplingMap {
    /// Create a map builder; `sigma` controls how far structure spreads
    /// (non-positive values clamp to 1.0)
    pub fn new(sigma: f32) -> Self {
        SamplingMap {
            blur: GaussianBlur::new(sigma),
        }
    }

    /// Smoothing sigma
    #[inline]
    pub fn sigma(&self) -> f32 {
        self.blur.sigma()
    }

    /// Build the density map: 1-channel, same extent as `img`, values in
    /// `[0, 1]` (all zero for a perfectly flat image)
    pub fn evaluate(&self, img: &Image) -> FilterResult<Image> {
        let lum = engine::apply_parallel(&Luminance, &[img])?;
        let grad = engine::apply_parallel(&NsweGradient, &[&lum])?;
        let mut map = self.blur.evaluate(&grad)?;

        if let Some(max) = map.max_value(0)
            && max > 0.0
        {
            map.div_constant(max)?;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_all_zero() {
        let img = Image::new_with_value(1, 16, 16, 3, 0.5).unwrap();
        let map = SamplingMap::new(2.0).evaluate(&img).unwrap();

        assert_eq!(map.channels(), 1);
        assert_eq!(map.width(), 16);
        assert!(map.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_range_and_peak_at_edge() {
        // left half dark, right half bright
        let mut img = Image::new(1, 32, 32, 1).unwrap();
        for y in 0..32 {
            for x in 16..32 {
                img.pixel_mut(x, y)[0] = 1.0;
            }
        }

        let map = SamplingMap::new(1.0).evaluate(&img).unwrap();

        let mut max = 0.0f32;
        for &v in map.data() {
            assert!((0.0..=1.0).contains(&v));
            max = max.max(v);
        }
        assert!((max - 1.0).abs() < 1e-6);

        // structure concentrates around the edge columns
        assert!(map.pixel(15, 16)[0] > map.pixel(2, 16)[0]);
        assert!(map.pixel(16, 16)[0] > map.pixel(29, 16)[0]);
    }
}
