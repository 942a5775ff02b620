//! Image sampling at normalized coordinates
//!
//! Filters that read one image at the resolution of another (for example
//! the adaptive bilateral filter reading its sampling-density map) look
//! pixels up by normalized coordinates `(x, y) ∈ [0, 1]²` rather than by
//! integer position. The samplers here implement nearest-neighbor and
//! bilinear lookup with clamp-at-border semantics.

use crate::image::Image;

/// Lookup of an image at normalized coordinates
///
/// `sample` writes one value per channel into `out`; `out` must hold at
/// least `img.channels()` entries. Coordinates outside `[0, 1]` clamp to
/// the border.
pub trait ImageSampler {
    /// Sample `img` at normalized coordinates `(x, y)`, writing the channel
    /// values into `out`.
    fn sample(&self, img: &Image, x: f32, y: f32, out: &mut [f32]);
}

/// Nearest-neighbor lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestSampler;

impl ImageSampler for NearestSampler {
    fn sample(&self, img: &Image, x: f32, y: f32, out: &mut [f32]) {
        let w = img.width();
        let h = img.height();

        let ix = (x.clamp(0.0, 1.0) * (w - 1) as f32).round() as u32;
        let iy = (y.clamp(0.0, 1.0) * (h - 1) as f32).round() as u32;

        let px = img.pixel(ix.min(w - 1), iy.min(h - 1));
        out[..px.len()].copy_from_slice(px);
    }
}

/// Bilinear lookup
///
/// Interpolates between the four neighbors of the continuous position:
///
/// ```text
/// a ---- b
/// |  ?   |
/// c ---- d
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearSampler;

impl ImageSampler for BilinearSampler {
    fn sample(&self, img: &Image, x: f32, y: f32, out: &mut [f32]) {
        let w = img.width();
        let h = img.height();
        let channels = img.channels() as usize;

        let fx = x.clamp(0.0, 1.0) * (w - 1) as f32;
        let fy = y.clamp(0.0, 1.0) * (h - 1) as f32;

        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);

        let dx = fx - x0 as f32;
        let dy = fy - y0 as f32;

        let a = img.pixel(x0, y0);
        let b = img.pixel(x1, y0);
        let c = img.pixel(x0, y1);
        let d = img.pixel(x1, y1);

        for k in 0..channels {
            let px0 = a[k] + dy * (c[k] - a[k]);
            let px1 = b[k] + dy * (d[k] - b[k]);
            out[k] = px0 + dx * (px1 - px0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image() -> Image {
        // 0 1 2 3 across a 4x4 single-channel image
        let mut img = Image::new(1, 4, 4, 1).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                img.pixel_mut(x, y)[0] = x as f32;
            }
        }
        img
    }

    #[test]
    fn test_nearest_corners() {
        let img = gradient_image();
        let s = NearestSampler;
        let mut out = [0.0f32];

        s.sample(&img, 0.0, 0.0, &mut out);
        assert_eq!(out[0], 0.0);

        s.sample(&img, 1.0, 1.0, &mut out);
        assert_eq!(out[0], 3.0);
    }

    #[test]
    fn test_bilinear_midpoint() {
        let img = gradient_image();
        let s = BilinearSampler;
        let mut out = [0.0f32];

        // midpoint of the horizontal gradient: (3 - 0) / 2
        s.sample(&img, 0.5, 0.5, &mut out);
        assert!((out[0] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_bilinear_clamps_out_of_range() {
        let img = gradient_image();
        let s = BilinearSampler;
        let mut out = [0.0f32];

        s.sample(&img, -0.5, 0.5, &mut out);
        assert_eq!(out[0], 0.0);

        s.sample(&img, 1.5, 0.5, &mut out);
        assert_eq!(out[0], 3.0);
    }

    #[test]
    fn test_bilinear_matches_pixels_at_grid_points() {
        let img = gradient_image();
        let s = BilinearSampler;
        let mut out = [0.0f32];

        for x in 0..4u32 {
            s.sample(&img, x as f32 / 3.0, 0.0, &mut out);
            assert!((out[0] - x as f32).abs() < 1e-5);
        }
    }
}
