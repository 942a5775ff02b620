//! NSWE gradient magnitude
//!
//! For each pixel and channel, finite differences toward the four axis
//! neighbors (north, south, west, east) combined as
//! `sqrt(dN² + dS² + dW² + dE²)`. Border pixels clamp neighbor coordinates
//! to the image, so the difference toward a missing neighbor is zero.

use crate::engine::{Region, RegionFilter, RegionOutput};
use hdrkit_core::Image;

/// Per-channel four-neighbor gradient magnitude filter
#[derive(Debug, Clone, Copy, Default)]
pub struct NsweGradient;

impl NsweGradient {
    pub fn new() -> Self {
        NsweGradient
    }
}

impl RegionFilter for NsweGradient {
    fn process_region(&self, src: &[&Image], out: &mut RegionOutput<'_>, region: &Region) {
        let img = src[0];
        let channels = img.channels() as usize;
        let max_x = img.width() - 1;
        let max_y = img.height() - 1;

        for y in region.y0..region.y1 {
            let yn = y.saturating_sub(1);
            let ys = (y + 1).min(max_y);
            for x in region.x0..region.x1 {
                let xw = x.saturating_sub(1);
                let xe = (x + 1).min(max_x);

                let p = img.pixel(x, y);
                let n = img.pixel(x, yn);
                let s = img.pixel(x, ys);
                let w = img.pixel(xw, y);
                let e = img.pixel(xe, y);

                let d = out.pixel_mut(x, y);
                for c in 0..channels {
                    let dn = n[c] - p[c];
                    let ds = s[c] - p[c];
                    let dw = w[c] - p[c];
                    let de = e[c] - p[c];
                    d[c] = (dn * dn + ds * ds + dw * dw + de * de).sqrt();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;

    #[test]
    fn test_flat_image_zero_gradient() {
        let img = Image::new_with_value(1, 10, 10, 2, 7.0).unwrap();
        let out = engine::apply(&NsweGradient, &[&img]).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_vertical_edge() {
        // left half 0, right half 1: gradient peaks on the two edge columns
        let mut img = Image::new(1, 8, 4, 1).unwrap();
        for y in 0..4 {
            for x in 4..8 {
                img.pixel_mut(x, y)[0] = 1.0;
            }
        }

        let out = engine::apply(&NsweGradient, &[&img]).unwrap();
        assert_eq!(out.pixel(1, 2)[0], 0.0);
        assert_eq!(out.pixel(6, 2)[0], 0.0);
        // column 3 sees east difference 1, column 4 sees west difference 1
        assert!((out.pixel(3, 2)[0] - 1.0).abs() < 1e-6);
        assert!((out.pixel(4, 2)[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_isolated_peak_magnitude() {
        let mut img = Image::new(1, 5, 5, 1).unwrap();
        img.pixel_mut(2, 2)[0] = 1.0;

        let out = engine::apply(&NsweGradient, &[&img]).unwrap();
        // all four neighbors differ by 1 at the peak
        assert!((out.pixel(2, 2)[0] - 2.0).abs() < 1e-6);
        // an axis neighbor sees only the peak itself
        assert!((out.pixel(1, 2)[0] - 1.0).abs() < 1e-6);
    }
}
