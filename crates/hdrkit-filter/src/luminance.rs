//! Luminance extraction
//!
//! Collapses a multi-channel image to one channel: CIE Y weights for
//! 3-channel (assumed linear RGB) input, plain channel mean for any other
//! channel count.

use crate::engine::{Region, RegionFilter, RegionOutput};
use hdrkit_core::Image;

/// CIE luminance weights for linear RGB
const CIE_Y: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Luminance filter; output has the input's extent and one channel
#[derive(Debug, Clone, Copy, Default)]
pub struct Luminance;

impl Luminance {
    pub fn new() -> Self {
        Luminance
    }
}

impl RegionFilter for Luminance {
    fn output_shape(&self, src: &[&Image]) -> (u32, u32, u32, u32) {
        let s = src[0];
        (1, s.width(), s.height(), 1)
    }

    fn process_region(&self, src: &[&Image], out: &mut RegionOutput<'_>, region: &Region) {
        let img = src[0];
        let channels = img.channels() as usize;

        for y in region.y0..region.y1 {
            for x in region.x0..region.x1 {
                let p = img.pixel(x, y);
                let lum = if channels == 3 {
                    p[0] * CIE_Y[0] + p[1] * CIE_Y[1] + p[2] * CIE_Y[2]
                } else {
                    p.iter().sum::<f32>() / channels as f32
                };
                out.pixel_mut(x, y)[0] = lum;
            }
        }
    }
}
