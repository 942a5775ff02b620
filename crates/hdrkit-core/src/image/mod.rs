//! Image - Dense floating-point image buffer
//!
//! `Image` is the pixel container used by every filter in hdrkit: a flat
//! `f32` array of size `frames × height × width × channels`, row-major and
//! channel-interleaved. HDR pixel values are unbounded floats; nothing in
//! this container assumes a display range.
//!
//! See [`sample`] for nearest/bilinear lookup at normalized coordinates.
//!
//! # Examples
//!
//! ```
//! use hdrkit_core::Image;
//!
//! // Create a 100x100 RGB image
//! let mut img = Image::new(1, 100, 100, 3).unwrap();
//!
//! img.pixel_mut(10, 20)[0] = 0.5;
//! assert_eq!(img.pixel(10, 20)[0], 0.5);
//!
//! let max = img.max_value(0).unwrap();
//! assert_eq!(max, 0.5);
//! ```

pub mod sample;

use crate::error::{Error, Result};

/// Dense floating-point image
///
/// Owns a flat `f32` buffer of `frames × height × width × channels`
/// samples. The sample for channel `c` of pixel `(x, y)` in frame `f` is at
/// index `((f * height + y) * width + x) * channels + c`.
///
/// Joint filters operating on several images require identical width and
/// height; frame and channel counts may differ per filter semantics, which
/// is why [`Image::check_same_size`] only compares the spatial extent.
#[derive(Debug, Clone)]
pub struct Image {
    /// Number of frames (1 for 2D images)
    frames: u32,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: u32,
    /// Pixel data (frame-major, row-major, channel-interleaved)
    data: Vec<f32>,
}

impl Image {
    /// Create a new image with all samples set to zero
    ///
    /// # Arguments
    ///
    /// * `frames` - Number of frames (must be > 0; 1 for 2D images)
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `channels` - Samples per pixel (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use hdrkit_core::Image;
    ///
    /// let img = Image::new(1, 640, 480, 3).unwrap();
    /// assert_eq!(img.width(), 640);
    /// assert_eq!(img.height(), 480);
    /// assert_eq!(img.channels(), 3);
    /// ```
    pub fn new(frames: u32, width: u32, height: u32, channels: u32) -> Result<Self> {
        if frames == 0 || width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidDimension {
                frames,
                width,
                height,
                channels,
            });
        }

        let size =
            (frames as usize) * (width as usize) * (height as usize) * (channels as usize);

        Ok(Image {
            frames,
            width,
            height,
            channels,
            data: vec![0.0f32; size],
        })
    }

    /// Create a new image with all samples set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    pub fn new_with_value(
        frames: u32,
        width: u32,
        height: u32,
        channels: u32,
        value: f32,
    ) -> Result<Self> {
        let mut img = Image::new(frames, width, height, channels)?;
        img.data.fill(value);
        Ok(img)
    }

    /// Create an image from raw sample data
    ///
    /// # Arguments
    ///
    /// * `frames`, `width`, `height`, `channels` - Image shape
    /// * `data` - Samples in frame-major, row-major, channel-interleaved order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length doesn't
    /// match the shape.
    pub fn from_data(
        frames: u32,
        width: u32,
        height: u32,
        channels: u32,
        data: Vec<f32>,
    ) -> Result<Self> {
        if frames == 0 || width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidDimension {
                frames,
                width,
                height,
                channels,
            });
        }

        let expected =
            (frames as usize) * (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{}x{} = {}",
                data.len(),
                frames,
                width,
                height,
                channels,
                expected
            )));
        }

        Ok(Image {
            frames,
            width,
            height,
            channels,
            data,
        })
    }

    /// Number of frames
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw read-only access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Raw mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Flat index of the first channel of pixel (x, y) in frame 0
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
    }

    /// Channel slice for pixel (x, y) in frame 0
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let idx = self.index(x, y);
        &self.data[idx..idx + self.channels as usize]
    }

    /// Mutable channel slice for pixel (x, y) in frame 0
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let idx = self.index(x, y);
        &mut self.data[idx..idx + self.channels as usize]
    }

    /// Channel slice for pixel (x, y) in the given frame
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn pixel_in_frame(&self, frame: u32, x: u32, y: u32) -> Result<&[f32]> {
        if frame >= self.frames || x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (frame as usize) * (self.width as usize) * (self.height as usize)
                    + (y as usize) * (self.width as usize)
                    + (x as usize),
                len: self.data.len() / (self.channels as usize),
            });
        }

        let idx = (((frame as usize) * (self.height as usize) + (y as usize))
            * (self.width as usize)
            + (x as usize))
            * (self.channels as usize);
        Ok(&self.data[idx..idx + self.channels as usize])
    }

    /// Get a single sample value
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get(&self, x: u32, y: u32, channel: u32) -> Result<f32> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x.min(self.width - 1), y.min(self.height - 1))
                    + channel as usize,
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y) + channel as usize])
    }

    /// Set a single sample value
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set(&mut self, x: u32, y: u32, channel: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x.min(self.width - 1), y.min(self.height - 1))
                    + channel as usize,
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y) + channel as usize;
        self.data[idx] = value;
        Ok(())
    }

    /// Set all samples to the specified value
    pub fn set_all(&mut self, value: f32) {
        self.data.fill(value);
    }

    // ========================================================================
    // Structure helpers
    // ========================================================================

    /// Create an image with the same shape, zeroed data
    pub fn similar(&self) -> Image {
        Image {
            frames: self.frames,
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Create an image with the same spatial extent but a different channel
    /// count, zeroed data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `channels` is 0.
    pub fn similar_with_channels(&self, channels: u32) -> Result<Image> {
        Image::new(self.frames, self.width, self.height, channels)
    }

    /// Check that two images have the same spatial extent
    ///
    /// Frame and channel counts are allowed to differ; joint filters only
    /// require matching width and height.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if widths or heights differ.
    pub fn check_same_size(&self, other: &Image) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Elementwise operations
    // ========================================================================

    /// Add a constant to all samples (in-place)
    pub fn add_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v += value;
        }
    }

    /// Multiply all samples by a constant (in-place)
    pub fn mul_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v *= value;
        }
    }

    /// Divide all samples by a constant (in-place)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the divisor is 0.
    pub fn div_constant(&mut self, value: f32) -> Result<()> {
        if value == 0.0 {
            return Err(Error::InvalidParameter("division by zero".to_string()));
        }
        self.mul_constant(1.0 / value);
        Ok(())
    }

    /// Clamp all samples into `[lo, hi]` (in-place)
    pub fn clamp(&mut self, lo: f32, hi: f32) {
        for v in &mut self.data {
            *v = v.clamp(lo, hi);
        }
    }

    /// Apply a function to every sample (in-place)
    pub fn apply(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Replace NaN and infinite samples with zero (in-place)
    pub fn remove_specials(&mut self) {
        for v in &mut self.data {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Maximum value of the given channel across all frames
    ///
    /// Returns `None` if the channel index is out of range.
    pub fn max_value(&self, channel: u32) -> Option<f32> {
        self.fold_channel(channel, f32::MIN, f32::max)
    }

    /// Minimum value of the given channel across all frames
    ///
    /// Returns `None` if the channel index is out of range.
    pub fn min_value(&self, channel: u32) -> Option<f32> {
        self.fold_channel(channel, f32::MAX, f32::min)
    }

    /// Mean value of the given channel across all frames
    ///
    /// Returns `None` if the channel index is out of range.
    pub fn mean(&self, channel: u32) -> Option<f32> {
        if channel >= self.channels {
            return None;
        }
        let step = self.channels as usize;
        let n = self.data.len() / step;
        let sum: f64 = self
            .data
            .iter()
            .skip(channel as usize)
            .step_by(step)
            .map(|&v| v as f64)
            .sum();
        Some((sum / n as f64) as f32)
    }

    /// Log-mean of the given channel: `exp(mean(ln(v + eps)))`
    ///
    /// The standard HDR log-average; `eps = 1e-6` guards zero samples.
    /// Returns `None` if the channel index is out of range.
    pub fn log_mean(&self, channel: u32) -> Option<f32> {
        if channel >= self.channels {
            return None;
        }
        let step = self.channels as usize;
        let n = self.data.len() / step;
        let sum: f64 = self
            .data
            .iter()
            .skip(channel as usize)
            .step_by(step)
            .map(|&v| ((v + 1e-6) as f64).ln())
            .sum();
        Some((sum / n as f64).exp() as f32)
    }

    fn fold_channel(&self, channel: u32, init: f32, f: impl Fn(f32, f32) -> f32) -> Option<f32> {
        if channel >= self.channels {
            return None;
        }
        let step = self.channels as usize;
        Some(
            self.data
                .iter()
                .skip(channel as usize)
                .step_by(step)
                .fold(init, |acc, &v| f(acc, v)),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img = Image::new(1, 100, 200, 3).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 200);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.frames(), 1);
        assert_eq!(img.data().len(), 100 * 200 * 3);

        for &v in img.data() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_image_invalid_dimensions() {
        assert!(Image::new(0, 10, 10, 1).is_err());
        assert!(Image::new(1, 0, 10, 1).is_err());
        assert!(Image::new(1, 10, 0, 1).is_err());
        assert!(Image::new(1, 10, 10, 0).is_err());
    }

    #[test]
    fn test_image_from_data() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let img = Image::from_data(1, 3, 2, 1, data).unwrap();

        assert_eq!(img.pixel(0, 0), &[1.0]);
        assert_eq!(img.pixel(2, 0), &[3.0]);
        assert_eq!(img.pixel(0, 1), &[4.0]);
        assert_eq!(img.pixel(2, 1), &[6.0]);
    }

    #[test]
    fn test_image_from_data_wrong_size() {
        assert!(Image::from_data(1, 3, 2, 1, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_pixel_access_interleaved() {
        let mut img = Image::new(1, 4, 4, 3).unwrap();
        img.pixel_mut(2, 1).copy_from_slice(&[0.1, 0.2, 0.3]);

        assert_eq!(img.pixel(2, 1), &[0.1, 0.2, 0.3]);
        assert_eq!(img.get(2, 1, 2).unwrap(), 0.3);
        assert_eq!(img.index(2, 1), (1 * 4 + 2) * 3);
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut img = Image::new(1, 4, 4, 1).unwrap();
        assert!(img.get(4, 0, 0).is_err());
        assert!(img.get(0, 4, 0).is_err());
        assert!(img.get(0, 0, 1).is_err());
        assert!(img.set(4, 0, 0, 1.0).is_err());
    }

    #[test]
    fn test_pixel_in_frame() {
        let mut img = Image::new(2, 2, 2, 1).unwrap();
        // last sample of frame 1
        let len = img.data().len();
        img.data_mut()[len - 1] = 9.0;

        assert_eq!(img.pixel_in_frame(1, 1, 1).unwrap(), &[9.0]);
        assert!(img.pixel_in_frame(2, 0, 0).is_err());
    }

    #[test]
    fn test_similar() {
        let img = Image::new_with_value(1, 8, 6, 3, 2.5).unwrap();
        let s = img.similar();
        assert_eq!(s.dimensions(), (8, 6));
        assert_eq!(s.channels(), 3);
        assert!(s.data().iter().all(|&v| v == 0.0));

        let s1 = img.similar_with_channels(1).unwrap();
        assert_eq!(s1.channels(), 1);
        assert_eq!(s1.dimensions(), (8, 6));
    }

    #[test]
    fn test_check_same_size() {
        let a = Image::new(1, 8, 6, 3).unwrap();
        let b = Image::new(1, 8, 6, 1).unwrap();
        let c = Image::new(1, 6, 8, 3).unwrap();

        // channel counts may differ
        assert!(a.check_same_size(&b).is_ok());
        assert!(a.check_same_size(&c).is_err());
    }

    #[test]
    fn test_constant_operations() {
        let mut img = Image::new_with_value(1, 4, 4, 1, 2.0).unwrap();

        img.add_constant(3.0);
        assert!(img.data().iter().all(|&v| v == 5.0));

        img.mul_constant(2.0);
        assert!(img.data().iter().all(|&v| v == 10.0));

        img.div_constant(5.0).unwrap();
        assert!(img.data().iter().all(|&v| v == 2.0));

        assert!(img.div_constant(0.0).is_err());
    }

    #[test]
    fn test_clamp_and_apply() {
        let mut img = Image::from_data(1, 2, 1, 1, vec![-1.0, 3.0]).unwrap();
        img.clamp(0.0, 1.0);
        assert_eq!(img.data(), &[0.0, 1.0]);

        img.apply(|v| v + 1.0);
        assert_eq!(img.data(), &[1.0, 2.0]);
    }

    #[test]
    fn test_remove_specials() {
        let mut img =
            Image::from_data(1, 4, 1, 1, vec![1.0, f32::NAN, f32::INFINITY, -2.0]).unwrap();
        img.remove_specials();
        assert_eq!(img.data(), &[1.0, 0.0, 0.0, -2.0]);
    }

    #[test]
    fn test_statistics() {
        let img = Image::from_data(1, 2, 2, 2, vec![
            1.0, 10.0, //
            2.0, 20.0, //
            3.0, 30.0, //
            4.0, 40.0,
        ])
        .unwrap();

        assert_eq!(img.max_value(0), Some(4.0));
        assert_eq!(img.min_value(0), Some(1.0));
        assert_eq!(img.max_value(1), Some(40.0));
        assert_eq!(img.mean(0), Some(2.5));
        assert_eq!(img.max_value(2), None);
    }

    #[test]
    fn test_log_mean() {
        let img = Image::new_with_value(1, 4, 4, 1, 2.0).unwrap();
        let lm = img.log_mean(0).unwrap();
        assert!((lm - 2.0).abs() < 1e-4);
    }
}
