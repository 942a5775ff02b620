//! Precomputed Gaussian kernel
//!
//! A 1D table of unnormalized Gaussian coefficients shared read-only by
//! every pixel of a filter pass. Callers normalize by their accumulated
//! weight sum, so no normalization happens here; this is what lets the
//! bilateral filter multiply two 1D coefficients per sample and still
//! normalize correctly.

/// Precomputed 1D Gaussian coefficient table
///
/// `coeff[i] = exp(-(i - half)² / (2σ²))` for `i` in `[0, size)`, with
/// `half = size / 2`. Coefficients are symmetric around `half` and
/// unnormalized (`coeff[half] == 1`).
///
/// # Examples
///
/// ```
/// use hdrkit_filter::PrecomputedGaussian;
///
/// let pg = PrecomputedGaussian::new(1.0);
/// assert_eq!(pg.size(), 2 * pg.half_size() + 1);
/// assert_eq!(pg.coeff()[pg.half_size()], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PrecomputedGaussian {
    sigma: f32,
    size: usize,
    half: usize,
    coeff: Vec<f32>,
}

impl PrecomputedGaussian {
    /// Kernel size for a given sigma: `2·ceil(2.5σ) + 1`, minimum 3
    ///
    /// Odd, grows with sigma, and usable before construction (e.g. to size
    /// a sample window). Non-positive sigma clamps to 1.0, matching
    /// [`PrecomputedGaussian::new`].
    pub fn kernel_size(sigma: f32) -> usize {
        let sigma = if sigma > 0.0 { sigma } else { 1.0 };
        let half = (2.5 * sigma).ceil() as usize;
        (2 * half + 1).max(3)
    }

    /// Build the coefficient table for `sigma`
    ///
    /// Non-positive sigma silently clamps to 1.0; callers relying on the
    /// exact requested value should check [`PrecomputedGaussian::sigma`]
    /// after construction.
    pub fn new(sigma: f32) -> Self {
        let sigma = if sigma > 0.0 { sigma } else { 1.0 };
        let size = Self::kernel_size(sigma);
        let half = size / 2;

        let sigma2 = 2.0 * sigma * sigma;
        let coeff = (0..size)
            .map(|i| {
                let d = i as f32 - half as f32;
                (-d * d / sigma2).exp()
            })
            .collect();

        PrecomputedGaussian {
            sigma,
            size,
            half,
            coeff,
        }
    }

    /// Effective sigma (after clamping)
    #[inline]
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Kernel size (odd)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-kernel radius; `size() == 2 * half_size() + 1`
    #[inline]
    pub fn half_size(&self) -> usize {
        self.half
    }

    /// Coefficient table, indexed symmetrically around `half_size()`
    #[inline]
    pub fn coeff(&self) -> &[f32] {
        &self.coeff
    }
}
