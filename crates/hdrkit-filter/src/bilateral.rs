//! Stochastic bilateral filtering
//!
//! An edge-preserving smoother evaluated over a sparse Poisson-disk sample
//! pattern instead of the full kernel window. Each sample combines a
//! spatial weight (product of two precomputed 1D Gaussian coefficients)
//! with a range weight computed from the edge image; accumulation runs in
//! f64 and normalizes by the weight sum.
//!
//! Two variants:
//!
//! - [`BilateralStochastic`] uses a fixed per-pixel sample budget derived
//!   from the kernel size
//! - [`BilateralAdaptive`] varies the budget per pixel by reading a
//!   sampling-density map (see [`SamplingMap`](crate::SamplingMap)) through
//!   a three-level pattern
//!
//! Both run in self mode (the filtered image is its own edge image) or
//! joint/cross mode (a separate edge image steers the range weight).

use std::path::Path;

use crate::engine::{self, Region, RegionFilter, RegionOutput};
use crate::error::{FilterError, FilterResult};
use crate::gaussian::PrecomputedGaussian;
use hdrkit_core::Image;
use hdrkit_core::image::sample::{BilinearSampler, ImageSampler};
use hdrkit_sampler::{DEFAULT_PATTERNS, MultiResSamplers};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Sample-budget factor for a given kernel size
///
/// Rational fit mapping kernel size to the fraction of the window worth
/// sampling; sizes small enough to drive the fit negative fall back to 3.
pub fn bilateral_sto_k(kernel_size: usize) -> f32 {
    let k = 0.4055 / (0.6437 * kernel_size as f32 - 1.1083) + 0.7347;
    if k < 0.0 { 3.0 } else { k }
}

/// Interpolated per-pixel sample budget, in flattened scalars
///
/// `density` in `[0, 1]` selects a position between the level cut-points:
/// `level_val = clamp(1 - density, 0, 0.9) · n_levels`, with the integer
/// part picking the level and the fractional part interpolating toward the
/// next cut-point. Odd results round up to the next even count (offsets
/// come in pairs), then the budget caps at `half² · 2`.
pub fn interpolate_budget(levels: &[usize], density: f32, half: usize) -> usize {
    let n_levels = levels.len();
    let level_val = (1.0 - density).clamp(0.0, 0.9) * n_levels as f32;
    let li = (level_val.floor() as usize).min(n_levels - 1);
    let frac = level_val - li as f32;

    let mut n = levels[li];
    if li < n_levels - 1 && frac > 0.0 {
        n += ((levels[li + 1] - levels[li]) as f32 * frac) as usize;
    }
    if n % 2 == 1 {
        n += 1;
    }
    n.min(half * half * 2)
}

/// One output pixel of either bilateral variant
///
/// `offsets` is the (possibly truncated) flattened pattern slice; `acc` is
/// the caller's reusable accumulator, one entry per base channel.
#[allow(clippy::too_many_arguments)]
fn filter_pixel(
    base: &Image,
    edge: &Image,
    x: u32,
    y: u32,
    kernel: &PrecomputedGaussian,
    inv_two_sigma_r2: f32,
    offsets: &[i32],
    acc: &mut [f64],
    out: &mut [f32],
) {
    let half = kernel.half_size() as i32;
    let coeff = kernel.coeff();
    let max_x = base.width() as i32 - 1;
    let max_y = base.height() as i32 - 1;

    let center = edge.pixel(x, y);

    acc.fill(0.0);
    let mut weight = 0.0f64;

    let mut i = 0;
    while i + 1 < offsets.len() {
        let dx = offsets[i];
        let dy = offsets[i + 1];
        i += 2;

        let sx = (x as i32 + dx).clamp(0, max_x) as u32;
        let sy = (y as i32 + dy).clamp(0, max_y) as u32;

        let spatial = coeff[(dx + half) as usize] * coeff[(dy + half) as usize];

        let e = edge.pixel(sx, sy);
        let mut dist2 = 0.0f32;
        for (a, b) in e.iter().zip(center.iter()) {
            let d = a - b;
            dist2 += d * d;
        }
        let range = (-dist2 * inv_two_sigma_r2).exp();

        let w = (spatial * range) as f64;
        let b = base.pixel(sx, sy);
        for (a, &v) in acc.iter_mut().zip(b.iter()) {
            *a += w * v as f64;
        }
        weight += w;
    }

    if weight > 0.0 {
        for (o, &a) in out.iter_mut().zip(acc.iter()) {
            *o = (a / weight) as f32;
        }
    } else {
        out.copy_from_slice(base.pixel(x, y));
    }
}

fn clamp_sigmas(sigma_s: f32, sigma_r: f32) -> (f32, f32) {
    let sigma_s = if sigma_s > 0.0 { sigma_s } else { 1.0 };
    let sigma_r = if sigma_r > 0.0 { sigma_r } else { 0.01 };
    (sigma_s, sigma_r)
}

fn pool_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Stochastic bilateral filter with a fixed per-pixel sample budget
///
/// # Examples
///
/// ```
/// use hdrkit_core::Image;
/// use hdrkit_filter::BilateralStochastic;
///
/// let img = Image::new_with_value(1, 16, 16, 3, 1.0).unwrap();
/// let flt = BilateralStochastic::new(2.0, 0.1, 1).unwrap();
/// let out = flt.evaluate(&[&img]).unwrap();
/// assert!((out.pixel(8, 8)[0] - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct BilateralStochastic {
    kernel: PrecomputedGaussian,
    sigma_r: f32,
    samplers: MultiResSamplers,
    seed: Option<u64>,
}

impl BilateralStochastic {
    /// Create a filter with default pool size and OS-entropy seeding
    ///
    /// Non-positive `sigma_s` clamps to 1.0, non-positive `sigma_r` to
    /// 0.01. `mult` scales the derived sample budget (values of 0 clamp
    /// to 1).
    ///
    /// # Errors
    ///
    /// Returns an error if pattern generation fails.
    pub fn new(sigma_s: f32, sigma_r: f32, mult: usize) -> FilterResult<Self> {
        Self::with_options(sigma_s, sigma_r, mult, DEFAULT_PATTERNS, None)
    }

    /// Create a filter with an explicit pattern pool size and seed
    ///
    /// A `Some` seed makes both the generated pattern pool and every
    /// `evaluate` run reproducible; `n_patterns = 1` additionally pins the
    /// per-pixel pattern choice.
    pub fn with_options(
        sigma_s: f32,
        sigma_r: f32,
        mult: usize,
        n_patterns: usize,
        seed: Option<u64>,
    ) -> FilterResult<Self> {
        let (sigma_s, sigma_r) = clamp_sigmas(sigma_s, sigma_r);
        let kernel = PrecomputedGaussian::new(sigma_s);
        let half = kernel.half_size();

        let ks = kernel.size();
        let n_points = ((ks as f32 * bilateral_sto_k(ks)).round() as usize * mult.max(1))
            .min(half * half);

        let mut rng = pool_rng(seed);
        let samplers =
            MultiResSamplers::new(&mut rng, half as u32, n_points, 1, n_patterns)?;

        Ok(BilateralStochastic {
            kernel,
            sigma_r,
            samplers,
            seed,
        })
    }

    /// Spatial sigma (after clamping)
    #[inline]
    pub fn sigma_s(&self) -> f32 {
        self.kernel.sigma()
    }

    /// Range sigma (after clamping)
    #[inline]
    pub fn sigma_r(&self) -> f32 {
        self.sigma_r
    }

    /// The pattern pool in use
    #[inline]
    pub fn samplers(&self) -> &MultiResSamplers {
        &self.samplers
    }

    /// Persist the pattern pool so later runs can skip generation
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_pattern<P: AsRef<Path>>(&self, path: P) -> FilterResult<()> {
        self.samplers.write_to_file(path)?;
        Ok(())
    }

    /// Replace the pattern pool with one previously persisted
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn read_pattern<P: AsRef<Path>>(&mut self, path: P) -> FilterResult<()> {
        self.samplers = MultiResSamplers::read_from_file(path)?;
        Ok(())
    }

    /// Filter in parallel bands
    ///
    /// Self mode: `src = [img]`. Joint/cross mode: `src = [base, edge]`,
    /// where `edge` steers the range weight and `base` supplies the values
    /// being averaged; the two must share width and height.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or over-long source list or
    /// mismatched extents.
    pub fn evaluate(&self, src: &[&Image]) -> FilterResult<Image> {
        if src.is_empty() {
            return Err(FilterError::EmptySource);
        }
        if src.len() > 2 {
            return Err(FilterError::InvalidParameters(format!(
                "expected [img] or [base, edge], got {} sources",
                src.len()
            )));
        }
        engine::apply_parallel(self, src)
    }
}

impl RegionFilter for BilateralStochastic {
    fn process_region(&self, src: &[&Image], out: &mut RegionOutput<'_>, region: &Region) {
        let base = src[0];
        let edge = if src.len() >= 2 { src[1] } else { src[0] };
        let channels = base.channels() as usize;
        let inv_two_sigma_r2 = 1.0 / (2.0 * self.sigma_r * self.sigma_r);

        let mut rng = engine::region_rng(self.seed, region);
        let mut acc = vec![0.0f64; channels];

        for y in region.y0..region.y1 {
            for x in region.x0..region.x1 {
                let pattern = self.samplers.get(&mut rng);
                filter_pixel(
                    base,
                    edge,
                    x,
                    y,
                    &self.kernel,
                    inv_two_sigma_r2,
                    pattern.offsets(),
                    &mut acc,
                    out.pixel_mut(x, y),
                );
            }
        }
    }
}

/// Stochastic bilateral filter with a density-driven per-pixel budget
///
/// The last source is a 1-channel sampling-density map in `[0, 1]`
/// (typically from [`SamplingMap`](crate::SamplingMap)), read by bilinear
/// lookup at the pixel's normalized coordinate, so the map may have a
/// different resolution than the filtered image.
#[derive(Debug, Clone)]
pub struct BilateralAdaptive {
    kernel: PrecomputedGaussian,
    sigma_r: f32,
    samplers: MultiResSamplers,
    seed: Option<u64>,
}

/// Density levels per adaptive pattern
const ADAPTIVE_LEVELS: usize = 3;

impl BilateralAdaptive {
    /// Create an adaptive filter with default pool size and OS-entropy
    /// seeding; sigma clamping matches [`BilateralStochastic::new`]
    ///
    /// # Errors
    ///
    /// Returns an error if pattern generation fails.
    pub fn new(sigma_s: f32, sigma_r: f32, mult: usize) -> FilterResult<Self> {
        Self::with_options(sigma_s, sigma_r, mult, DEFAULT_PATTERNS, None)
    }

    /// Create an adaptive filter with an explicit pool size and seed
    pub fn with_options(
        sigma_s: f32,
        sigma_r: f32,
        mult: usize,
        n_patterns: usize,
        seed: Option<u64>,
    ) -> FilterResult<Self> {
        let (sigma_s, sigma_r) = clamp_sigmas(sigma_s, sigma_r);
        let kernel = PrecomputedGaussian::new(sigma_s);
        let half = kernel.half_size();

        let n_points = (half * mult.max(1)).min(half * half);

        let mut rng = pool_rng(seed);
        let samplers = MultiResSamplers::new(
            &mut rng,
            half as u32,
            n_points,
            ADAPTIVE_LEVELS,
            n_patterns,
        )?;

        Ok(BilateralAdaptive {
            kernel,
            sigma_r,
            samplers,
            seed,
        })
    }

    /// Spatial sigma (after clamping)
    #[inline]
    pub fn sigma_s(&self) -> f32 {
        self.kernel.sigma()
    }

    /// Range sigma (after clamping)
    #[inline]
    pub fn sigma_r(&self) -> f32 {
        self.sigma_r
    }

    /// The pattern pool in use
    #[inline]
    pub fn samplers(&self) -> &MultiResSamplers {
        &self.samplers
    }

    /// Filter in parallel bands
    ///
    /// Self mode: `src = [base, density]`. Joint/cross mode:
    /// `src = [base, edge, density]`. The density map is always the last
    /// source and must have one channel; base and edge must share width
    /// and height.
    ///
    /// # Errors
    ///
    /// Returns an error for a wrong source count, a multi-channel density
    /// map, or mismatched base/edge extents.
    pub fn evaluate(&self, src: &[&Image]) -> FilterResult<Image> {
        if src.is_empty() {
            return Err(FilterError::EmptySource);
        }
        if src.len() < 2 || src.len() > 3 {
            return Err(FilterError::MissingSource(
                "expected [base, density] or [base, edge, density]",
            ));
        }
        let density = src[src.len() - 1];
        if density.channels() != 1 {
            return Err(FilterError::InvalidParameters(format!(
                "density map must have 1 channel, got {}",
                density.channels()
            )));
        }
        if src.len() == 3 {
            src[0].check_same_size(src[1]).map_err(FilterError::from)?;
        }

        // the density map may have its own resolution, so it rides in the
        // pass itself instead of the engine's uniform-extent source list
        let pass = AdaptivePass {
            filter: self,
            density,
        };
        engine::apply_parallel(&pass, &src[..src.len() - 1])
    }
}

/// One adaptive filtering pass over `[base]` or `[base, edge]`, with the
/// density map held separately
struct AdaptivePass<'a> {
    filter: &'a BilateralAdaptive,
    density: &'a Image,
}

impl RegionFilter for AdaptivePass<'_> {
    fn process_region(&self, src: &[&Image], out: &mut RegionOutput<'_>, region: &Region) {
        let flt = self.filter;
        let base = src[0];
        let edge = if src.len() >= 2 { src[1] } else { src[0] };
        let channels = base.channels() as usize;
        let half = flt.kernel.half_size();
        let inv_two_sigma_r2 = 1.0 / (2.0 * flt.sigma_r * flt.sigma_r);

        let inv_w = 1.0 / base.width() as f32;
        let inv_h = 1.0 / base.height() as f32;
        let lookup = BilinearSampler;

        let mut rng = engine::region_rng(flt.seed, region);
        let mut acc = vec![0.0f64; channels];
        let mut d = [0.0f32; 1];

        for y in region.y0..region.y1 {
            for x in region.x0..region.x1 {
                let pattern = flt.samplers.get(&mut rng);

                lookup.sample(self.density, x as f32 * inv_w, y as f32 * inv_h, &mut d);
                let budget = interpolate_budget(pattern.levels(), d[0], half)
                    .min(pattern.offsets().len());

                filter_pixel(
                    base,
                    edge,
                    x,
                    y,
                    &flt.kernel,
                    inv_two_sigma_r2,
                    &pattern.offsets()[..budget],
                    &mut acc,
                    out.pixel_mut(x, y),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling_map::SamplingMap;

    #[test]
    fn test_sto_k_fit_and_fallback() {
        // denominator negative for size 1, fit falls back
        assert_eq!(bilateral_sto_k(1), 3.0);

        // in the useful range the factor is positive and shrinks with size
        let k7 = bilateral_sto_k(7);
        let k21 = bilateral_sto_k(21);
        assert!(k7 > 0.0 && k21 > 0.0);
        assert!(k21 < k7);
    }

    #[test]
    fn test_budget_endpoints() {
        let levels = [8usize, 16, 32];
        let half = 10;

        // density 1 (flat region): lowest level
        assert_eq!(interpolate_budget(&levels, 1.0, half), 8);

        // density 0 (strong structure): clamp at 0.9 lands on the last
        // level, which has nothing further to interpolate toward
        assert_eq!(interpolate_budget(&levels, 0.0, half), 32);

        // mid density interpolates between cut-points and stays even
        let n = interpolate_budget(&levels, 0.5, half);
        assert!((8..=32).contains(&n));
        assert_eq!(n % 2, 0);
    }

    #[test]
    fn test_budget_rounds_odd_up_and_caps() {
        // fractional interpolation can land on an odd count
        let levels = [3usize, 10];
        let n = interpolate_budget(&levels, 1.0, 10);
        assert_eq!(n, 4);

        // cap at half² · 2
        let levels = [100usize, 200, 400];
        assert_eq!(interpolate_budget(&levels, 0.0, 5), 50);
    }

    #[test]
    fn test_constant_image_is_fixed_point() {
        let img = Image::new_with_value(1, 12, 12, 3, 2.0).unwrap();
        let flt = BilateralStochastic::with_options(1.5, 0.2, 1, 1, Some(3)).unwrap();
        let out = flt.evaluate(&[&img]).unwrap();

        for v in out.data() {
            assert!((v - 2.0).abs() < 1e-5);
        }

        // smaller than the kernel window; clamping must not break
        // normalization
        let ones = Image::new_with_value(1, 4, 4, 1, 1.0).unwrap();
        let flt = BilateralStochastic::new(1.0, 0.1, 1).unwrap();
        let out = flt.evaluate(&[&ones]).unwrap();
        for v in out.data() {
            assert!((v - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let mut img = Image::new(1, 16, 16, 1).unwrap();
        for (i, v) in img.data_mut().iter_mut().enumerate() {
            *v = ((i * 7) % 13) as f32 / 13.0;
        }

        let flt = BilateralStochastic::with_options(2.0, 0.3, 1, 2, Some(41)).unwrap();
        let a = flt.evaluate(&[&img]).unwrap();
        let b = flt.evaluate(&[&img]).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_source_count_validation() {
        let img = Image::new(1, 8, 8, 1).unwrap();
        let flt = BilateralStochastic::with_options(1.0, 0.1, 1, 1, Some(1)).unwrap();
        assert!(matches!(flt.evaluate(&[]), Err(FilterError::EmptySource)));
        assert!(flt.evaluate(&[&img, &img, &img]).is_err());

        let adaptive = BilateralAdaptive::with_options(1.0, 0.1, 1, 1, Some(1)).unwrap();
        assert!(adaptive.evaluate(&[&img]).is_err());

        let rgb_map = Image::new(1, 8, 8, 3).unwrap();
        assert!(adaptive.evaluate(&[&img, &rgb_map]).is_err());
    }

    #[test]
    fn test_adaptive_runs_with_lower_resolution_map() {
        let mut img = Image::new(1, 24, 24, 3).unwrap();
        for y in 0..24 {
            for x in 12..24 {
                img.pixel_mut(x, y).copy_from_slice(&[1.0, 1.0, 1.0]);
            }
        }

        let map = SamplingMap::new(1.0).evaluate(&img).unwrap();
        let flt = BilateralAdaptive::with_options(2.0, 0.5, 2, 1, Some(5)).unwrap();
        let out = flt.evaluate(&[&img, &map]).unwrap();

        // the map resolution is independent of the image
        let coarse = Image::new_with_value(1, 8, 8, 1, 0.5).unwrap();
        flt.evaluate(&[&img, &coarse]).unwrap();

        assert_eq!(out.width(), 24);
        assert_eq!(out.channels(), 3);
        for v in out.data() {
            assert!(v.is_finite());
            assert!((-0.01..=1.01).contains(v));
        }
    }
}
