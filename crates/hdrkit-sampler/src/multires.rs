//! Multi-resolution Poisson-disk sample patterns
//!
//! A [`PatternSampler`] is one generated pattern of integer pixel offsets
//! together with level cut-points; a [`MultiResSamplers`] owns a small pool
//! of independently generated patterns and hands one out per invocation so
//! that neighboring pixels do not all see the same offsets.
//!
//! Offsets are stored flattened and interleaved, `[dx0, dy0, dx1, dy1, ..]`,
//! and level cut-points count flattened scalars: level `i` permits using the
//! first `levels()[i]` entries of `offsets()`. Consumers step through
//! offsets two at a time, one 2D offset per iteration.
//!
//! Pattern generation is sequential and happens entirely at construction
//! time; after that the pattern tables are immutable and safe to share
//! read-only across parallel filter workers.

use crate::bridson;
use crate::error::{SamplerError, SamplerResult};
use rand::Rng;

/// Default number of patterns held by a [`MultiResSamplers`] pool
pub const DEFAULT_PATTERNS: usize = 4;

/// One generated sample pattern: flattened integer offsets plus level
/// cut-points for adaptive truncation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSampler {
    /// Interleaved (dx, dy) offsets in pixels, each in `[-window, window]`
    offsets: Vec<i32>,
    /// Cut-points into `offsets` (flattened units), non-decreasing,
    /// last == `offsets.len()`
    levels: Vec<usize>,
}

impl PatternSampler {
    /// Generate one pattern
    ///
    /// Level `l` of `n_levels` targets `n_samples >> (n_levels - 1 - l)`
    /// points (so the last level carries the full budget) and runs Bridson
    /// sampling with a radius shrinking accordingly; the per-level sets are
    /// concatenated in order of increasing density, and each cut-point
    /// records the flattened length after its level.
    fn generate(rng: &mut impl Rng, window: u32, n_samples: usize, n_levels: usize) -> Self {
        let mut offsets = Vec::with_capacity(n_samples * 2);
        let mut levels = Vec::with_capacity(n_levels);

        for l in 0..n_levels {
            let target = (n_samples >> (n_levels - 1 - l)).max(1);

            // ~target points with minimum separation r over the [-1,1]² window
            let radius = 1.6 / (target as f32).sqrt();
            let mut points = bridson::sample::<2>(rng, radius, bridson::DEFAULT_K_ATTEMPTS);
            points.truncate(target);

            let w = window as f32;
            let wi = window as i32;
            for p in &points {
                offsets.push(((p[0] * w).round() as i32).clamp(-wi, wi));
                offsets.push(((p[1] * w).round() as i32).clamp(-wi, wi));
            }

            levels.push(offsets.len());
        }

        PatternSampler { offsets, levels }
    }

    pub(crate) fn from_parts(offsets: Vec<i32>, levels: Vec<usize>) -> SamplerResult<Self> {
        if offsets.is_empty() || offsets.len() % 2 != 0 {
            return Err(SamplerError::Decode(format!(
                "offset sequence must be non-empty and even, got {} entries",
                offsets.len()
            )));
        }
        if levels.is_empty()
            || levels.windows(2).any(|w| w[0] > w[1])
            || *levels.last().unwrap() > offsets.len()
        {
            return Err(SamplerError::Decode(
                "level cut-points must be non-decreasing and bounded by the offset count"
                    .to_string(),
            ));
        }
        Ok(PatternSampler { offsets, levels })
    }

    /// Flattened interleaved (dx, dy) offsets
    #[inline]
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Level cut-points in flattened units
    #[inline]
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Number of 2D sample points
    #[inline]
    pub fn n_points(&self) -> usize {
        self.offsets.len() / 2
    }
}

/// Pool of independently generated multi-resolution sample patterns
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use hdrkit_sampler::MultiResSamplers;
///
/// let mut rng = StdRng::seed_from_u64(11);
/// let ms = MultiResSamplers::new(&mut rng, 5, 16, 3, 4).unwrap();
///
/// let pattern = ms.get(&mut rng);
/// assert_eq!(pattern.levels().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiResSamplers {
    window: u32,
    n_samples: usize,
    n_levels: usize,
    patterns: Vec<PatternSampler>,
}

impl MultiResSamplers {
    /// Build a pattern pool
    ///
    /// # Arguments
    ///
    /// * `rng` - Random source for pattern generation; seed it for
    ///   reproducible pools
    /// * `window` - Half-window in pixels; every offset lies in
    ///   `[-window, window]` (must be > 0)
    /// * `n_samples` - Target point count of the densest level (values of 0
    ///   clamp to 1)
    /// * `n_levels` - Number of density levels (values of 0 clamp to 1)
    /// * `n_patterns` - Pool size (values of 0 clamp to 1)
    ///
    /// # Errors
    ///
    /// Returns `SamplerError::InvalidParameters` if `window` is 0.
    pub fn new(
        rng: &mut impl Rng,
        window: u32,
        n_samples: usize,
        n_levels: usize,
        n_patterns: usize,
    ) -> SamplerResult<Self> {
        if window == 0 {
            return Err(SamplerError::InvalidParameters(
                "window must be positive".to_string(),
            ));
        }

        let n_samples = n_samples.max(1);
        let n_levels = n_levels.max(1);
        let n_patterns = n_patterns.max(1);

        let patterns = (0..n_patterns)
            .map(|_| PatternSampler::generate(rng, window, n_samples, n_levels))
            .collect();

        Ok(MultiResSamplers {
            window,
            n_samples,
            n_levels,
            patterns,
        })
    }

    pub(crate) fn from_parts(
        window: u32,
        n_samples: usize,
        n_levels: usize,
        patterns: Vec<PatternSampler>,
    ) -> SamplerResult<Self> {
        if window == 0 || patterns.is_empty() {
            return Err(SamplerError::Decode(
                "pattern pool must have a positive window and at least one pattern".to_string(),
            ));
        }
        Ok(MultiResSamplers {
            window,
            n_samples,
            n_levels,
            patterns,
        })
    }

    /// Pick one pattern at random
    ///
    /// The random source is the caller's (typically one per worker); the
    /// returned pattern is read-only shared state.
    #[inline]
    pub fn get(&self, rng: &mut impl Rng) -> &PatternSampler {
        &self.patterns[rng.random_range(0..self.patterns.len())]
    }

    /// Half-window in pixels
    #[inline]
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Target point count of the densest level
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of density levels per pattern
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// All patterns in the pool
    #[inline]
    pub fn patterns(&self) -> &[PatternSampler] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_levels_non_decreasing_and_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let ms = MultiResSamplers::new(&mut rng, 6, 32, 3, 4).unwrap();

        for pattern in ms.patterns() {
            let levels = pattern.levels();
            assert_eq!(levels.len(), 3);
            for w in levels.windows(2) {
                assert!(w[0] <= w[1]);
            }
            assert_eq!(*levels.last().unwrap(), pattern.offsets().len());
        }
    }

    #[test]
    fn test_offsets_within_window() {
        let mut rng = StdRng::seed_from_u64(6);
        let window = 4u32;
        let ms = MultiResSamplers::new(&mut rng, window, 24, 2, 3).unwrap();

        for pattern in ms.patterns() {
            assert!(pattern.offsets().len() % 2 == 0);
            for &o in pattern.offsets() {
                assert!(o.unsigned_abs() <= window);
            }
        }
    }

    #[test]
    fn test_single_level_budget_is_full_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        let ms = MultiResSamplers::new(&mut rng, 5, 16, 1, 1).unwrap();

        let pattern = &ms.patterns()[0];
        assert_eq!(pattern.levels(), &[pattern.offsets().len()]);
        assert!(pattern.n_points() <= 16);
    }

    #[test]
    fn test_pool_get_returns_member() {
        let mut rng = StdRng::seed_from_u64(8);
        let ms = MultiResSamplers::new(&mut rng, 3, 8, 2, 4).unwrap();

        for _ in 0..16 {
            let p = ms.get(&mut rng);
            assert!(ms.patterns().iter().any(|q| q == p));
        }
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(MultiResSamplers::new(&mut rng, 0, 8, 1, 1).is_err());
    }

    #[test]
    fn test_degenerate_counts_clamp() {
        let mut rng = StdRng::seed_from_u64(10);
        let ms = MultiResSamplers::new(&mut rng, 2, 0, 0, 0).unwrap();
        assert_eq!(ms.n_levels(), 1);
        assert_eq!(ms.patterns().len(), 1);
        assert!(ms.patterns()[0].n_points() >= 1);
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(PatternSampler::from_parts(vec![], vec![0]).is_err());
        assert!(PatternSampler::from_parts(vec![1, 2, 3], vec![2]).is_err());
        assert!(PatternSampler::from_parts(vec![1, 2], vec![4]).is_err());
        assert!(PatternSampler::from_parts(vec![1, 2, 3, 4], vec![4, 2]).is_err());
        assert!(PatternSampler::from_parts(vec![1, 2, 3, 4], vec![2, 4]).is_ok());
    }
}
