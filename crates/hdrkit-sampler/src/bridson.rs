//! Poisson-disk sampling with Bridson's algorithm
//!
//! Generates a spatially well-distributed point set inside the window
//! `[-1, 1]^N` such that no two points are closer than a given radius.
//! The algorithm keeps an "active" list of points; each step picks a random
//! active point, draws up to `k_attempts` candidates in the annulus
//! `[radius, 2·radius)` around it, and accepts the first candidate that is
//! in-bounds and far enough from every existing point. A point whose
//! attempts are exhausted leaves the active list for good, so the loop
//! always terminates.
//!
//! Neighbor checks are brute force against all prior points. That is O(n²)
//! overall but the windows used for filter kernels are small, and it keeps
//! the distance invariant trivially auditable.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let points = hdrkit_sampler::bridson::sample::<2>(&mut rng, 0.3, 30);
//! assert!(!points.is_empty());
//! ```

use rand::Rng;

/// Default cap on candidate draws per active point
pub const DEFAULT_K_ATTEMPTS: u32 = 30;

/// Fallback radius when a non-positive radius is requested
const DEFAULT_RADIUS: f32 = 0.5;

/// Generate a Poisson-disk point set over `[-1, 1]^N`
///
/// # Arguments
///
/// * `rng` - Random source; seed it for reproducible patterns
/// * `radius` - Minimum pairwise separation (non-positive values clamp to 0.5)
/// * `k_attempts` - Candidate draws per active point (values < 1 clamp to 30)
///
/// # Invariants
///
/// Every returned pair of points has Euclidean distance ≥ `radius`, and
/// every point lies inside `[-1, 1]^N`.
pub fn sample<const N: usize>(rng: &mut impl Rng, radius: f32, k_attempts: u32) -> Vec<[f32; N]> {
    let radius = if radius > 0.0 { radius } else { DEFAULT_RADIUS };
    let k_attempts = if k_attempts >= 1 {
        k_attempts
    } else {
        DEFAULT_K_ATTEMPTS
    };

    let mut samples: Vec<[f32; N]> = Vec::new();
    let mut active: Vec<usize> = Vec::new();

    samples.push(random_point::<N>(rng));
    active.push(0);

    while !active.is_empty() {
        let i = rng.random_range(0..active.len());
        let center = samples[active[i]];

        let mut accepted = false;
        for _ in 0..k_attempts {
            let candidate = annulus_point::<N>(rng, &center, radius);

            if in_window(&candidate) && !has_neighbor_within(&samples, &candidate, radius) {
                samples.push(candidate);
                active.push(samples.len() - 1);
                accepted = true;
                break;
            }
        }

        if !accepted {
            active.swap_remove(i);
        }
    }

    samples
}

/// Uniform random point in `[-1, 1]^N`
fn random_point<const N: usize>(rng: &mut impl Rng) -> [f32; N] {
    let mut p = [0.0f32; N];
    for v in &mut p {
        *v = rng.random_range(-1.0f32..1.0);
    }
    p
}

/// Random point in the annulus `[radius, 2·radius)` around `center`
///
/// Rejection sampling over the bounding box of the outer shell; the
/// acceptance rate is dimension-dependent but comfortably above 1/4 for the
/// small N used here.
fn annulus_point<const N: usize>(rng: &mut impl Rng, center: &[f32; N], radius: f32) -> [f32; N] {
    loop {
        let mut offset = [0.0f32; N];
        for v in &mut offset {
            *v = rng.random_range(-2.0 * radius..2.0 * radius);
        }

        let d2: f32 = offset.iter().map(|v| v * v).sum();
        if d2 >= radius * radius && d2 < 4.0 * radius * radius {
            let mut p = *center;
            for (pv, ov) in p.iter_mut().zip(offset.iter()) {
                *pv += ov;
            }
            return p;
        }
    }
}

/// True if all coordinates lie inside `[-1, 1]`
fn in_window<const N: usize>(p: &[f32; N]) -> bool {
    p.iter().all(|v| (-1.0..=1.0).contains(v))
}

/// Brute-force check for any existing sample closer than `radius`
fn has_neighbor_within<const N: usize>(samples: &[[f32; N]], p: &[f32; N], radius: f32) -> bool {
    let radius2 = radius * radius;
    samples.iter().any(|s| distance_sq(s, p) < radius2)
}

fn distance_sq<const N: usize>(a: &[f32; N], b: &[f32; N]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}
