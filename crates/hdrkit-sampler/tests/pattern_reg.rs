//! pattern_reg - Poisson-disk pattern generation and persistence regression test
//!
//! Checks the invariants of seeded pattern pools (offsets inside the
//! window, level cut-points non-decreasing, minimum point separation of
//! the underlying Bridson sets) and that the text serialization format
//! round-trips a pool exactly, byte for byte.
//!
//! Run with:
//! ```
//! cargo test -p hdrkit-sampler --test pattern_reg -- --nocapture
//! ```

use hdrkit_sampler::{MultiResSamplers, bridson};
use hdrkit_test::RegParams;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn pattern_reg() {
    let mut rp = RegParams::new("pattern");

    // ================================================================
    // Part 1: Bridson point sets keep their minimum separation
    // ================================================================
    let mut rng = StdRng::seed_from_u64(1234);
    for &radius in &[0.1f32, 0.2, 0.4] {
        let points = bridson::sample::<2>(&mut rng, radius, bridson::DEFAULT_K_ATTEMPTS);
        eprintln!("radius {}: {} points", radius, points.len());
        assert!(!points.is_empty());

        let mut min_dist = f32::MAX;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
                min_dist = min_dist.min(d);
            }
            assert!(a.iter().all(|v| (-1.0..=1.0).contains(v)));
        }
        // 1.0 if every pair is at least radius apart (float slack)
        let separated = if points.len() > 1 && min_dist < radius - 1e-6 {
            0.0
        } else {
            1.0
        };
        rp.compare_values(1.0, separated, 0.0);
    }

    // ================================================================
    // Part 2: seeded pools reproduce exactly
    // ================================================================
    let mut rng_a = StdRng::seed_from_u64(77);
    let mut rng_b = StdRng::seed_from_u64(77);
    let pool_a = MultiResSamplers::new(&mut rng_a, 6, 32, 3, 4).unwrap();
    let pool_b = MultiResSamplers::new(&mut rng_b, 6, 32, 3, 4).unwrap();
    rp.compare_values(1.0, if pool_a == pool_b { 1.0 } else { 0.0 }, 0.0);

    // ================================================================
    // Part 3: pattern invariants
    // ================================================================
    for pattern in pool_a.patterns() {
        for &o in pattern.offsets() {
            assert!(o.unsigned_abs() <= pool_a.window());
        }
        let levels = pattern.levels();
        assert_eq!(levels.len(), 3);
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*levels.last().unwrap(), pattern.offsets().len());
    }
    rp.compare_values(3.0, pool_a.n_levels() as f64, 0.0);

    // ================================================================
    // Part 4: serialization round-trip is exact
    // ================================================================
    let bytes = pool_a.write_to_bytes().unwrap();
    let restored = MultiResSamplers::read_from_bytes(&bytes).unwrap();
    rp.compare_values(1.0, if restored == pool_a { 1.0 } else { 0.0 }, 0.0);

    let bytes2 = restored.write_to_bytes().unwrap();
    rp.compare_strings(&bytes, &bytes2);

    assert!(rp.cleanup());
}
