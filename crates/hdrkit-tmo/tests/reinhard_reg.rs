//! reinhard_reg - Reinhard tone mapping regression test
//!
//! Tone maps synthetic HDR scenes and checks the operator's contract:
//! finite output, compressed dynamic range, preserved channel ratios
//! (hue), monotonicity in the key, and sane auto-estimated parameters.
//!
//! Run with:
//! ```
//! cargo test -p hdrkit-tmo --test reinhard_reg -- --nocapture
//! ```

use hdrkit_core::Image;
use hdrkit_test::RegParams;
use hdrkit_tmo::{estimate_alpha, estimate_white_point, reinhard_tmo};

/// Synthetic HDR scene: dim surround with a very bright square window
fn hdr_scene() -> Image {
    let mut img = Image::new_with_value(1, 32, 32, 3, 0.05).unwrap();
    for y in 10..22 {
        for x in 10..22 {
            img.pixel_mut(x, y).copy_from_slice(&[500.0, 400.0, 300.0]);
        }
    }
    img
}

#[test]
fn reinhard_reg() {
    let mut rp = RegParams::new("reinhard");

    let img = hdr_scene();

    // ================================================================
    // Part 1: parameter estimators
    // ================================================================
    let alpha = estimate_alpha(500.0, 0.05, 1.0);
    let wp = estimate_white_point(500.0, 0.05);
    eprintln!("estimated alpha {:.4}, white point {:.2}", alpha, wp);
    rp.compare_values(1.0, if alpha > 0.0 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if wp > 0.0 { 1.0 } else { 0.0 }, 0.0);

    // wider range pushes the white point up
    let wp_wide = estimate_white_point(5000.0, 0.005);
    rp.compare_values(1.0, if wp_wide > wp { 1.0 } else { 0.0 }, 0.0);

    // ================================================================
    // Part 2: tone mapping compresses the range and stays finite
    // ================================================================
    let out = reinhard_tmo(&img, None, None, 8.0).unwrap();
    let finite = out.data().iter().all(|v| v.is_finite());
    rp.compare_values(1.0, if finite { 1.0 } else { 0.0 }, 0.0);

    let in_max = img.max_value(0).unwrap();
    let out_max = out.max_value(0).unwrap();
    eprintln!("max channel 0: {} -> {}", in_max, out_max);
    rp.compare_values(1.0, if out_max < in_max { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if out_max > 0.0 { 1.0 } else { 0.0 }, 0.0);

    // ================================================================
    // Part 3: channel ratios survive luminance reassembly
    // ================================================================
    let p = out.pixel(16, 16);
    eprintln!("bright pixel out: {:?}", p);
    // input ratios were 500:400:300
    rp.compare_values(500.0 / 400.0, (p[0] / p[1]) as f64, 1e-3);
    rp.compare_values(500.0 / 300.0, (p[0] / p[2]) as f64, 1e-3);

    // ================================================================
    // Part 4: a larger key brightens the output
    // ================================================================
    let dim = reinhard_tmo(&img, Some(0.09), Some(wp), 8.0).unwrap();
    let bright = reinhard_tmo(&img, Some(0.36), Some(wp), 8.0).unwrap();
    let m_dim = dim.mean(1).unwrap();
    let m_bright = bright.mean(1).unwrap();
    eprintln!("mean channel 1: key 0.09 -> {:.4}, key 0.36 -> {:.4}", m_dim, m_bright);
    rp.compare_values(1.0, if m_bright > m_dim { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup());
}
