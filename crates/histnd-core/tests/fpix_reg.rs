//! FPix (floating-point image) regression test
//!
//! Tests FPix creation, pixel access, and its use through the
//! ScalarImage trait.

use histnd_core::{FPix, ScalarImage, common_dimensions};
use histnd_test::RegParams;

// ==========================================================================
// Test 1: FPix creation and pixel access
// ==========================================================================

#[test]
fn fpix_reg_creation() {
    let mut rp = RegParams::new("fpix_creation");

    let fpix = FPix::new(640, 480).expect("FPix::new failed");
    rp.compare_values(640.0, fpix.width() as f64, 0.0);
    rp.compare_values(480.0, fpix.height() as f64, 0.0);
    rp.compare_values(0.0, fpix.sum(), 0.0);

    let fpix_d = FPix::from_data(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    rp.compare_values(1.0, fpix_d.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(6.0, fpix_d.get_pixel(2, 1).unwrap() as f64, 0.0);
    rp.compare_values(21.0, fpix_d.sum(), 0.0);

    let invalid = FPix::new(0, 100);
    rp.compare_values(1.0, if invalid.is_err() { 1.0 } else { 0.0 }, 0.0);
    let oob = fpix_d.get_pixel(3, 0);
    rp.compare_values(1.0, if oob.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "fpix_reg creation tests failed");
}

// ==========================================================================
// Test 2: ScalarImage contract
// ==========================================================================

#[test]
fn fpix_reg_scalar_image() {
    let mut rp = RegParams::new("fpix_scalar");

    let src = FPix::from_fn(5, 4, |x, y| (x * y) as f32).unwrap();
    rp.compare_values(6.0, src.value_at(3, 2) as f64, 0.0);

    let mut out = src.create_zero_like();
    rp.compare_values(5.0, ScalarImage::width(&out) as f64, 0.0);
    rp.compare_values(4.0, ScalarImage::height(&out) as f64, 0.0);
    rp.compare_values(0.0, out.sum(), 0.0);

    out.set_value_at(4, 3, 2.5);
    rp.compare_values(2.5, out.get_pixel(4, 3).unwrap() as f64, 0.0);

    let same = common_dimensions(&[src.clone(), out]).unwrap();
    rp.compare_values(1.0, if same == Some((5, 4)) { 1.0 } else { 0.0 }, 0.0);
    let other = FPix::new(4, 5).unwrap();
    let diff = common_dimensions(&[src, other]);
    rp.compare_values(1.0, if diff.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "fpix_reg scalar image tests failed");
}
