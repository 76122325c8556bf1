// Host-side tests for pure input and sizing functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::*;
use input::*;

#[test]
fn dpr_is_capped_and_sanitized() {
    assert_eq!(effective_dpr(1.0), 1.0);
    assert_eq!(effective_dpr(1.5), 1.5);
    assert_eq!(effective_dpr(3.0), MAX_DEVICE_PIXEL_RATIO);
    assert_eq!(effective_dpr(0.0), 1.0);
    assert_eq!(effective_dpr(f64::NAN), 1.0);
}

#[test]
fn backing_size_scales_css_box() {
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    // 3x devices are rendered at the cap
    assert_eq!(backing_size(400.0, 300.0, 3.0), (800, 600));
}

#[test]
fn backing_size_never_collapses() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(-10.0, f64::NAN, 1.0), (1, 1));
    assert_eq!(backing_size(0.2, 0.2, 1.0), (1, 1));
}

#[test]
fn fallback_size_keeps_aspect_within_budget() {
    let (w, h) = fallback_size(3200, 1800);
    assert!(w * h <= FALLBACK_MAX_PIXELS);
    let aspect = w as f64 / h as f64;
    assert!((aspect - 16.0 / 9.0).abs() < 0.05, "aspect {aspect}");
}

#[test]
fn fallback_size_small_canvas() {
    assert_eq!(fallback_size(40, 20), (10, 5));
    assert_eq!(fallback_size(1, 1), (1, 1));
    assert_eq!(fallback_size(0, 0), (1, 1));
}

#[test]
fn fallback_buffer_for_dense_backing_stays_within_budget() {
    // a 4K box at DPR 2 would need ~130 MB of RGBA at full size
    let (bw, bh) = backing_size(3840.0, 2160.0, 2.0);
    let (w, h) = fallback_size(bw, bh);
    assert!(w * h <= FALLBACK_MAX_PIXELS);
    assert!((w * h * 4) as usize <= 160 * 120 * 4);
}
