// Host-side tests for web constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn sizing_constants_are_within_reasonable_bounds() {
    // DPR cap should allow at least standard-density displays
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);

    // Fallback renders below full resolution but not to nothing
    assert!(FALLBACK_RENDER_SCALE > 0.0 && FALLBACK_RENDER_SCALE <= 1.0);
    assert!(FALLBACK_MAX_PIXELS >= 64 * 48);
}

#[test]
fn selectors_match_generated_classes() {
    // Delegated clicks look tiles up by class, so the selector must be a plain class
    assert!(!REEL_ITEM_CLASS.contains(' '));
    assert!(REEL_SCOPE_SELECTOR.starts_with('.'));
    assert!(REEL_INDEX_ATTR.starts_with("data-"));
    assert!(!EDGE_BLUR_CLASS.is_empty());
    assert!(!BACKGROUND_CANVAS_CLASS.is_empty());
}

#[test]
fn blur_layer_background_is_nearly_transparent() {
    // backdrop-filter needs painted content, but it must stay invisible
    assert!(EDGE_BLUR_LAYER_BG.starts_with("rgba("));
    assert!(EDGE_BLUR_LAYER_BG.ends_with("0.001)"));
}

#[test]
fn preview_removal_waits_for_the_fade() {
    // the clip is removed only once its opacity transition has finished
    let secs: f64 = PREVIEW_FADE_TRANSITION
        .split_whitespace()
        .nth(1)
        .and_then(|d| d.strip_suffix('s'))
        .and_then(|d| d.parse().ok())
        .unwrap();
    assert!(PREVIEW_FADE_MS as f64 >= secs * 1000.0);
    assert_ne!(PREVIEW_VIDEO_CLASS, REEL_INFO_CLASS);
}
