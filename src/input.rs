use crate::constants::{FALLBACK_MAX_PIXELS, FALLBACK_RENDER_SCALE, MAX_DEVICE_PIXEL_RATIO};
use glam::Vec2;
use web_sys as web;

// ---------------- Sizing helpers ----------------
#[inline]
pub fn effective_dpr(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size for a CSS box, never smaller than 1x1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = effective_dpr(device_pixel_ratio);
    let px = |css: f64| {
        if css.is_finite() && css > 0.0 {
            ((css * dpr) as u32).max(1)
        } else {
            1
        }
    };
    (px(css_width), px(css_height))
}

/// Reduced resolution for the CPU renderer, keeping the aspect ratio.
#[inline]
pub fn fallback_size(width: u32, height: u32) -> (u32, u32) {
    let mut w = (width as f64 * FALLBACK_RENDER_SCALE).round().max(1.0);
    let mut h = (height as f64 * FALLBACK_RENDER_SCALE).round().max(1.0);
    let pixels = w * h;
    if pixels > FALLBACK_MAX_PIXELS as f64 {
        let k = (FALLBACK_MAX_PIXELS as f64 / pixels).sqrt();
        w = (w * k).floor().max(1.0);
        h = (h * k).floor().max(1.0);
    }
    (w as u32, h as u32)
}

// ---------------- Pointer helpers ----------------
/// Window-relative NDC for a pointer event (+Y up).
#[inline]
pub fn pointer_window_ndc(ev: &web::PointerEvent, window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    reel_core::client_to_ndc(ev.client_x() as f32, ev.client_y() as f32, w as f32, h as f32)
}

#[inline]
pub fn window_inner_width(window: &web::Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
