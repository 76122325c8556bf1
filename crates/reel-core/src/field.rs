//! CPU rendition of `background.wgsl`.
//!
//! Reads the same [`BackgroundUniforms`] the GPU pipeline uploads, so the two
//! backends stay interchangeable. UVs are GL-style (origin bottom-left).

use crate::constants::{
    ABERRATION_BASE, ABERRATION_RADIAL, LENS_DISTORTION, MAX_COLORS, NOISE_MIN, SCALE_EPSILON,
    TONE_GAIN, TONE_GAMMA, VIGNETTE_INNER, VIGNETTE_OUTER,
};
use crate::easing::{lerp, smoothstep};
use crate::uniforms::BackgroundUniforms;
use glam::{Vec2, Vec3, Vec4};

#[inline]
fn sin2(v: Vec2) -> Vec2 {
    Vec2::new(v.x.sin(), v.y.sin())
}

#[inline]
fn cos2(v: Vec2) -> Vec2 {
    Vec2::new(v.x.cos(), v.y.cos())
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Pseudo-random value in [0, 1) for a pixel coordinate.
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.547)
}

/// Soft ring weight for a contour metric.
#[inline]
pub fn coverage(metric: f32) -> f32 {
    1.0 - (-6.0 / (6.0 * metric).exp()).exp()
}

/// Folded-sine metric at `s`, blended between the unwarped and fully warped
/// evaluations by `warp_strength^0.3`. Above 1.0 the displacement is
/// extrapolated by the excess.
pub fn contour_metric(s: Vec2, frequency: f32, warp_strength: f32, t: f32, phase: f32) -> f32 {
    let f = frequency;
    let r = sin2(1.5 * (Vec2::new(s.y, s.x) * f) + 2.0 * cos2(s * f));
    let fold = |v: Vec2| (v + Vec2::splat((5.0 * v.y * f - 3.0 * t + phase).sin() / 4.0)).length();
    let m0 = fold(r);
    let k_below = warp_strength.clamp(0.0, 1.0);
    let k_mix = k_below.powf(0.3);
    let gain = 1.0 + (warp_strength - 1.0).max(0.0);
    let warped = s + (r - s) * k_below * gain;
    let m1 = fold(warped);
    lerp(m0, m1, k_mix)
}

/// Undistorted field sample. Returns straight (non-premultiplied) colour and
/// coverage alpha.
pub fn shade(u: &BackgroundUniforms, uv: Vec2, frag_coord: Vec2) -> Vec4 {
    let t = u.time * u.speed;
    let pointer = Vec2::from(u.pointer);
    let mut p = uv * 2.0 - Vec2::ONE;
    p += pointer * u.parallax * 0.1;

    let (c, s) = (u.rot[0], u.rot[1]);
    let rp = Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c);
    let aspect = u.canvas[0] / u.canvas[1].max(1.0);
    let mut q = Vec2::new(rp.x * aspect, rp.y);

    q /= u.scale.max(SCALE_EPSILON);
    q /= 0.5 + 0.2 * q.dot(q);
    q += Vec2::splat(0.2 * t.cos() - 7.56);
    q += (pointer - rp) * u.mouse_influence * 0.2;

    let mut col;
    let alpha;
    let count = (u.color_count as usize).min(MAX_COLORS);
    if count > 0 {
        let mut s = q;
        let mut sum = Vec3::ZERO;
        let mut cover: f32 = 0.0;
        for (i, c) in u.colors.iter().take(count).enumerate() {
            s -= Vec2::splat(0.01);
            let w = coverage(contour_metric(s, u.frequency, u.warp_strength, t, i as f32));
            sum += Vec3::new(c[0], c[1], c[2]) * w;
            cover = cover.max(w);
        }
        col = sum.clamp(Vec3::ZERO, Vec3::ONE);
        alpha = if u.is_transparent() { cover } else { 1.0 };
    } else {
        let mut s = q;
        let mut ch = [0.0f32; 3];
        for (k, out) in ch.iter_mut().enumerate() {
            s -= Vec2::splat(0.01);
            *out = coverage(contour_metric(s, u.frequency, u.warp_strength, t, k as f32));
        }
        col = Vec3::from(ch);
        alpha = if u.is_transparent() {
            col.max_element()
        } else {
            1.0
        };
    }

    if u.noise > NOISE_MIN {
        let n = hash(frag_coord + Vec2::splat(u.time));
        col = (col + Vec3::splat((n - 0.5) * u.noise)).clamp(Vec3::ZERO, Vec3::ONE);
    }

    col.extend(alpha)
}

/// Full per-pixel pipeline: lens, chromatic aberration, tone curve, vignette.
/// Output is premultiplied when the uniforms request transparency.
pub fn shade_pixel(u: &BackgroundUniforms, uv: Vec2, frag_coord: Vec2) -> Vec4 {
    let (col, a) = shade_straight(u, uv, frag_coord);
    if u.is_transparent() {
        (col * a).extend(a)
    } else {
        col.extend(a)
    }
}

/// Same as [`shade_pixel`] but with straight alpha, for targets like
/// `ImageData` that do not accept premultiplied colour.
pub fn shade_straight(u: &BackgroundUniforms, uv: Vec2, frag_coord: Vec2) -> (Vec3, f32) {
    let p = uv * 2.0 - Vec2::ONE;
    let r2 = p.dot(p);
    let uv_lens = (p * (1.0 + LENS_DISTORTION * r2)) * 0.5 + Vec2::splat(0.5);

    let dir = (p + Vec2::splat(1e-6)).normalize_or_zero();
    let offs = dir * (u.aberration * (ABERRATION_BASE + ABERRATION_RADIAL * r2));

    let base_g = shade(u, uv_lens, frag_coord);
    let base_r = shade(u, uv_lens + offs, frag_coord);
    let base_b = shade(u, uv_lens - offs, frag_coord);

    let mut col = Vec3::new(base_r.x, base_g.y, base_b.z);
    let a = base_g.w;

    col *= TONE_GAIN;
    col = Vec3::new(
        col.x.max(0.0).powf(TONE_GAMMA),
        col.y.max(0.0).powf(TONE_GAMMA),
        col.z.max(0.0).powf(TONE_GAMMA),
    );

    let vig = 1.0 - smoothstep(VIGNETTE_INNER, VIGNETTE_OUTER, p.length());
    col *= lerp(1.0, vig, u.vignette.clamp(0.0, 1.0));

    (col, a)
}

/// Rasterize into a straight-alpha RGBA8 buffer, row-major from the top row.
/// `out` must hold `width * height * 4` bytes; shorter buffers are filled as
/// far as they go.
pub fn render_rgba8(u: &BackgroundUniforms, width: u32, height: u32, out: &mut [u8]) {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        let x = (i as u32 % width.max(1)) as f32 + 0.5;
        let y = (i as u32 / width.max(1)) as f32 + 0.5;
        if y > h {
            break;
        }
        let uv = Vec2::new(x / w, 1.0 - y / h);
        let frag = Vec2::new(x, h - y);
        let (col, a) = shade_straight(u, uv, frag);
        px[0] = to_u8(col.x);
        px[1] = to_u8(col.y);
        px[2] = to_u8(col.z);
        px[3] = to_u8(a);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    if v.is_finite() {
        (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
    } else {
        0
    }
}
