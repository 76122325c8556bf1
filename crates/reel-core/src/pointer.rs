use crate::constants::POINTER_SMOOTHING_PER_SEC;
use glam::Vec2;

/// Raw pointer target plus the exponentially smoothed value the shader sees.
/// Both live in normalized device coordinates, +Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSmoother {
    target: Vec2,
    current: Vec2,
    rate: f32,
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(POINTER_SMOOTHING_PER_SEC)
    }
}

impl PointerSmoother {
    pub fn new(rate_per_sec: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            rate: rate_per_sec.max(0.0),
        }
    }

    pub fn set_target(&mut self, ndc: Vec2) {
        self.target = clamp_ndc(ndc);
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn step(&mut self, dt_sec: f32) -> Vec2 {
        let amt = (dt_sec.max(0.0) * self.rate).min(1.0);
        self.current = clamp_ndc(self.current + (self.target - self.current) * amt);
        self.current
    }
}

#[inline]
fn clamp_ndc(v: Vec2) -> Vec2 {
    let v = if v.is_finite() { v } else { Vec2::ZERO };
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Map a client-space position to NDC against a viewport of `width` x `height`
/// CSS pixels. Y is flipped so +1 is the top edge.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    clamp_ndc(Vec2::new(
        (client_x / w) * 2.0 - 1.0,
        -((client_y / h) * 2.0 - 1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_clamped() {
        let mut p = PointerSmoother::default();
        p.set_target(Vec2::new(4.0, -9.0));
        assert_eq!(p.target(), Vec2::new(1.0, -1.0));
        p.set_target(Vec2::new(f32::NAN, 0.5));
        assert_eq!(p.target(), Vec2::ZERO);
    }

    #[test]
    fn large_dt_lands_on_target() {
        let mut p = PointerSmoother::default();
        p.set_target(Vec2::new(0.5, 0.25));
        assert_eq!(p.step(1.0), Vec2::new(0.5, 0.25));
    }

    #[test]
    fn client_to_ndc_flips_y() {
        assert_eq!(client_to_ndc(0.0, 0.0, 100.0, 50.0), Vec2::new(-1.0, 1.0));
        assert_eq!(client_to_ndc(100.0, 50.0, 100.0, 50.0), Vec2::new(1.0, -1.0));
        assert_eq!(client_to_ndc(50.0, 25.0, 100.0, 50.0), Vec2::ZERO);
    }
}
