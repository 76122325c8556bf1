//! Per-mount state of the procedural background: clock, rotation, pointer,
//! palette, live parameters and the in-flight transition.

use crate::color::Palette;
use crate::config::BackgroundConfig;
use crate::constants::MAX_FRAME_DELTA_SEC;
use crate::params::{ParamPatch, ShaderParams};
use crate::pointer::PointerSmoother;
use crate::transition::ParamTransition;
use crate::uniforms::BackgroundUniforms;
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct BackgroundState {
    canvas_size: Vec2,
    elapsed: f32,
    base_rotation_deg: f32,
    auto_rotate_deg_per_sec: f32,
    rotation: f32,
    pointer: PointerSmoother,
    palette: Palette,
    transparent: bool,
    params: ShaderParams,
    transition: Option<ParamTransition>,
    default_transition_sec: f32,
}

impl BackgroundState {
    pub fn new(config: &BackgroundConfig) -> Self {
        let config = config.clone().sanitized();
        let mut state = Self {
            canvas_size: Vec2::ONE,
            elapsed: 0.0,
            base_rotation_deg: config.rotation % 360.0,
            auto_rotate_deg_per_sec: config.auto_rotate,
            rotation: 0.0,
            pointer: PointerSmoother::default(),
            palette: config.palette(),
            transparent: config.transparent,
            params: config.params(),
            transition: None,
            default_transition_sec: config.transition_duration,
        };
        state.update_rotation();
        log::info!(
            "[background] mounted colors={} transparent={} rotation={:.1}",
            state.palette.len(),
            state.transparent,
            state.base_rotation_deg
        );
        state
    }

    /// Device-pixel size of the output surface; zero extents are floored to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas_size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    pub fn set_pointer_target(&mut self, ndc: Vec2) {
        self.pointer.set_target(ndc);
    }

    /// Begin (or retarget) an eased transition toward the values in `patch`.
    /// The new transition starts from the current live (possibly mid-tween)
    /// values; fields absent from `patch` keep their current value.
    pub fn set_params(&mut self, patch: &ParamPatch) {
        let patch = patch.clone().sanitized();
        if patch.is_empty() {
            return;
        }
        let start = self.params;
        let end = start.patched(&patch);
        let duration = patch
            .transition_duration
            .unwrap_or(self.default_transition_sec);
        if duration <= 0.0 {
            self.params = end;
            self.transition = None;
            return;
        }
        log::debug!("[background] transition over {:.2}s", duration);
        self.transition = Some(ParamTransition::new(start, end, duration));
    }

    /// Advance one frame. Returns the uniform block to submit.
    pub fn tick(&mut self, delta_sec: f32) -> BackgroundUniforms {
        let dt = if delta_sec.is_finite() {
            delta_sec.clamp(0.0, MAX_FRAME_DELTA_SEC)
        } else {
            0.0
        };
        self.elapsed += dt;

        if let Some(tr) = &mut self.transition {
            let step = tr.advance(dt);
            self.params = step.params;
            if step.finished {
                self.transition = None;
            }
        }

        self.update_rotation();
        self.pointer.step(dt);
        self.uniforms()
    }

    pub fn uniforms(&self) -> BackgroundUniforms {
        BackgroundUniforms::pack(
            self.canvas_size,
            self.elapsed,
            self.rotation,
            self.pointer.current(),
            &self.params,
            &self.palette,
            self.transparent,
        )
    }

    fn update_rotation(&mut self) {
        let deg = self.base_rotation_deg + self.auto_rotate_deg_per_sec * self.elapsed;
        self.rotation = deg.to_radians();
    }

    pub fn params(&self) -> &ShaderParams {
        &self.params
    }

    pub fn transition(&self) -> Option<&ParamTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn pointer(&self) -> &PointerSmoother {
        &self.pointer
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }
}
