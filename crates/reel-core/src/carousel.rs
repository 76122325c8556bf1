//! Kinetic scrolling for the film reel.
//!
//! Wheel and drag input both move a single target position; every frame the
//! scroll position approaches it exponentially. Positions are never wrapped,
//! only the rendered offset is.

use crate::constants::{
    CLICK_SUPPRESS_MS, DRAG_GAIN, DRAG_THRESHOLD_PX, FLING_GAIN, MOBILE_BREAKPOINT_PX,
    SCROLL_EASE, WHEEL_GAIN,
};
use instant::Instant;
use std::time::Duration;

/// Layout numbers the physics needs from the rendered track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReelGeometry {
    /// Offset of the first item of the second copy, i.e. one loop.
    pub set_width: f64,
    pub viewport_width: f64,
    pub item_width: f64,
}

impl ReelGeometry {
    pub fn is_ready(&self) -> bool {
        self.set_width.is_finite() && self.set_width > 0.0
    }
}

/// Where a wheel event happened, for gating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGate {
    pub over_reel: bool,
    pub viewport_width: f64,
}

impl WheelGate {
    pub fn allows(&self) -> bool {
        self.over_reel || self.viewport_width < MOBILE_BREAKPOINT_PX
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDrag {
    pub start_x: f64,
    pub last_x: f64,
    pub velocity: f64,
}

#[derive(Clone, Debug, Default)]
pub struct CarouselPhysics {
    loop_width: f64,
    scroll: f64,
    target: f64,
    drag: Option<PointerDrag>,
    dragging: bool,
    // set on release; `dragging` reads false once it passes
    release_deadline: Option<Instant>,
}

impl CarouselPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the loop width. The first successful measurement centres the
    /// first item of the middle copy; later ones keep `scroll / loop_width`.
    /// Returns `false` (and changes nothing) when the geometry is not ready.
    pub fn measure_loop_width(&mut self, geom: ReelGeometry) -> bool {
        if !geom.is_ready() {
            log::debug!("[reel] measure skipped, layout not ready");
            return false;
        }
        let new_width = geom.set_width;
        if self.loop_width > 0.0 {
            let ratio = self.scroll / self.loop_width;
            self.scroll = ratio * new_width;
        } else {
            let viewport_center = geom.viewport_width.max(0.0) * 0.5;
            self.scroll = new_width - (viewport_center - geom.item_width.max(0.0) / 2.0);
        }
        self.target = self.scroll;
        self.loop_width = new_width;
        log::debug!(
            "[reel] loop width {:.1} scroll {:.1}",
            self.loop_width,
            self.scroll
        );
        true
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.drag = Some(PointerDrag {
            start_x: x,
            last_x: x,
            velocity: 0.0,
        });
        self.dragging = false;
        self.release_deadline = None;
        self.target = self.scroll;
    }

    pub fn pointer_move(&mut self, x: f64) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let diff = drag.last_x - x;
        if (x - drag.start_x).abs() > DRAG_THRESHOLD_PX {
            self.dragging = true;
        }
        self.target += diff * DRAG_GAIN;
        drag.velocity = diff;
        drag.last_x = x;
    }

    /// Release (pointerup or pointercancel). Applies the fling impulse and
    /// arms the click-suppression latch.
    pub fn pointer_up(&mut self, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.target += drag.velocity * FLING_GAIN;
        self.release_deadline = Some(now + Duration::from_millis(CLICK_SUPPRESS_MS));
    }

    /// Returns whether the delta was applied.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, gate: WheelGate) -> bool {
        if !gate.allows() {
            return false;
        }
        let delta = if delta_y.abs() > delta_x.abs() {
            delta_y
        } else {
            delta_x
        };
        if !delta.is_finite() {
            return false;
        }
        self.target += delta * WHEEL_GAIN;
        true
    }

    /// Per-frame ease toward the target. Returns the translation to render,
    /// or `None` until the track has been measured.
    pub fn tick(&mut self) -> Option<f64> {
        self.scroll += (self.target - self.scroll) * SCROLL_EASE;
        self.display_offset()
    }

    /// Translation for the tripled track, always in `(-2 * loop_width, -loop_width]`.
    pub fn display_offset(&self) -> Option<f64> {
        wrap_offset(self.scroll, self.loop_width)
    }

    /// True while the current or just-released gesture crossed the drag
    /// threshold.
    pub fn is_dragging(&self, now: Instant) -> bool {
        match self.release_deadline {
            Some(deadline) if self.drag.is_none() => self.dragging && now < deadline,
            _ => self.dragging,
        }
    }

    /// Whether a click at `now` should open the item. Suppressed only right
    /// after a real drag.
    pub fn accept_click(&mut self, now: Instant) -> bool {
        if self.release_deadline.is_some_and(|d| now >= d) {
            self.dragging = false;
            self.release_deadline = None;
        }
        !self.is_dragging(now)
    }

    pub fn is_pointer_down(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&PointerDrag> {
        self.drag.as_ref()
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll
    }

    pub fn target_position(&self) -> f64 {
        self.target
    }

    pub fn loop_width(&self) -> f64 {
        self.loop_width
    }
}

/// `-(scroll mod width) - width`, or `None` for an unmeasured track.
pub fn wrap_offset(scroll: f64, loop_width: f64) -> Option<f64> {
    if !(loop_width > 0.0) || !scroll.is_finite() {
        return None;
    }
    let mut wrapped = scroll.rem_euclid(loop_width);
    // rem_euclid can round up to exactly `loop_width`
    if wrapped >= loop_width {
        wrapped = 0.0;
    }
    Some(-wrapped - loop_width)
}
