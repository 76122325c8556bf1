//! Eased tween between two parameter snapshots.

use crate::easing::ease_in_out_cubic;
use crate::params::ShaderParams;

#[derive(Clone, Debug, PartialEq)]
pub struct ParamTransition {
    start: ShaderParams,
    end: ShaderParams,
    elapsed: f32,
    duration: f32,
}

/// Result of advancing a transition by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionStep {
    pub params: ShaderParams,
    pub finished: bool,
}

impl ParamTransition {
    /// `duration` must be positive; callers apply zero-length changes directly.
    pub fn new(start: ShaderParams, end: ShaderParams, duration: f32) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn start(&self) -> &ShaderParams {
        &self.start
    }

    pub fn end(&self) -> &ShaderParams {
        &self.end
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }

    /// Values at the current progress without advancing.
    pub fn sample(&self) -> ShaderParams {
        let t = self.progress();
        if t >= 1.0 {
            return self.end;
        }
        self.start.lerp(&self.end, ease_in_out_cubic(t))
    }

    pub fn advance(&mut self, dt: f32) -> TransitionStep {
        self.elapsed += dt.max(0.0);
        let t = self.progress();
        TransitionStep {
            params: self.sample(),
            finished: t >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (ShaderParams, ShaderParams) {
        let a = ShaderParams::default();
        let b = ShaderParams {
            speed: 1.0,
            warp_strength: 2.0,
            noise: 0.0,
            ..a
        };
        (a, b)
    }

    #[test]
    fn starts_at_start_and_finishes_exactly_at_end() {
        let (a, b) = pair();
        let mut tr = ParamTransition::new(a, b, 1.0);
        assert_eq!(tr.sample(), a);
        let mut last = tr.advance(0.0);
        assert!(!last.finished);
        for _ in 0..200 {
            last = tr.advance(1.0 / 60.0);
            if last.finished {
                break;
            }
        }
        assert!(last.finished);
        assert_eq!(last.params, b);
    }

    #[test]
    fn overshooting_dt_snaps_to_end() {
        let (a, b) = pair();
        let mut tr = ParamTransition::new(a, b, 0.25);
        let step = tr.advance(10.0);
        assert!(step.finished);
        assert_eq!(step.params, b);
        assert_eq!(tr.progress(), 1.0);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let (a, b) = pair();
        let mut tr = ParamTransition::new(a, b, 1.0);
        tr.advance(0.5);
        let before = tr.elapsed();
        tr.advance(-1.0);
        assert_eq!(tr.elapsed(), before);
    }
}
