use crate::easing::lerp;
use serde::Deserialize;

/// The tweakable "look" knobs of the background field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderParams {
    pub speed: f32,
    pub scale: f32,
    pub frequency: f32,
    pub warp_strength: f32,
    pub mouse_influence: f32,
    pub parallax: f32,
    pub noise: f32,
    pub vignette: f32,
    pub aberration: f32,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            speed: 0.3,
            scale: 1.2,
            frequency: 1.4,
            warp_strength: 1.2,
            mouse_influence: 0.8,
            parallax: 0.6,
            noise: 0.08,
            vignette: 0.75,
            aberration: 1.0,
        }
    }
}

impl ShaderParams {
    /// Component-wise interpolation; `k == 1.0` returns `to` bit-for-bit.
    pub fn lerp(&self, to: &ShaderParams, k: f32) -> ShaderParams {
        if k >= 1.0 {
            return *to;
        }
        ShaderParams {
            speed: lerp(self.speed, to.speed, k),
            scale: lerp(self.scale, to.scale, k),
            frequency: lerp(self.frequency, to.frequency, k),
            warp_strength: lerp(self.warp_strength, to.warp_strength, k),
            mouse_influence: lerp(self.mouse_influence, to.mouse_influence, k),
            parallax: lerp(self.parallax, to.parallax, k),
            noise: lerp(self.noise, to.noise, k),
            vignette: lerp(self.vignette, to.vignette, k),
            aberration: lerp(self.aberration, to.aberration, k),
        }
    }

    /// Copy of `self` with every field present in `patch` replaced.
    pub fn patched(&self, patch: &ParamPatch) -> ShaderParams {
        ShaderParams {
            speed: patch.speed.unwrap_or(self.speed),
            scale: patch.scale.unwrap_or(self.scale),
            frequency: patch.frequency.unwrap_or(self.frequency),
            warp_strength: patch.warp_strength.unwrap_or(self.warp_strength),
            mouse_influence: patch.mouse_influence.unwrap_or(self.mouse_influence),
            parallax: patch.parallax.unwrap_or(self.parallax),
            noise: patch.noise.unwrap_or(self.noise),
            vignette: patch.vignette.unwrap_or(self.vignette),
            aberration: patch.aberration.unwrap_or(self.aberration),
        }
    }
}

/// Partial update accepted by `setParams`. Non-finite numbers are dropped.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParamPatch {
    pub speed: Option<f32>,
    pub scale: Option<f32>,
    pub frequency: Option<f32>,
    pub warp_strength: Option<f32>,
    pub mouse_influence: Option<f32>,
    pub parallax: Option<f32>,
    pub noise: Option<f32>,
    pub vignette: Option<f32>,
    pub aberration: Option<f32>,
    /// Seconds; `None` uses the mount's configured duration.
    pub transition_duration: Option<f32>,
}

impl ParamPatch {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ParamPatch>(json).map(ParamPatch::sanitized)
    }

    pub fn sanitized(self) -> Self {
        let finite = |v: Option<f32>| v.filter(|x| x.is_finite());
        Self {
            speed: finite(self.speed),
            scale: finite(self.scale),
            frequency: finite(self.frequency),
            warp_strength: finite(self.warp_strength),
            mouse_influence: finite(self.mouse_influence),
            parallax: finite(self.parallax),
            noise: finite(self.noise),
            vignette: finite(self.vignette),
            aberration: finite(self.aberration),
            transition_duration: finite(self.transition_duration),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_none()
            && self.scale.is_none()
            && self.frequency.is_none()
            && self.warp_strength.is_none()
            && self.mouse_influence.is_none()
            && self.parallax.is_none()
            && self.noise.is_none()
            && self.vignette.is_none()
            && self.aberration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_present_fields() {
        let base = ShaderParams::default();
        let patch = ParamPatch {
            warp_strength: Some(2.0),
            noise: Some(0.0),
            ..Default::default()
        };
        let out = base.patched(&patch);
        assert_eq!(out.warp_strength, 2.0);
        assert_eq!(out.noise, 0.0);
        assert_eq!(out.speed, base.speed);
        assert_eq!(out.aberration, base.aberration);
    }

    #[test]
    fn lerp_at_one_is_exact() {
        let a = ShaderParams::default();
        let b = ShaderParams {
            scale: 0.1 + 0.2,
            ..a
        };
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.0), a);
    }

    #[test]
    fn json_patch_uses_camel_case_and_drops_unknown() {
        let p = ParamPatch::from_json(r#"{"warpStrength": 2.0, "transitionDuration": 1.5, "extra": 3}"#)
            .unwrap();
        assert_eq!(p.warp_strength, Some(2.0));
        assert_eq!(p.transition_duration, Some(1.5));
        assert!(p.speed.is_none());
        assert!(!p.is_empty());
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(ParamPatch::from_json("{}").unwrap().is_empty());
        let only_duration = ParamPatch {
            transition_duration: Some(1.0),
            ..Default::default()
        };
        assert!(only_duration.is_empty());
    }
}
