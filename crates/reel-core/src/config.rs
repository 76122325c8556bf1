//! Mount-time configuration for the background renderer.
//!
//! Every field is optional on the wire; missing fields fall back to the
//! documented defaults.

use crate::color::Palette;
use crate::constants::DEFAULT_TRANSITION_SEC;
use crate::params::ShaderParams;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    /// Base angle in degrees.
    pub rotation: f32,
    /// Continuous rotation in degrees per second.
    pub auto_rotate: f32,
    pub speed: f32,
    /// Hex strings, at most eight are used. Empty selects the procedural field.
    pub colors: Vec<String>,
    pub transparent: bool,
    pub scale: f32,
    pub frequency: f32,
    pub warp_strength: f32,
    pub mouse_influence: f32,
    pub parallax: f32,
    pub noise: f32,
    pub vignette: f32,
    pub aberration: f32,
    /// Default duration in seconds for `setParams` transitions.
    pub transition_duration: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let p = ShaderParams::default();
        Self {
            rotation: 30.0,
            auto_rotate: 0.0,
            speed: p.speed,
            colors: vec!["#ff5c7a".into(), "#8a5cff".into(), "#00ffd1".into()],
            transparent: true,
            scale: p.scale,
            frequency: p.frequency,
            warp_strength: p.warp_strength,
            mouse_influence: p.mouse_influence,
            parallax: p.parallax,
            noise: p.noise,
            vignette: p.vignette,
            aberration: p.aberration,
            transition_duration: DEFAULT_TRANSITION_SEC,
        }
    }
}

impl BackgroundConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: BackgroundConfig = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    /// Replace non-finite numbers with their defaults.
    pub fn sanitized(mut self) -> Self {
        let d = BackgroundConfig::default();
        let fix = |v: &mut f32, fallback: f32| {
            if !v.is_finite() {
                *v = fallback;
            }
        };
        fix(&mut self.rotation, d.rotation);
        fix(&mut self.auto_rotate, d.auto_rotate);
        fix(&mut self.speed, d.speed);
        fix(&mut self.scale, d.scale);
        fix(&mut self.frequency, d.frequency);
        fix(&mut self.warp_strength, d.warp_strength);
        fix(&mut self.mouse_influence, d.mouse_influence);
        fix(&mut self.parallax, d.parallax);
        fix(&mut self.noise, d.noise);
        fix(&mut self.vignette, d.vignette);
        fix(&mut self.aberration, d.aberration);
        fix(&mut self.transition_duration, d.transition_duration);
        if self.transition_duration < 0.0 {
            self.transition_duration = 0.0;
        }
        self
    }

    pub fn params(&self) -> ShaderParams {
        ShaderParams {
            speed: self.speed,
            scale: self.scale,
            frequency: self.frequency,
            warp_strength: self.warp_strength,
            mouse_influence: self.mouse_influence,
            parallax: self.parallax,
            noise: self.noise,
            vignette: self.vignette,
            aberration: self.aberration,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::from_hex_list(self.colors.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = BackgroundConfig::from_json("{}").unwrap();
        assert_eq!(cfg, BackgroundConfig::default());
        assert_eq!(cfg.palette().len(), 3);
    }

    #[test]
    fn partial_override_merges_with_defaults() {
        let cfg = BackgroundConfig::from_json(
            r#"{"rotation": 90, "colors": [], "transparent": false, "warpStrength": 0.5}"#,
        )
        .unwrap();
        assert_eq!(cfg.rotation, 90.0);
        assert!(cfg.palette().is_empty());
        assert!(!cfg.transparent);
        assert_eq!(cfg.warp_strength, 0.5);
        assert_eq!(cfg.speed, 0.3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            BackgroundConfig::from_json("{rotation:"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn negative_transition_duration_is_floored() {
        let cfg = BackgroundConfig::from_json(r#"{"transitionDuration": -2}"#).unwrap();
        assert_eq!(cfg.transition_duration, 0.0);
    }
}
