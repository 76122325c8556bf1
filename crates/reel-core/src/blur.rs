//! Stacked backdrop-blur layers that fade an edge of a container.
//!
//! Each layer blurs a bit more than the one before and is masked to a band
//! that moves toward the edge, so the result reads as a continuous ramp.

use crate::config::ConfigError;
use crate::easing::smoothstep;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    pub fn gradient_direction(self) -> &'static str {
        match self {
            Edge::Top => "to top",
            Edge::Bottom => "to bottom",
            Edge::Left => "to left",
            Edge::Right => "to right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeBlurConfig {
    pub position: Edge,
    pub strength: f64,
    /// CSS length of the blurred band.
    pub size: String,
    pub div_count: u32,
    pub exponential: bool,
    pub opacity: f64,
    pub z_index: i32,
    /// Attach to the document body with `position: fixed`.
    pub fixed: bool,
}

impl Default for EdgeBlurConfig {
    fn default() -> Self {
        Self {
            position: Edge::Bottom,
            strength: 2.0,
            size: "6rem".into(),
            div_count: 5,
            exponential: false,
            opacity: 1.0,
            z_index: 5,
            fixed: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlurLayer {
    /// Backdrop blur radius in rem.
    pub blur_rem: f64,
    /// CSS `linear-gradient(...)` used as the layer mask.
    pub mask: String,
}

impl BlurLayer {
    pub fn backdrop_filter(&self) -> String {
        format!("blur({:.3}rem)", self.blur_rem)
    }
}

impl EdgeBlurConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: EdgeBlurConfig = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        let d = EdgeBlurConfig::default();
        if !self.strength.is_finite() {
            self.strength = d.strength;
        }
        if !self.opacity.is_finite() {
            self.opacity = d.opacity;
        }
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self.div_count = self.div_count.max(1);
        if self.size.trim().is_empty() {
            self.size = d.size;
        }
        self
    }

    /// Layers from the innermost (lightest) to the edge (heaviest).
    pub fn layers(&self) -> Vec<BlurLayer> {
        let n = self.div_count.max(1);
        let increment = 100.0 / n as f64;
        let direction = self.position.gradient_direction();
        (1..=n)
            .map(|i| {
                let progress = smoothstep(0.0, 1.0, i as f32 / n as f32) as f64;
                let blur_rem = if self.exponential {
                    2f64.powf(progress * 4.0) * 0.0625 * self.strength
                } else {
                    0.0625 * (progress * n as f64 + 1.0) * self.strength
                };

                let i = i as f64;
                let p1 = round1(increment * (i - 1.0));
                let p2 = round1(increment * i);
                let p3 = round1(increment * (i + 1.0));
                let p4 = round1(increment * (i + 2.0));

                let mut stops = format!("transparent {p1}%, black {p2}%");
                if p3 <= 100.0 {
                    stops.push_str(&format!(", black {p3}%"));
                }
                if p4 <= 100.0 {
                    stops.push_str(&format!(", transparent {p4}%"));
                }
                BlurLayer {
                    blur_rem,
                    mask: format!("linear-gradient({direction}, {stops})"),
                }
            })
            .collect()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layers_match_reference_values() {
        let layers = EdgeBlurConfig::default().layers();
        assert_eq!(layers.len(), 5);
        assert_eq!(
            layers[0].mask,
            "linear-gradient(to bottom, transparent 0%, black 20%, black 40%, transparent 60%)"
        );
        assert_eq!(
            layers[3].mask,
            "linear-gradient(to bottom, transparent 60%, black 80%, black 100%)"
        );
        assert_eq!(
            layers[4].mask,
            "linear-gradient(to bottom, transparent 80%, black 100%)"
        );
        // last layer: progress 1 => 0.0625 * 6 * 2
        assert!((layers[4].blur_rem - 0.75).abs() < 1e-9);
        assert_eq!(layers[4].backdrop_filter(), "blur(0.750rem)");
    }

    #[test]
    fn blur_grows_toward_the_edge() {
        let cfg = EdgeBlurConfig {
            exponential: true,
            div_count: 8,
            ..Default::default()
        };
        let layers = cfg.layers();
        for pair in layers.windows(2) {
            assert!(pair[1].blur_rem > pair[0].blur_rem);
        }
        assert!((layers[7].blur_rem - 16.0 * 0.0625 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn stops_are_rounded_to_one_decimal() {
        let cfg = EdgeBlurConfig {
            div_count: 3,
            position: Edge::Left,
            ..Default::default()
        };
        let layers = cfg.layers();
        assert_eq!(
            layers[0].mask,
            "linear-gradient(to left, transparent 0%, black 33.3%, black 66.7%, transparent 100%)"
        );
    }

    #[test]
    fn config_parses_partial_json() {
        let cfg = EdgeBlurConfig::from_json(r#"{"position":"top","divCount":0,"fixed":true}"#).unwrap();
        assert_eq!(cfg.position, Edge::Top);
        assert_eq!(cfg.div_count, 1);
        assert!(cfg.fixed);
        assert_eq!(cfg.size, "6rem");
        assert!(EdgeBlurConfig::from_json(r#"{"position":"middle"}"#).is_err());
    }
}
