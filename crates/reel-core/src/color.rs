//! Hex colour parsing and the bounded palette fed to the shader.

use crate::constants::MAX_COLORS;
use glam::Vec3;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 3 or 6 hex digits, got {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into linear 0..1 floats.
pub fn parse_hex(hex: &str) -> Result<Vec3, ColorParseError> {
    let h = hex.trim().trim_start_matches('#');
    let digit = |c: char| {
        c.to_digit(16)
            .ok_or_else(|| ColorParseError::InvalidDigit(hex.to_string()))
    };
    let channels: [u32; 3] = match h.chars().count() {
        3 => {
            let mut out = [0u32; 3];
            for (i, c) in h.chars().enumerate() {
                let d = digit(c)?;
                out[i] = d * 16 + d;
            }
            out
        }
        6 => {
            let cs: Vec<char> = h.chars().collect();
            let mut out = [0u32; 3];
            for i in 0..3 {
                out[i] = digit(cs[i * 2])? * 16 + digit(cs[i * 2 + 1])?;
            }
            out
        }
        _ => return Err(ColorParseError::InvalidLength(hex.to_string())),
    };
    Ok(Vec3::new(
        channels[0] as f32 / 255.0,
        channels[1] as f32 / 255.0,
        channels[2] as f32 / 255.0,
    ))
}

/// Up to [`MAX_COLORS`] colours; empty selects the procedural RGB field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette {
    colors: SmallVec<[Vec3; MAX_COLORS]>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from hex strings. Blank and unparsable entries are skipped,
    /// anything past the eighth colour is ignored.
    pub fn from_hex_list<S: AsRef<str>>(hexes: &[S]) -> Self {
        let mut colors = SmallVec::new();
        for hex in hexes.iter().map(AsRef::as_ref) {
            if hex.trim().is_empty() {
                continue;
            }
            if colors.len() == MAX_COLORS {
                log::warn!("[palette] ignoring colours past {}", MAX_COLORS);
                break;
            }
            match parse_hex(hex) {
                Ok(c) => colors.push(c),
                Err(e) => log::warn!("[palette] skipping colour: {}", e),
            }
        }
        Self { colors }
    }

    pub fn push(&mut self, color: Vec3) -> bool {
        if self.colors.len() >= MAX_COLORS {
            return false;
        }
        self.colors.push(color);
        true
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        let c = parse_hex("#ff5c7a").unwrap();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 92.0 / 255.0).abs() < 1e-6);
        assert!((c.z - 122.0 / 255.0).abs() < 1e-6);

        let s = parse_hex("0f8").unwrap();
        assert_eq!(s, Vec3::new(0.0, 1.0, 136.0 / 255.0));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_hex("#12345"),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            parse_hex("#zzzzzz"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn palette_caps_at_eight_and_skips_invalid() {
        let hexes = [
            "#000", "#111", "nope", "", "#222", "#333", "#444", "#555", "#666", "#777", "#888",
        ];
        let p = Palette::from_hex_list(&hexes);
        assert_eq!(p.len(), MAX_COLORS);
        assert_eq!(p.colors()[2], parse_hex("#222").unwrap());
    }

    #[test]
    fn push_refuses_ninth_colour() {
        let mut p = Palette::new();
        for _ in 0..MAX_COLORS {
            assert!(p.push(Vec3::ONE));
        }
        assert!(!p.push(Vec3::ZERO));
        assert_eq!(p.len(), MAX_COLORS);
    }
}
