//! Accent color handling shared by the browser and terminal renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An opaque RGB color. Alpha is supplied per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RgbRepr", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// The site accent, an orange used for particles and highlight pulses.
    pub const ACCENT: Rgb = Rgb::new(249, 115, 22);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a CSS `rgba()` value with the given alpha.
    pub fn to_css(self, alpha: f64) -> String {
        let alpha = alpha.clamp(0.0, 1.0);
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Blend toward black by `factor` (0.0-1.0), for targets without an alpha channel.
    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Rotate the hue by `degrees`, keeping saturation and lightness.
    pub fn rotate_hue(self, degrees: f32) -> Self {
        let (h, s, l) = rgb_to_hsl(self);
        hsl_to_rgb((h + degrees).rem_euclid(360.0), s, l)
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, ConfigError> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || ConfigError::invalid("color", format!("`{value}` is not #rrggbb"));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::ACCENT
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Accepted spellings of a color in config files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Hex(String),
    Channels([u8; 3]),
}

impl TryFrom<RgbRepr> for Rgb {
    type Error = ConfigError;

    fn try_from(repr: RgbRepr) -> Result<Self, Self::Error> {
        match repr {
            RgbRepr::Hex(hex) => Rgb::from_hex(&hex),
            RgbRepr::Channels([r, g, b]) => Ok(Rgb::new(r, g, b)),
        }
    }
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Convert RGB to (hue in degrees, saturation, lightness).
pub fn rgb_to_hsl(color: Rgb) -> (f32, f32, f32) {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
