//! Color parsing utilities
//!
//! Hex color parsing shared by the document model, persisted records,
//! the config file and both renderers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` / `rrggbb` / `#rgb`, falling back to `fallback`
    pub fn parse_or(hex: &str, fallback: Color) -> Color {
        hex.parse().unwrap_or(fallback)
    }

    /// RGBA bytes with the given alpha
    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s.trim())
            .map(|(r, g, b)| Color::rgb(r, g, b))
            .ok_or_else(|| format!("invalid color: {:?}", s))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Composite `color` at `alpha` (0.0-1.0) over a straight-alpha RGBA pixel
/// (source-over).
pub fn blend_over(dst: [u8; 4], color: Color, alpha: f32) -> [u8; 4] {
    let src_a = alpha.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |src: u8, dst: u8| -> u8 {
        let v = (src as f32 * src_a + dst as f32 * dst_a * (1.0 - src_a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}
