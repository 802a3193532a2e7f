//! Stroke styling: colors, widths and the toolbar palette.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Style errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An opaque RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a paint color.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for HexColor {
    type Err = StyleError;

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidHex(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        color.to_color()
    }
}

/// Swatches offered by the toolbar.
///
/// Hosts read this to build their color picker; the controller accepts any
/// [`HexColor`].
pub const PALETTE: [HexColor; 7] = [
    HexColor::new(0x00, 0x00, 0x00),
    HexColor::new(0xFF, 0x00, 0x00),
    HexColor::new(0x00, 0xFF, 0x00),
    HexColor::new(0x00, 0x00, 0xFF),
    HexColor::new(0xFF, 0xFF, 0x00),
    HexColor::new(0xFF, 0x00, 0xFF),
    HexColor::new(0x00, 0xFF, 0xFF),
];

/// Color and width read by every draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleState {
    pub color: HexColor,
    pub stroke_width: u32,
}

/// Concrete paint for one draw call, after tool substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeParams {
    pub color: HexColor,
    pub width: u32,
}

impl StrokeParams {
    /// Width as the rasterizer expects it.
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }
}
