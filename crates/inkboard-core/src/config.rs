//! Board configuration.

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::style::{HexColor, PALETTE};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid stroke width range {min}..={max}")]
    StrokeRange { min: u32, max: u32 },
    #[error("Default stroke width {width} outside {min}..={max}")]
    DefaultWidth { width: u32, min: u32, max: u32 },
    #[error("Eraser width factor must be at least 1")]
    EraserFactor,
}

/// Defaults and limits for a whiteboard session.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Title of a new board.
    pub default_title: String,
    /// Tool selected on a new board.
    pub default_tool: ToolKind,
    /// Color selected on a new board.
    pub default_color: HexColor,
    /// Stroke width selected on a new board.
    pub default_stroke_width: u32,
    /// Smallest selectable stroke width.
    pub min_stroke_width: u32,
    /// Largest selectable stroke width.
    pub max_stroke_width: u32,
    /// Swatches the host shows in its color picker. Not enforced by the
    /// controller.
    pub palette: Vec<HexColor>,
    /// How much wider the eraser is than the selected width.
    pub eraser_width_factor: u32,
    /// Undo depth (0 = no history).
    pub history_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_title: "Untitled Whiteboard".to_string(),
            default_tool: ToolKind::Pencil,
            default_color: HexColor::BLACK,
            default_stroke_width: 5,
            min_stroke_width: 1,
            max_stroke_width: 20,
            palette: PALETTE.to_vec(),
            eraser_width_factor: 2,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the limits are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_stroke_width, self.max_stroke_width);
        if min == 0 || min > max {
            return Err(ConfigError::StrokeRange { min, max });
        }
        if !(min..=max).contains(&self.default_stroke_width) {
            return Err(ConfigError::DefaultWidth {
                width: self.default_stroke_width,
                min,
                max,
            });
        }
        if self.eraser_width_factor == 0 {
            return Err(ConfigError::EraserFactor);
        }
        Ok(())
    }

    /// Clamp a requested stroke width into the selectable range.
    pub fn clamp_stroke_width(&self, width: u32) -> u32 {
        let max = self.max_stroke_width.max(1);
        let min = self.min_stroke_width.clamp(1, max);
        width.clamp(min, max)
    }
}
