//! Border options.

use serde::{Deserialize, Serialize};

use super::{OptionValues, OptionsBag, Rgba};
use crate::error::CoreResult;
use crate::style::validate_length;

/// How borders are drawn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    #[default]
    Solid,
    Dashed,
    Etched,
}

/// Border around the panel and between groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub style: BorderStyle,
    pub width: u32,
    pub color: Rgba,
    pub corner_radius: f32,
    /// Draw a separator line between groups.
    pub group_separators: bool,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            style: BorderStyle::Solid,
            width: 1,
            color: Rgba::rgb(0x3a, 0x3a, 0x44),
            corner_radius: 6.0,
            group_separators: true,
        }
    }
}

impl OptionValues for BorderConfig {
    const KIND: &'static str = "Border";

    fn validate(&self) -> CoreResult<()> {
        validate_length("corner radius", self.corner_radius)
    }
}

/// Listenable border options.
pub type BorderOptions = OptionsBag<BorderConfig>;

impl OptionsBag<BorderConfig> {
    pub fn style(&self) -> BorderStyle {
        self.read(|v| v.style)
    }

    pub fn set_style(&self, style: BorderStyle) {
        self.update(|v| v.style = style);
    }

    pub fn width(&self) -> u32 {
        self.read(|v| v.width)
    }

    pub fn set_width(&self, width: u32) {
        self.update(|v| v.width = width);
    }

    pub fn color(&self) -> Rgba {
        self.read(|v| v.color)
    }

    pub fn set_color(&self, color: Rgba) {
        self.update(|v| v.color = color);
    }

    pub fn corner_radius(&self) -> f32 {
        self.read(|v| v.corner_radius)
    }

    pub fn set_corner_radius(&self, radius: f32) -> CoreResult<()> {
        validate_length("corner radius", radius)?;
        self.update(|v| v.corner_radius = radius);
        Ok(())
    }

    pub fn group_separators(&self) -> bool {
        self.read(|v| v.group_separators)
    }

    pub fn set_group_separators(&self, enabled: bool) {
        self.update(|v| v.group_separators = enabled);
    }
}
