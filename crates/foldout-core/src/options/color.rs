//! Color options.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OptionValues, OptionsBag};
use crate::error::{CoreError, CoreResult};

/// 8-bit RGBA color, written as `#rrggbb` or `#rrggbbaa` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Colors of the panel, headers and action rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: Rgba,
    pub header_background: Rgba,
    pub header_foreground: Rgba,
    pub action_foreground: Rgba,
    pub highlight_background: Rgba,
    pub highlight_foreground: Rgba,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(0x1e, 0x1e, 0x24),
            header_background: Rgba::rgb(0x2a, 0x2a, 0x33),
            header_foreground: Rgba::rgb(0xe6, 0xe6, 0xeb),
            action_foreground: Rgba::rgb(0xc8, 0xc8, 0xd0),
            highlight_background: Rgba::rgb(0x3d, 0x6f, 0xd9),
            highlight_foreground: Rgba::rgb(0xff, 0xff, 0xff),
        }
    }
}

impl OptionValues for ColorConfig {
    const KIND: &'static str = "Color";
}

/// Listenable color options.
pub type ColorOptions = OptionsBag<ColorConfig>;

impl OptionsBag<ColorConfig> {
    pub fn background(&self) -> Rgba {
        self.read(|v| v.background)
    }

    pub fn set_background(&self, color: Rgba) {
        self.update(|v| v.background = color);
    }

    pub fn header_background(&self) -> Rgba {
        self.read(|v| v.header_background)
    }

    pub fn set_header_background(&self, color: Rgba) {
        self.update(|v| v.header_background = color);
    }

    pub fn header_foreground(&self) -> Rgba {
        self.read(|v| v.header_foreground)
    }

    pub fn set_header_foreground(&self, color: Rgba) {
        self.update(|v| v.header_foreground = color);
    }

    pub fn action_foreground(&self) -> Rgba {
        self.read(|v| v.action_foreground)
    }

    pub fn set_action_foreground(&self, color: Rgba) {
        self.update(|v| v.action_foreground = color);
    }

    pub fn highlight_background(&self) -> Rgba {
        self.read(|v| v.highlight_background)
    }

    pub fn set_highlight_background(&self, color: Rgba) {
        self.update(|v| v.highlight_background = color);
    }

    pub fn highlight_foreground(&self) -> Rgba {
        self.read(|v| v.highlight_foreground)
    }

    pub fn set_highlight_foreground(&self, color: Rgba) {
        self.update(|v| v.highlight_foreground = color);
    }
}
