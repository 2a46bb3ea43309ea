//! File-based configuration.
//!
//! A `panel.toml` holds the style settings and the initial contents of the
//! four options bags. Every section and field is optional; missing values
//! fall back to the defaults.
//!
//! ```toml
//! [style]
//! component_kind = "button"
//! action_icon_size = 20
//!
//! [colors]
//! highlight_background = "#3d6fd9"
//!
//! [expand_collapse]
//! duration_ms = 250
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, CoreResult};
use crate::options::{
    BorderConfig, ColorConfig, ExpandCollapseConfig, OptionValues, ToolbarConfig,
};
use crate::style::PanelStyle;

/// Everything a panel can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub style: PanelStyle,
    pub colors: ColorConfig,
    pub border: BorderConfig,
    pub expand_collapse: ExpandCollapseConfig,
    pub toolbar: ToolbarConfig,
}

impl PanelConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded panel config from {}", path.display());
        Ok(config)
    }

    /// Load the user's `panel.toml` if it exists.
    ///
    /// Returns `Ok(None)` when there is no file, so callers can fall back to
    /// defaults.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            tracing::debug!("No panel config at {}", path.display());
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every section.
    pub fn validate(&self) -> CoreResult<()> {
        self.style.validate()?;
        self.colors.validate()?;
        self.border.validate()?;
        self.expand_collapse.validate()?;
        self.toolbar.validate()?;
        Ok(())
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("foldout"))
}

/// Get the path to panel.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("panel.toml"))
}
