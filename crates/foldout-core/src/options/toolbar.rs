//! Toolbar policy options.

use serde::{Deserialize, Serialize};

use super::{OptionValues, OptionsBag};

/// Where the toolbar sits relative to the groups.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarPosition {
    #[default]
    Top,
    Bottom,
}

/// Which toolbar commands are offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub visible: bool,
    pub position: ToolbarPosition,
    pub allow_add_item: bool,
    pub allow_remove_item: bool,
    pub allow_reorder_items: bool,
    pub allow_rename_group: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            visible: false,
            position: ToolbarPosition::Top,
            allow_add_item: true,
            allow_remove_item: true,
            allow_reorder_items: true,
            allow_rename_group: true,
        }
    }
}

impl OptionValues for ToolbarConfig {
    const KIND: &'static str = "Toolbar";
}

/// Listenable toolbar options.
pub type ToolbarOptions = OptionsBag<ToolbarConfig>;

impl OptionsBag<ToolbarConfig> {
    pub fn is_visible(&self) -> bool {
        self.read(|v| v.visible)
    }

    pub fn set_visible(&self, visible: bool) {
        self.update(|v| v.visible = visible);
    }

    pub fn position(&self) -> ToolbarPosition {
        self.read(|v| v.position)
    }

    pub fn set_position(&self, position: ToolbarPosition) {
        self.update(|v| v.position = position);
    }

    pub fn allows_add_item(&self) -> bool {
        self.read(|v| v.allow_add_item)
    }

    pub fn set_allow_add_item(&self, allow: bool) {
        self.update(|v| v.allow_add_item = allow);
    }

    pub fn allows_remove_item(&self) -> bool {
        self.read(|v| v.allow_remove_item)
    }

    pub fn set_allow_remove_item(&self, allow: bool) {
        self.update(|v| v.allow_remove_item = allow);
    }

    pub fn allows_reorder_items(&self) -> bool {
        self.read(|v| v.allow_reorder_items)
    }

    pub fn set_allow_reorder_items(&self, allow: bool) {
        self.update(|v| v.allow_reorder_items = allow);
    }

    pub fn allows_rename_group(&self) -> bool {
        self.read(|v| v.allow_rename_group)
    }

    pub fn set_allow_rename_group(&self, allow: bool) {
        self.update(|v| v.allow_rename_group = allow);
    }
}
