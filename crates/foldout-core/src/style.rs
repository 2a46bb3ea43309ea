//! Global style and layout settings of a panel.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// What kind of widget the renderer should produce for each action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Flat, label-like rows.
    #[default]
    Label,
    /// Raised, button-like rows.
    Button,
}

impl ComponentKind {
    /// Extra vertical padding a row of this kind takes.
    pub fn row_padding(self) -> f32 {
        match self {
            ComponentKind::Label => 0.0,
            ComponentKind::Button => 6.0,
        }
    }
}

/// Font selection for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            family: family.into(),
            size,
            bold,
        }
    }

    fn validate(&self, zone: &'static str) -> CoreResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(CoreError::NonPositiveFontSize {
                zone,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Inter", 13.0, false)
    }
}

/// Insets around a zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Margins {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of top and bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn validate(&self) -> CoreResult<()> {
        for value in [self.top, self.left, self.bottom, self.right] {
            validate_length("margin", value)?;
        }
        Ok(())
    }
}

/// Layout zones that carry their own spacing and margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// The panel as a whole; spacing is the gap between groups.
    Panel,
    /// Group headers; spacing is the gap between icon and title.
    Header,
    /// Action rows; spacing is the gap between rows.
    Actions,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Panel => "panel",
            Zone::Header => "header",
            Zone::Actions => "actions",
        }
    }
}

/// One value per [`Zone`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneValues<T> {
    pub panel: T,
    pub header: T,
    pub actions: T,
}

impl<T> ZoneValues<T> {
    pub fn get(&self, zone: Zone) -> &T {
        match zone {
            Zone::Panel => &self.panel,
            Zone::Header => &self.header,
            Zone::Actions => &self.actions,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Panel => &mut self.panel,
            Zone::Header => &mut self.header,
            Zone::Actions => &mut self.actions,
        }
    }
}

/// Style and layout settings shared by every group in a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub component_kind: ComponentKind,
    pub header_font: FontSpec,
    pub action_font: FontSpec,
    pub header_icon_size: u32,
    pub action_icon_size: u32,
    pub spacing: ZoneValues<f32>,
    pub margins: ZoneValues<Margins>,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            component_kind: ComponentKind::Label,
            header_font: FontSpec::new("Inter", 14.0, true),
            action_font: FontSpec::default(),
            header_icon_size: 16,
            action_icon_size: 16,
            spacing: ZoneValues {
                panel: 8.0,
                header: 6.0,
                actions: 2.0,
            },
            margins: ZoneValues {
                panel: Margins::uniform(4.0),
                header: Margins::new(4.0, 8.0, 4.0, 8.0),
                actions: Margins::new(2.0, 16.0, 2.0, 8.0),
            },
        }
    }
}

impl PanelStyle {
    /// Check every field.
    pub fn validate(&self) -> CoreResult<()> {
        self.header_font.validate("header")?;
        self.action_font.validate("actions")?;
        validate_icon_size("header", self.header_icon_size)?;
        validate_icon_size("actions", self.action_icon_size)?;
        for zone in [Zone::Panel, Zone::Header, Zone::Actions] {
            validate_length("spacing", *self.spacing.get(zone))?;
            self.margins.get(zone).validate()?;
        }
        Ok(())
    }

    /// Height of a group header.
    pub fn header_height(&self) -> f32 {
        (self.header_icon_size as f32).max(self.header_font.size) + self.margins.header.vertical()
    }

    /// Height of one action row, including the gap below it.
    pub fn action_row_height(&self) -> f32 {
        (self.action_icon_size as f32).max(self.action_font.size)
            + self.component_kind.row_padding()
            + self.spacing.actions
    }

    /// Full height of a group's action area given each row's height.
    pub fn content_height<I>(&self, row_heights: I) -> f32
    where
        I: IntoIterator<Item = f32>,
    {
        let rows: f32 = row_heights.into_iter().sum();
        if rows == 0.0 {
            return 0.0;
        }
        rows + self.margins.actions.vertical()
    }
}

pub(crate) fn validate_icon_size(zone: &'static str, size: u32) -> CoreResult<()> {
    if size == 0 {
        return Err(CoreError::NonPositiveIconSize { zone });
    }
    Ok(())
}

pub(crate) fn validate_length(what: &'static str, value: f32) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidLength { what, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_valid() {
        assert!(PanelStyle::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_icon_size() {
        let style = PanelStyle {
            action_icon_size: 0,
            ..PanelStyle::default()
        };
        assert_eq!(
            style.validate(),
            Err(CoreError::NonPositiveIconSize { zone: "actions" })
        );
    }

    #[test]
    fn test_validate_rejects_bad_font_and_margins() {
        let mut style = PanelStyle::default();
        style.header_font.size = 0.0;
        assert!(matches!(
            style.validate(),
            Err(CoreError::NonPositiveFontSize { zone: "header", .. })
        ));

        let mut style = PanelStyle::default();
        style.margins.panel.left = -1.0;
        assert!(matches!(
            style.validate(),
            Err(CoreError::InvalidLength { what: "margin", .. })
        ));

        let mut style = PanelStyle::default();
        style.spacing.actions = f32::NAN;
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_row_and_content_heights() {
        let style = PanelStyle {
            action_icon_size: 20,
            action_font: FontSpec::new("Inter", 12.0, false),
            spacing: ZoneValues {
                panel: 0.0,
                header: 0.0,
                actions: 4.0,
            },
            margins: ZoneValues {
                panel: Margins::default(),
                header: Margins::default(),
                actions: Margins::new(3.0, 0.0, 5.0, 0.0),
            },
            ..PanelStyle::default()
        };

        assert_eq!(style.action_row_height(), 24.0);
        assert_eq!(style.content_height([24.0, 24.0]), 56.0);
        assert_eq!(style.content_height(std::iter::empty()), 0.0);

        let buttons = PanelStyle {
            component_kind: ComponentKind::Button,
            ..style
        };
        assert_eq!(buttons.action_row_height(), 30.0);
    }

    #[test]
    fn test_zone_values_access() {
        let mut spacing = ZoneValues {
            panel: 1.0,
            header: 2.0,
            actions: 3.0,
        };
        *spacing.get_mut(Zone::Header) = 5.0;
        assert_eq!(*spacing.get(Zone::Header), 5.0);
        assert_eq!(*spacing.get(Zone::Actions), 3.0);
        assert_eq!(Zone::Actions.as_str(), "actions");
    }
}
