//! Rendering strategy seam and the rendered tree.
//!
//! The panel never builds widgets itself. On every rebuild it walks the groups
//! in display order and asks the host's [`ActionRenderer`] for one widget per
//! action. The result is an immutable [`RenderedPanel`] that replaces the
//! previous one wholesale.

use foldout_core::{
    ActionRef, BorderConfig, ColorConfig, Icon, PanelStyle, ToolbarPosition,
};

use crate::animation::GroupAnimation;
use crate::toolbar::ToolbarCommand;

/// Everything a renderer may consult while producing one widget.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub style: &'a PanelStyle,
    pub colors: &'a ColorConfig,
    pub border: &'a BorderConfig,
    /// Name of the group the action is rendered in.
    pub group: &'a str,
    /// Whether this action is the panel's highlighted action.
    pub highlighted: bool,
}

/// Host-supplied widget factory.
pub trait ActionRenderer: Send + Sync + 'static {
    type Widget: Send + Sync + 'static;

    /// Produce the widget for one action. Called once per action per
    /// rebuild.
    fn render(&self, action: &ActionRef, ctx: &RenderContext<'_>) -> Self::Widget;

    /// Height the widget occupies, used for the group's content height.
    fn preferred_height(&self, _widget: &Self::Widget, style: &PanelStyle) -> f32 {
        style.action_row_height()
    }
}

/// One rendered action row.
#[derive(Debug)]
pub struct RenderedAction<W> {
    pub action: ActionRef,
    pub widget: W,
    pub highlighted: bool,
    pub height: f32,
}

/// Expand/collapse indicator icons captured at rebuild time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    pub expanded: Option<Icon>,
    pub collapsed: Option<Icon>,
}

/// One rendered group.
#[derive(Debug)]
pub struct RenderedGroup<W> {
    pub name: String,
    pub icon: Option<Icon>,
    /// Indicator icons, if the options ask for them.
    pub indicators: Option<Indicators>,
    pub header_height: f32,
    /// Height of the action area when fully expanded.
    pub content_height: f32,
    pub actions: Vec<RenderedAction<W>>,
    pub animation: GroupAnimation,
}

impl<W> RenderedGroup<W> {
    /// Whether the group is expanded, or heading there.
    pub fn is_expanded(&self) -> bool {
        self.animation.phase().heads_expanded()
    }

    /// Indicator for the state the group is in or heading to.
    pub fn indicator(&self) -> Option<Icon> {
        let indicators = self.indicators.as_ref()?;
        if self.is_expanded() {
            indicators.expanded.clone()
        } else {
            indicators.collapsed.clone()
        }
    }

    /// Header plus the currently animated content height.
    pub fn visible_height(&self) -> f32 {
        self.header_height + self.animation.height()
    }
}

/// Toolbar as shown for this rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToolbar {
    pub position: ToolbarPosition,
    pub commands: Vec<ToolbarCommand>,
}

/// Full output of one rebuild.
#[derive(Debug)]
pub struct RenderedPanel<W> {
    /// Increases with every rebuild.
    pub generation: u64,
    pub style: PanelStyle,
    pub colors: ColorConfig,
    pub border: BorderConfig,
    pub toolbar: Option<RenderedToolbar>,
    pub groups: Vec<RenderedGroup<W>>,
}

impl<W> RenderedPanel<W> {
    /// Find a rendered group by name (case-insensitive).
    pub fn group(&self, name: &str) -> Option<&RenderedGroup<W>> {
        self.groups
            .iter()
            .find(|g| foldout_core::names_eq(&g.name, name))
    }

    /// Group names in display order.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    /// Number of rendered action widgets across all groups.
    pub fn widget_count(&self) -> usize {
        self.groups.iter().map(|g| g.actions.len()).sum()
    }

    /// Height of the whole panel at its current animation frame.
    pub fn visible_height(&self) -> f32 {
        let groups: f32 = self.groups.iter().map(|g| g.visible_height()).sum();
        let gaps = self.groups.len().saturating_sub(1) as f32 * self.style.spacing.panel;
        groups + gaps + self.style.margins.panel.vertical()
    }
}
