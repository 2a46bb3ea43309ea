//! Foldout panel controller.
//!
//! Builds on `foldout-core`:
//! - [`Panel`]: groups, style, highlight, options observation and rebuilds
//! - [`ActionRenderer`]: the host's widget factory
//! - [`GroupAnimation`]: eased expand/collapse driven by a [`Scheduler`]
//! - Toolbar commands backed by a host [`ToolbarHandler`]

pub mod animation;
mod panel;
mod render;
pub mod scheduler;
mod toolbar;

pub use animation::{
    ease_in_out_cubic, AnimationPhase, AnimationSettings, Direction, FrameCallback,
    GroupAnimation, HeightAnimation, TickOutcome,
};
pub use panel::{FrameListener, GroupComparator, Panel, PanelOptions};
pub use render::{
    ActionRenderer, Indicators, RenderContext, RenderedAction, RenderedGroup, RenderedPanel,
    RenderedToolbar,
};
pub use scheduler::{
    ManualScheduler, Scheduler, TaskControl, TimerHandle, TokioScheduler, MIN_INTERVAL,
};
pub use toolbar::{enabled_commands, ToolbarCommand, ToolbarHandler, ToolbarOutcome};

#[cfg(test)]
pub(crate) mod testing {
    use super::{ActionRenderer, RenderContext};
    use foldout_core::{ActionRef, SimpleAction};

    /// Renders each action as its name, bracketed when highlighted.
    pub struct TextRenderer;

    impl ActionRenderer for TextRenderer {
        type Widget = String;

        fn render(&self, action: &ActionRef, ctx: &RenderContext<'_>) -> String {
            if ctx.highlighted {
                format!("[{}]", action.name())
            } else {
                action.name().to_string()
            }
        }
    }

    pub fn action(name: &str) -> ActionRef {
        SimpleAction::new(name, || {}).into_ref()
    }
}
