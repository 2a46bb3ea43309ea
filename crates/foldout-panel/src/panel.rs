//! The panel controller.
//!
//! A [`Panel`] owns the groups, the style and the highlighted action, shares
//! the four options bags with the host, and turns all of it into a
//! [`RenderedPanel`] through the host's [`ActionRenderer`].
//!
//! Every mutation ends with a rebuild request. Requests are dropped while
//! auto-rebuild is disabled, which is how bulk changes are batched: disable,
//! mutate, re-enable, and exactly one rebuild runs.
//!
//! No lock is held while a renderer, listener, action, comparator or toolbar
//! dialog runs, so any of them may call back into the panel.

use parking_lot::{Mutex, RwLock};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

use foldout_core::{
    names_eq, same_action, ActionComparator, ActionRef, BorderOptions, ColorOptions,
    ComponentKind, CoreError, CoreResult, ExpandCollapseOptions,
    ExpandListener, FontSpec, Group, Icon, ListenerId, ListenerList, Margins, MarginsListener,
    PanelConfig, PanelStyle, ToolbarOptions, Zone,
};

use crate::animation::{AnimationSettings, FrameCallback, GroupAnimation, HeightAnimation};
use crate::render::{
    ActionRenderer, Indicators, RenderContext, RenderedAction, RenderedGroup, RenderedPanel,
    RenderedToolbar,
};
use crate::scheduler::Scheduler;
use crate::toolbar::enabled_commands;

/// Orders groups by name for display.
pub type GroupComparator = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// Frame listener: `(group_name, height)` for every animation frame.
pub type FrameListener = dyn Fn(&str, f32) + Send + Sync;

const ZONES: [Zone; 3] = [Zone::Panel, Zone::Header, Zone::Actions];

/// The options bags a panel observes.
///
/// Bags are shared: clone this into several panels and one setter call
/// rebuilds all of them.
#[derive(Debug, Clone, Default)]
pub struct PanelOptions {
    pub colors: Arc<ColorOptions>,
    pub border: Arc<BorderOptions>,
    pub expand_collapse: Arc<ExpandCollapseOptions>,
    pub toolbar: Arc<ToolbarOptions>,
}

impl PanelOptions {
    /// Fresh bags seeded from a config.
    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            colors: Arc::new(ColorOptions::from_values(config.colors.clone())),
            border: Arc::new(BorderOptions::from_values(config.border.clone())),
            expand_collapse: Arc::new(ExpandCollapseOptions::from_values(
                config.expand_collapse.clone(),
            )),
            toolbar: Arc::new(ToolbarOptions::from_values(config.toolbar.clone())),
        }
    }
}

// =============================================================================
// State
// =============================================================================

struct PanelState {
    /// Insertion order; display order comes from `group_comparator`.
    groups: Vec<Group>,
    group_comparator: Option<GroupComparator>,
    style: PanelStyle,
    highlighted: Option<ActionRef>,
    auto_rebuild: bool,
}

impl PanelState {
    fn position(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.is_named(name))
    }

    fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.is_named(name))
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.is_named(name))
    }

}

/// Stable sort into display order. Call with no lock held.
fn sort_for_display<T>(
    items: &mut [T],
    comparator: Option<&GroupComparator>,
    name: impl Fn(&T) -> &str,
) {
    if let Some(cmp) = comparator {
        items.sort_by(|a, b| cmp(name(a), name(b)));
    }
}

/// What a rebuild renders for one group.
struct GroupSnapshot {
    name: String,
    icon: Option<Icon>,
    expanded: bool,
    actions: Vec<ActionRef>,
}

struct PanelInner<R: ActionRenderer> {
    renderer: R,
    scheduler: Arc<dyn Scheduler>,
    options: PanelOptions,
    /// Our listeners on the four bags, in field order.
    subscriptions: [ListenerId; 4],
    state: RwLock<PanelState>,
    rendered: RwLock<Option<Arc<RenderedPanel<R::Widget>>>>,
    generation: AtomicU64,
    expand_listeners: ListenerList<ExpandListener>,
    margins_listeners: ListenerList<MarginsListener>,
    frame_listeners: ListenerList<FrameListener>,
    /// Serializes installs so generations only move forward.
    install: Mutex<()>,
}

impl<R: ActionRenderer> PanelInner<R> {
    fn request_rebuild(self: &Arc<Self>) {
        if !self.state.read().auto_rebuild {
            tracing::trace!("Rebuild request dropped (auto-rebuild disabled)");
            return;
        }
        self.rebuild();
    }

    fn rebuild(self: &Arc<Self>) {
        let generation = self.generation.fetch_add(1, AtomicOrdering::SeqCst) + 1;

        let (mut snapshots, comparator, style, highlighted) = {
            let state = self.state.read();
            let snapshots: Vec<GroupSnapshot> = state
                .groups
                .iter()
                .map(|group| GroupSnapshot {
                    name: group.name().to_string(),
                    icon: group.icon().cloned(),
                    expanded: group.is_expanded(),
                    actions: group.actions(),
                })
                .collect();
            (
                snapshots,
                state.group_comparator.clone(),
                state.style.clone(),
                state.highlighted.clone(),
            )
        };
        sort_for_display(&mut snapshots, comparator.as_ref(), |g| g.name.as_str());
        let colors = self.options.colors.snapshot();
        let border = self.options.border.snapshot();
        let expand = self.options.expand_collapse.snapshot();
        let toolbar = self.options.toolbar.snapshot();

        let settings = AnimationSettings::from_config(&expand).unwrap_or_else(|e| {
            tracing::warn!("Invalid expand/collapse options ({}); using defaults", e);
            AnimationSettings::default()
        });
        let weak: Weak<Self> = Arc::downgrade(self);
        let on_frame: FrameCallback = Arc::new(move |group: &str, height: f32| {
            if let Some(inner) = weak.upgrade() {
                inner.emit_frame(group, height);
            }
        });

        let mut groups = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            let name = snapshot.name.clone();
            let actions: Vec<RenderedAction<R::Widget>> = snapshot
                .actions
                .into_iter()
                .map(|action| {
                    let is_highlighted = highlighted
                        .as_ref()
                        .is_some_and(|h| same_action(h, &action));
                    let ctx = RenderContext {
                        style: &style,
                        colors: &colors,
                        border: &border,
                        group: &name,
                        highlighted: is_highlighted,
                    };
                    let widget = self.renderer.render(&action, &ctx);
                    let height = self.renderer.preferred_height(&widget, &style);
                    RenderedAction {
                        action,
                        widget,
                        highlighted: is_highlighted,
                        height,
                    }
                })
                .collect();

            let content_height = style.content_height(actions.iter().map(|a| a.height));
            let animation = GroupAnimation::new(
                name.clone(),
                HeightAnimation::new(snapshot.expanded, content_height, settings),
                self.scheduler.clone(),
                Some(on_frame.clone()),
            );
            groups.push(RenderedGroup {
                indicators: expand.show_indicator.then(|| Indicators {
                    expanded: expand.expanded_icon.clone(),
                    collapsed: expand.collapsed_icon.clone(),
                }),
                name,
                icon: snapshot.icon,
                header_height: style.header_height(),
                content_height,
                actions,
                animation,
            });
        }

        let rendered = Arc::new(RenderedPanel {
            generation,
            style,
            colors,
            border,
            toolbar: toolbar.visible.then(|| RenderedToolbar {
                position: toolbar.position,
                commands: enabled_commands(&toolbar),
            }),
            groups,
        });
        let group_count = rendered.groups.len();
        let widget_count = rendered.widget_count();

        let replaced = {
            let _install = self.install.lock();
            let mut slot = self.rendered.write();
            if slot
                .as_ref()
                .is_some_and(|current| current.generation > generation)
            {
                // A rebuild triggered from inside ours already installed newer output
                tracing::trace!("Discarding stale rebuild {}", generation);
                return;
            }
            slot.replace(rendered)
        };
        if let Some(old) = replaced {
            for group in &old.groups {
                group.animation.cancel();
            }
        }

        tracing::debug!(
            "Rebuilt panel: generation {}, {} groups, {} actions",
            generation,
            group_count,
            widget_count
        );
    }

    fn emit_frame(&self, group: &str, height: f32) {
        for listener in self.frame_listeners.snapshot() {
            listener(group, height);
        }
    }

    fn rendered_animation(&self, name: &str) -> Option<GroupAnimation> {
        let rendered = self.rendered.read().clone()?;
        rendered.group(name).map(|g| g.animation.clone())
    }
}

impl<R: ActionRenderer> Drop for PanelInner<R> {
    fn drop(&mut self) {
        let [colors, border, expand, toolbar] = self.subscriptions;
        self.options.colors.remove_listener(colors);
        self.options.border.remove_listener(border);
        self.options.expand_collapse.remove_listener(expand);
        self.options.toolbar.remove_listener(toolbar);

        if let Some(rendered) = self.rendered.get_mut().take() {
            for group in &rendered.groups {
                group.animation.cancel();
            }
        }
    }
}

fn subscribe<R: ActionRenderer>(
    options: &PanelOptions,
    weak: &Weak<PanelInner<R>>,
) -> [ListenerId; 4] {
    let hook = |weak: Weak<PanelInner<R>>| {
        move || {
            if let Some(inner) = weak.upgrade() {
                inner.request_rebuild();
            }
        }
    };
    [
        options.colors.add_listener(hook(weak.clone())),
        options.border.add_listener(hook(weak.clone())),
        options.expand_collapse.add_listener(hook(weak.clone())),
        options.toolbar.add_listener(hook(weak.clone())),
    ]
}

fn validate_group_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::BlankGroupName);
    }
    Ok(())
}

// =============================================================================
// Panel
// =============================================================================

/// A panel of named, collapsible action groups.
///
/// Cheap to clone; clones share the same panel.
pub struct Panel<R: ActionRenderer> {
    inner: Arc<PanelInner<R>>,
}

impl<R: ActionRenderer> Clone for Panel<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: ActionRenderer> Panel<R> {
    /// Create an empty panel with default options and style.
    pub fn new(renderer: R, scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_options(renderer, scheduler, PanelOptions::default())
    }

    /// Create an empty panel observing the given (possibly shared) bags.
    pub fn with_options(renderer: R, scheduler: Arc<dyn Scheduler>, options: PanelOptions) -> Self {
        Self::build(renderer, scheduler, options, PanelStyle::default())
    }

    /// Create an empty panel from a config.
    pub fn from_config(
        renderer: R,
        scheduler: Arc<dyn Scheduler>,
        config: &PanelConfig,
    ) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self::build(
            renderer,
            scheduler,
            PanelOptions::from_config(config),
            config.style.clone(),
        ))
    }

    fn build(
        renderer: R,
        scheduler: Arc<dyn Scheduler>,
        options: PanelOptions,
        style: PanelStyle,
    ) -> Self {
        let inner = Arc::new_cyclic(|weak| PanelInner {
            subscriptions: subscribe(&options, weak),
            renderer,
            scheduler,
            options,
            state: RwLock::new(PanelState {
                groups: Vec::new(),
                group_comparator: None,
                style,
                highlighted: None,
                auto_rebuild: true,
            }),
            rendered: RwLock::new(None),
            generation: AtomicU64::new(0),
            expand_listeners: ListenerList::new(),
            margins_listeners: ListenerList::new(),
            frame_listeners: ListenerList::new(),
            install: Mutex::new(()),
        });
        let panel = Self { inner };
        panel.request_rebuild();
        panel
    }

    // -------------------------------------------------------------------------
    // Groups and actions
    // -------------------------------------------------------------------------

    /// Add an empty group. Returns `false` if one with that name exists.
    pub fn add_group(&self, name: &str) -> CoreResult<bool> {
        validate_group_name(name)?;
        {
            let mut state = self.inner.state.write();
            if state.position(name).is_some() {
                return Ok(false);
            }
            state.groups.push(Group::new(name)?);
        }
        tracing::debug!("Added group '{}'", name);
        self.request_rebuild();
        Ok(true)
    }

    /// Append an action to a group, creating the group if needed.
    pub fn add_action(&self, group: &str, action: ActionRef) -> CoreResult<()> {
        self.add_actions(group, vec![action])
    }

    /// Append several actions to a group with a single rebuild.
    pub fn add_actions<I>(&self, group: &str, actions: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = ActionRef>,
    {
        validate_group_name(group)?;
        let existing = self.inner.state.read().group(group).cloned();
        match existing {
            Some(mut copy) => {
                copy.add_all(actions);
                self.commit_group(copy);
            }
            None => {
                let mut created = Group::new(group)?;
                created.add_all(actions);
                tracing::debug!("Created group '{}'", group);
                self.inner.state.write().groups.push(created);
            }
        }
        self.request_rebuild();
        Ok(())
    }

    /// Remove every occurrence of `action` from a group.
    pub fn remove_action(&self, group: &str, action: &ActionRef) -> bool {
        self.edit_group(group, |g| g.remove(action))
    }

    /// Remove actions by name from a group.
    pub fn remove_action_named(&self, group: &str, name: &str, case_sensitive: bool) -> bool {
        self.edit_group(group, |g| g.remove_by_name(name, case_sensitive))
    }

    /// Remove all actions from a group, keeping the group.
    pub fn clear_group(&self, group: &str) -> bool {
        self.edit_group(group, Group::clear)
    }

    /// Apply a permutation of display indices to a group's actions.
    pub fn reorder_group_actions(&self, group: &str, order: &[usize]) -> bool {
        self.edit_group(group, |g| g.reorder(order))
    }

    /// Set or clear a group's action comparator.
    pub fn set_group_action_comparator(
        &self,
        group: &str,
        comparator: Option<ActionComparator>,
    ) -> bool {
        self.edit_group(group, |g| {
            g.set_comparator(comparator);
            true
        })
    }

    pub fn set_group_icon(&self, group: &str, icon: Option<Icon>) -> bool {
        self.edit_group(group, |g| {
            g.set_icon(icon);
            true
        })
    }

    /// Remove a group and its actions.
    pub fn remove_group(&self, name: &str) -> bool {
        let removed = {
            let mut state = self.inner.state.write();
            match state.position(name) {
                Some(index) => {
                    state.groups.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            tracing::debug!("Removed group '{}'", name);
            self.request_rebuild();
        }
        removed
    }

    /// Rename a group.
    ///
    /// Returns `Ok(false)` if `old_name` is unknown or `new_name` is taken by
    /// another group. Changing only the case of a group's own name is allowed.
    pub fn rename_group(&self, old_name: &str, new_name: &str) -> CoreResult<bool> {
        validate_group_name(new_name)?;
        {
            let mut state = self.inner.state.write();
            let Some(index) = state.position(old_name) else {
                tracing::warn!("Cannot rename unknown group '{}'", old_name);
                return Ok(false);
            };
            let taken = state
                .groups
                .iter()
                .enumerate()
                .any(|(i, g)| i != index && g.is_named(new_name));
            if taken {
                tracing::warn!(
                    "Cannot rename group '{}' to '{}': name already in use",
                    old_name,
                    new_name
                );
                return Ok(false);
            }
            state.groups[index].rename(new_name)?;
        }
        tracing::debug!("Renamed group '{}' to '{}'", old_name, new_name);
        self.request_rebuild();
        Ok(true)
    }

    /// Move a group to `index` in insertion order (clamped to the end).
    ///
    /// Only visible when no group comparator is set.
    pub fn move_group(&self, name: &str, index: usize) -> bool {
        let moved = {
            let mut state = self.inner.state.write();
            match state.position(name) {
                Some(from) => {
                    let group = state.groups.remove(from);
                    let to = index.min(state.groups.len());
                    state.groups.insert(to, group);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.request_rebuild();
        }
        moved
    }

    /// Set or clear the comparator ordering groups for display.
    pub fn set_group_comparator(&self, comparator: Option<GroupComparator>) {
        self.inner.state.write().group_comparator = comparator;
        self.request_rebuild();
    }

    /// Drop groups without actions. Returns how many were removed.
    pub fn prune_empty_groups(&self) -> usize {
        let removed = {
            let mut state = self.inner.state.write();
            let before = state.groups.len();
            state.groups.retain(|g| !g.is_empty());
            before - state.groups.len()
        };
        if removed > 0 {
            tracing::debug!("Pruned {} empty groups", removed);
            self.request_rebuild();
        }
        removed
    }

    /// Remove all groups and the highlight.
    pub fn clear(&self) {
        {
            let mut state = self.inner.state.write();
            state.groups.clear();
            state.highlighted = None;
        }
        self.request_rebuild();
    }

    /// Edit a copy of the group with no lock held, then commit it.
    /// Action comparators run inside `edit`.
    fn edit_group(&self, group: &str, edit: impl FnOnce(&mut Group) -> bool) -> bool {
        let Some(mut copy) = self.inner.state.read().group(group).cloned() else {
            return false;
        };
        let changed = edit(&mut copy) && self.commit_group(copy);
        if changed {
            self.request_rebuild();
        }
        changed
    }

    /// Replace the stored group of the same name. Returns `false` if it was
    /// removed in the meantime.
    fn commit_group(&self, group: Group) -> bool {
        let mut state = self.inner.state.write();
        match state.group_mut(group.name()) {
            Some(slot) => {
                *slot = group;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Expand / collapse
    // -------------------------------------------------------------------------

    /// Interactive toggle, as from a header click.
    ///
    /// Returns `false` if the group is unknown or groups are not collapsible.
    /// The durable state flips immediately and expand listeners fire; the
    /// rendered group then animates toward it.
    pub fn toggle_group(&self, name: &str) -> bool {
        if !self.inner.options.expand_collapse.is_collapsible() {
            tracing::debug!("Ignoring toggle of '{}': groups are not collapsible", name);
            return false;
        }
        let (group_name, expanded, auto_rebuild) = {
            let mut state = self.inner.state.write();
            let auto_rebuild = state.auto_rebuild;
            let Some(group) = state.group_mut(name) else {
                return false;
            };
            let expanded = !group.is_expanded();
            group.set_expanded(expanded);
            (group.name().to_string(), expanded, auto_rebuild)
        };

        self.inner.expand_listeners.notify(&group_name, expanded);

        if auto_rebuild {
            match self.inner.rendered_animation(&group_name) {
                Some(animation) if expanded => animation.expand(),
                Some(animation) => animation.collapse(),
                None => self.request_rebuild(),
            }
        }
        true
    }

    /// Programmatic expand/collapse: no animation.
    ///
    /// Returns `false` if the group is unknown.
    pub fn set_group_expanded(&self, name: &str, expanded: bool) -> bool {
        let changed = {
            let mut state = self.inner.state.write();
            let Some(group) = state.group_mut(name) else {
                return false;
            };
            if group.is_expanded() == expanded {
                None
            } else {
                group.set_expanded(expanded);
                Some(group.name().to_string())
            }
        };
        if let Some(group_name) = changed {
            self.inner.expand_listeners.notify(&group_name, expanded);
            self.request_rebuild();
        }
        true
    }

    pub fn expand_all(&self) {
        self.set_all_expanded(true);
    }

    pub fn collapse_all(&self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&self, expanded: bool) {
        let changed: Vec<String> = {
            let mut state = self.inner.state.write();
            state
                .groups
                .iter_mut()
                .filter(|g| g.is_expanded() != expanded)
                .map(|g| {
                    g.set_expanded(expanded);
                    g.name().to_string()
                })
                .collect()
        };
        if changed.is_empty() {
            return;
        }
        for name in &changed {
            self.inner.expand_listeners.notify(name, expanded);
        }
        self.request_rebuild();
    }

    // -------------------------------------------------------------------------
    // Highlight and invocation
    // -------------------------------------------------------------------------

    pub fn set_highlighted_action(&self, action: Option<ActionRef>) {
        self.inner.state.write().highlighted = action;
        self.request_rebuild();
    }

    pub fn highlighted_action(&self) -> Option<ActionRef> {
        self.inner.state.read().highlighted.clone()
    }

    /// Highlight and invoke the action at `index` (display order) in a group,
    /// as from a click. Returns `false` if there is no such action.
    pub fn invoke_action(&self, group: &str, index: usize) -> bool {
        let action = self
            .inner
            .state
            .read()
            .group(group)
            .and_then(|g| g.action_at(index));
        let Some(action) = action else {
            return false;
        };
        self.set_highlighted_action(Some(action.clone()));
        tracing::debug!("Invoking '{}' in group '{}'", action.name(), group);
        action.invoke();
        true
    }

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    pub fn style(&self) -> PanelStyle {
        self.inner.state.read().style.clone()
    }

    /// Replace the whole style.
    pub fn set_style(&self, style: PanelStyle) -> CoreResult<()> {
        self.update_style(|s| *s = style)
    }

    pub fn set_component_kind(&self, kind: ComponentKind) -> CoreResult<()> {
        self.update_style(|s| s.component_kind = kind)
    }

    pub fn set_header_font(&self, font: FontSpec) -> CoreResult<()> {
        self.update_style(|s| s.header_font = font)
    }

    pub fn set_action_font(&self, font: FontSpec) -> CoreResult<()> {
        self.update_style(|s| s.action_font = font)
    }

    pub fn set_header_icon_size(&self, size: u32) -> CoreResult<()> {
        self.update_style(|s| s.header_icon_size = size)
    }

    pub fn set_action_icon_size(&self, size: u32) -> CoreResult<()> {
        self.update_style(|s| s.action_icon_size = size)
    }

    pub fn set_spacing(&self, zone: Zone, spacing: f32) -> CoreResult<()> {
        self.update_style(|s| *s.spacing.get_mut(zone) = spacing)
    }

    pub fn margins(&self, zone: Zone) -> Margins {
        *self.inner.state.read().style.margins.get(zone)
    }

    /// Set one zone's margins. Margins listeners fire if they changed.
    pub fn set_margins(&self, zone: Zone, margins: Margins) -> CoreResult<()> {
        self.update_style(|s| *s.margins.get_mut(zone) = margins)
    }

    /// Validate a modified copy of the style, commit it, rebuild, then report
    /// margin changes.
    fn update_style(&self, change: impl FnOnce(&mut PanelStyle)) -> CoreResult<()> {
        let changed_margins: Vec<Margins> = {
            let mut state = self.inner.state.write();
            let mut next = state.style.clone();
            change(&mut next);
            next.validate()?;
            let changed = ZONES
                .iter()
                .filter(|&&zone| next.margins.get(zone) != state.style.margins.get(zone))
                .map(|&zone| *next.margins.get(zone))
                .collect();
            state.style = next;
            changed
        };
        self.request_rebuild();
        for margins in &changed_margins {
            self.inner.margins_listeners.notify(margins);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Options and rebuilds
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &PanelOptions {
        &self.inner.options
    }

    pub fn colors(&self) -> Arc<ColorOptions> {
        self.inner.options.colors.clone()
    }

    pub fn border(&self) -> Arc<BorderOptions> {
        self.inner.options.border.clone()
    }

    pub fn expand_collapse(&self) -> Arc<ExpandCollapseOptions> {
        self.inner.options.expand_collapse.clone()
    }

    pub fn toolbar(&self) -> Arc<ToolbarOptions> {
        self.inner.options.toolbar.clone()
    }

    pub fn scheduler(&self) -> Arc<dyn Scheduler> {
        self.inner.scheduler.clone()
    }

    pub fn is_auto_rebuild_enabled(&self) -> bool {
        self.inner.state.read().auto_rebuild
    }

    /// Enable or disable automatic rebuilds. Re-enabling rebuilds once.
    pub fn set_auto_rebuild_enabled(&self, enabled: bool) {
        let was = std::mem::replace(&mut self.inner.state.write().auto_rebuild, enabled);
        if enabled && !was {
            self.request_rebuild();
        }
    }

    /// Rebuild now, unless auto-rebuild is disabled.
    pub fn request_rebuild(&self) {
        self.inner.request_rebuild();
    }

    /// Apply a whole config (style and all four bags) with one rebuild.
    ///
    /// The bags are shared, so other panels observing them rebuild as well.
    pub fn apply_config(&self, config: &PanelConfig) -> CoreResult<()> {
        config.validate()?;
        let was_enabled = self.is_auto_rebuild_enabled();
        self.set_auto_rebuild_enabled(false);

        let options = &self.inner.options;
        let result = options
            .colors
            .apply(config.colors.clone())
            .and_then(|_| options.border.apply(config.border.clone()))
            .and_then(|_| options.expand_collapse.apply(config.expand_collapse.clone()))
            .and_then(|_| options.toolbar.apply(config.toolbar.clone()))
            .and_then(|_| self.set_style(config.style.clone()));

        self.set_auto_rebuild_enabled(was_enabled);
        result
    }

    /// The latest rendered output.
    pub fn rendered(&self) -> Option<Arc<RenderedPanel<R::Widget>>> {
        self.inner.rendered.read().clone()
    }

    /// Number of rebuilds run so far.
    pub fn rebuild_count(&self) -> u64 {
        self.inner.generation.load(AtomicOrdering::SeqCst)
    }

    /// Animation handle of a group in the current render.
    pub fn group_animation(&self, name: &str) -> Option<GroupAnimation> {
        self.inner.rendered_animation(name)
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    pub fn add_expand_listener(
        &self,
        listener: impl Fn(&str, bool) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner.expand_listeners.add(Arc::new(listener))
    }

    pub fn remove_expand_listener(&self, id: ListenerId) -> bool {
        self.inner.expand_listeners.remove(id)
    }

    pub fn add_margins_listener(
        &self,
        listener: impl Fn(&Margins) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner.margins_listeners.add(Arc::new(listener))
    }

    pub fn remove_margins_listener(&self, id: ListenerId) -> bool {
        self.inner.margins_listeners.remove(id)
    }

    /// Observe animation frames of the current render.
    pub fn add_frame_listener(
        &self,
        listener: impl Fn(&str, f32) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner.frame_listeners.add(Arc::new(listener))
    }

    pub fn remove_frame_listener(&self, id: ListenerId) -> bool {
        self.inner.frame_listeners.remove(id)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Group names in display order.
    pub fn group_names(&self) -> Vec<String> {
        let (mut names, comparator) = {
            let state = self.inner.state.read();
            let names: Vec<String> = state.groups.iter().map(|g| g.name().to_string()).collect();
            (names, state.group_comparator.clone())
        };
        sort_for_display(&mut names, comparator.as_ref(), |n| n.as_str());
        names
    }

    pub fn group_count(&self) -> usize {
        self.inner.state.read().groups.len()
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.inner.state.read().position(name).is_some()
    }

    /// Position of a group in display order.
    pub fn group_display_index(&self, name: &str) -> Option<usize> {
        self.group_names().iter().position(|n| names_eq(n, name))
    }

    /// A group's actions in display order.
    pub fn group_actions(&self, name: &str) -> Option<Vec<ActionRef>> {
        self.inner.state.read().group(name).map(Group::actions)
    }

    pub fn has_action(&self, group: &str, action: &ActionRef) -> bool {
        self.inner
            .state
            .read()
            .group(group)
            .is_some_and(|g| g.has_action(action))
    }

    pub fn is_group_expanded(&self, name: &str) -> Option<bool> {
        self.inner.state.read().group(name).map(Group::is_expanded)
    }

    pub fn group_icon(&self, name: &str) -> Option<Icon> {
        self.inner
            .state
            .read()
            .group(name)
            .and_then(|g| g.icon().cloned())
    }
}

impl<R: ActionRenderer> fmt::Debug for Panel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("groups", &self.group_names())
            .field("rebuilds", &self.rebuild_count())
            .field("auto_rebuild", &self.is_auto_rebuild_enabled())
            .finish()
    }
}
