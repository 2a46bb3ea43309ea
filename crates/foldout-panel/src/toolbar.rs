//! Toolbar commands.
//!
//! The toolbar offers item management for a group. The dialogs behind each
//! command belong to the host and are reached through [`ToolbarHandler`];
//! the panel only applies what the dialog returns.

use foldout_core::{names_eq, ActionRef, ToolbarConfig};

use crate::panel::Panel;
use crate::render::ActionRenderer;

/// A toolbar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarCommand {
    AddItem,
    RemoveItem,
    ReorderItems,
    RenameGroup,
}

impl ToolbarCommand {
    pub const ALL: [ToolbarCommand; 4] = [
        ToolbarCommand::AddItem,
        ToolbarCommand::RemoveItem,
        ToolbarCommand::ReorderItems,
        ToolbarCommand::RenameGroup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolbarCommand::AddItem => "Add item",
            ToolbarCommand::RemoveItem => "Remove item",
            ToolbarCommand::ReorderItems => "Reorder items",
            ToolbarCommand::RenameGroup => "Rename group",
        }
    }

    /// Check if the policy offers this command.
    pub fn is_allowed(self, config: &ToolbarConfig) -> bool {
        match self {
            ToolbarCommand::AddItem => config.allow_add_item,
            ToolbarCommand::RemoveItem => config.allow_remove_item,
            ToolbarCommand::ReorderItems => config.allow_reorder_items,
            ToolbarCommand::RenameGroup => config.allow_rename_group,
        }
    }
}

/// Commands the policy offers, in toolbar order.
pub fn enabled_commands(config: &ToolbarConfig) -> Vec<ToolbarCommand> {
    ToolbarCommand::ALL
        .into_iter()
        .filter(|cmd| cmd.is_allowed(config))
        .collect()
}

/// What happened to a toolbar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarOutcome {
    /// The change was applied to the panel.
    Applied,
    /// The dialog was dismissed.
    Cancelled,
    /// The toolbar policy does not offer this command.
    Disabled,
    /// No group with that name.
    UnknownGroup,
    /// The dialog returned something the panel could not apply.
    Rejected,
    /// The command has no implementation.
    Unimplemented,
}

/// Host-side dialogs behind the toolbar commands.
#[cfg_attr(test, mockall::automock)]
pub trait ToolbarHandler {
    /// Ask for a new action to append to `group`.
    fn create_item(&self, group: &str) -> Option<ActionRef>;

    /// Ask which item to remove. `items` are action names in display order;
    /// returns an index into them.
    fn choose_item_to_remove(&self, group: &str, items: &[String]) -> Option<usize>;

    /// Ask for a new order. Returns a permutation of indices into `items`.
    fn reorder_items(&self, group: &str, items: &[String]) -> Option<Vec<usize>>;
}

impl<R: ActionRenderer> Panel<R> {
    /// Commands currently offered by the toolbar.
    pub fn toolbar_commands(&self) -> Vec<ToolbarCommand> {
        enabled_commands(&self.toolbar().snapshot())
    }

    /// Run a toolbar command against `group`.
    pub fn run_toolbar_command(
        &self,
        command: ToolbarCommand,
        group: &str,
        handler: &dyn ToolbarHandler,
    ) -> ToolbarOutcome {
        if !command.is_allowed(&self.toolbar().snapshot()) {
            return ToolbarOutcome::Disabled;
        }
        // Dialogs see the group's own spelling
        let Some(group) = self.group_names().into_iter().find(|n| names_eq(n, group)) else {
            return ToolbarOutcome::UnknownGroup;
        };
        let group = group.as_str();
        let actions = self.group_actions(group).unwrap_or_default();
        let names: Vec<String> = actions.iter().map(|a| a.name().to_string()).collect();

        match command {
            ToolbarCommand::AddItem => match handler.create_item(group) {
                Some(action) => match self.add_action(group, action) {
                    Ok(()) => ToolbarOutcome::Applied,
                    Err(_) => ToolbarOutcome::Rejected,
                },
                None => ToolbarOutcome::Cancelled,
            },
            ToolbarCommand::RemoveItem => match handler.choose_item_to_remove(group, &names) {
                Some(index) => match actions.get(index) {
                    Some(action) if self.remove_action(group, action) => ToolbarOutcome::Applied,
                    _ => ToolbarOutcome::Rejected,
                },
                None => ToolbarOutcome::Cancelled,
            },
            ToolbarCommand::ReorderItems => match handler.reorder_items(group, &names) {
                Some(order) if self.reorder_group_actions(group, &order) => {
                    ToolbarOutcome::Applied
                }
                Some(_) => ToolbarOutcome::Rejected,
                None => ToolbarOutcome::Cancelled,
            },
            ToolbarCommand::RenameGroup => {
                // TODO: wire a rename dialog into ToolbarHandler and route the
                // result through Panel::rename_group.
                tracing::warn!("Rename group command is not implemented; ignoring");
                ToolbarOutcome::Unimplemented
            }
        }
    }
}
