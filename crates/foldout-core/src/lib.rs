//! Core types for the Foldout action panel.
//!
//! This crate contains the data model shared by the panel controller:
//! - Action references and the Group repository
//! - Listener lists used by every observable piece
//! - The four options bags (color, border, expand/collapse, toolbar)
//! - Style settings and file-based configuration
//! - Error types

mod action;
mod config;
mod error;
mod group;
mod listeners;
pub mod options;
mod style;

pub use action::{same_action, Action, ActionRef, Icon, SimpleAction};
pub use config::{config_dir, config_path, PanelConfig};
pub use error::{ConfigError, CoreError, CoreResult};
pub use group::{by_name, names_eq, ActionComparator, Group};
pub use listeners::{ExpandListener, ListenerId, ListenerList, MarginsListener, OptionsListener};
pub use options::{
    BorderConfig, BorderOptions, BorderStyle, ColorConfig, ColorOptions, ExpandCollapseConfig,
    ExpandCollapseOptions, Rgba, ToolbarConfig, ToolbarOptions, ToolbarPosition,
};
pub use style::{ComponentKind, FontSpec, Margins, PanelStyle, Zone, ZoneValues};
