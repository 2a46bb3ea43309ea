//! Action references supplied by the host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Icon identifier (path, emoji, or named icon).
///
/// Loading and scaling happen in the host; the core only carries the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icon(pub String);

impl From<String> for Icon {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Icon {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Icon {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An invocable, named unit of work.
///
/// Actions are owned by the host. Groups and panels only hold references,
/// and two references are the same action only if they point at the same
/// allocation (see [`same_action`]).
pub trait Action: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Optional icon.
    fn icon(&self) -> Option<&Icon> {
        None
    }

    /// Optional tooltip text.
    fn tooltip(&self) -> Option<&str> {
        None
    }

    /// Run the action.
    fn invoke(&self);
}

impl fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name())
            .field("icon", &self.icon())
            .finish()
    }
}

/// Shared reference to a host action.
pub type ActionRef = Arc<dyn Action>;

/// Reference identity: true if both point at the same action.
pub fn same_action(a: &ActionRef, b: &ActionRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

type Handler = Box<dyn Fn() + Send + Sync>;

/// Closure-backed action for hosts that don't need their own type.
pub struct SimpleAction {
    name: String,
    icon: Option<Icon>,
    tooltip: Option<String>,
    handler: Handler,
}

impl SimpleAction {
    /// Create an action that runs `handler` when invoked.
    pub fn new(name: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            icon: None,
            tooltip: None,
            handler: Box::new(handler),
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Wrap into a shared [`ActionRef`].
    pub fn into_ref(self) -> ActionRef {
        Arc::new(self)
    }
}

impl Action for SimpleAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    fn invoke(&self) {
        (self.handler)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_simple_action_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let action = SimpleAction::new("Open", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .with_icon("folder")
        .with_tooltip("Open a file")
        .into_ref();

        action.invoke();
        action.invoke();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(action.name(), "Open");
        assert_eq!(action.icon(), Some(&Icon::from("folder")));
        assert_eq!(action.tooltip(), Some("Open a file"));
    }

    #[test]
    fn test_same_action_is_identity() {
        let a = SimpleAction::new("Copy", || {}).into_ref();
        let b = SimpleAction::new("Copy", || {}).into_ref();
        let a2 = a.clone();

        assert!(same_action(&a, &a2));
        assert!(!same_action(&a, &b));
    }

    #[test]
    fn test_debug_shows_name() {
        let action = SimpleAction::new("Paste", || {}).into_ref();
        let text = format!("{:?}", action);
        assert!(text.contains("Paste"));
    }
}
