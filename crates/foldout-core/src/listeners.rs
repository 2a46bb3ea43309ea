//! Listener lists with snapshot iteration.
//!
//! Every observable piece of the panel (the options bags, margins, expand
//! state) keeps its subscribers in a [`ListenerList`]. Notification iterates
//! over a snapshot taken before the first callback runs, so a callback may add
//! or remove listeners, or trigger further notifications, without corrupting
//! the iteration in progress. No lock is held while a callback runs.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::style::Margins;

/// Called with no payload when an options bag changes.
pub type OptionsListener = dyn Fn() + Send + Sync;

/// Called with `(group_name, expanded)` when a group's expand state changes.
pub type ExpandListener = dyn Fn(&str, bool) + Send + Sync;

/// Called with the new margins when a zone's margins change.
pub type MarginsListener = dyn Fn(&Margins) + Send + Sync;

/// Handle returned on subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered list of callbacks of one type.
pub struct ListenerList<F: ?Sized> {
    entries: RwLock<Vec<(ListenerId, Arc<F>)>>,
}

impl<F: ?Sized> ListenerList<F> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append a listener. Listeners are notified in registration order.
    pub fn add(&self, listener: Arc<F>) -> ListenerId {
        let id = ListenerId::next();
        self.entries.write().push((id, listener));
        id
    }

    /// Remove a listener. Returns `true` if it was registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Copy of the current listeners, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<F>> {
        self.entries
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<F: ?Sized> Default for ListenerList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for ListenerList<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.len())
            .finish()
    }
}

impl ListenerList<OptionsListener> {
    /// Invoke every listener.
    pub fn notify(&self) {
        for listener in self.snapshot() {
            listener();
        }
    }
}

impl ListenerList<ExpandListener> {
    /// Invoke every listener with the group's new state.
    pub fn notify(&self, group_name: &str, expanded: bool) {
        for listener in self.snapshot() {
            listener(group_name, expanded);
        }
    }
}

impl ListenerList<MarginsListener> {
    /// Invoke every listener with the new margins.
    pub fn notify(&self, margins: &Margins) {
        for listener in self.snapshot() {
            listener(margins);
        }
    }
}
