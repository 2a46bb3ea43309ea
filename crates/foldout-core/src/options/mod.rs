//! Options bags.
//!
//! Four independent option sets tune a panel: colors, borders,
//! expand/collapse behavior, and toolbar policy. Each bag is an
//! [`OptionsBag`] over a plain config record. Every setter updates the record
//! and then synchronously notifies the bag's listeners in registration order,
//! before returning. Bags never coalesce notifications themselves.

mod border;
mod color;
mod expand;
mod toolbar;

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::listeners::{ListenerId, ListenerList, OptionsListener};

pub use border::{BorderConfig, BorderOptions, BorderStyle};
pub use color::{ColorConfig, ColorOptions, Rgba};
pub use expand::{ExpandCollapseConfig, ExpandCollapseOptions};
pub use toolbar::{ToolbarConfig, ToolbarOptions, ToolbarPosition};

/// A config record that can live inside an [`OptionsBag`].
pub trait OptionValues: Clone + Default + fmt::Debug + Send + Sync {
    /// Short name used in logs.
    const KIND: &'static str;

    /// Check the whole record.
    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// A mutable option record with its own listener list.
pub struct OptionsBag<T: OptionValues> {
    values: RwLock<T>,
    listeners: ListenerList<OptionsListener>,
}

impl<T: OptionValues> OptionsBag<T> {
    /// Create a bag holding the default record.
    pub fn new() -> Self {
        Self::from_values(T::default())
    }

    /// Create a bag holding `values`.
    ///
    /// The record is not validated; use [`OptionsBag::apply`] for untrusted
    /// input.
    pub fn from_values(values: T) -> Self {
        Self {
            values: RwLock::new(values),
            listeners: ListenerList::new(),
        }
    }

    /// Copy of the current record.
    pub fn snapshot(&self) -> T {
        self.values.read().clone()
    }

    /// Replace the whole record, notifying once.
    pub fn apply(&self, values: T) -> CoreResult<()> {
        values.validate()?;
        self.update(|current| *current = values);
        Ok(())
    }

    /// Subscribe to changes.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> ListenerId {
        self.listeners.add(Arc::new(listener))
    }

    /// Unsubscribe. Returns `true` if the listener was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Read a value out of the record.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.values.read())
    }

    /// Mutate the record, release the lock, then notify.
    pub(crate) fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut values = self.values.write();
            f(&mut values);
        }
        tracing::debug!(
            "{} options changed, notifying {} listener(s)",
            T::KIND,
            self.listeners.len()
        );
        self.listeners.notify();
    }
}

impl<T: OptionValues> Default for OptionsBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OptionValues> fmt::Debug for OptionsBag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsBag")
            .field("values", &*self.values.read())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_every_setter_notifies_synchronously() {
        let colors = ColorOptions::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        colors.add_listener(move || *counter.lock() += 1);

        let red = Rgba::rgb(255, 0, 0);
        colors.set_background(red);
        assert_eq!(*calls.lock(), 1);
        assert_eq!(colors.background(), red);

        // Setting the same value still notifies
        colors.set_background(red);
        assert_eq!(*calls.lock(), 2);
    }

    #[test]
    fn test_listener_sees_new_value() {
        let toolbar = Arc::new(ToolbarOptions::new());
        let seen = Arc::new(Mutex::new(None));

        let bag = Arc::downgrade(&toolbar);
        let sink = seen.clone();
        toolbar.add_listener(move || {
            if let Some(bag) = bag.upgrade() {
                *sink.lock() = Some(bag.is_visible());
            }
        });

        toolbar.set_visible(true);
        assert_eq!(*seen.lock(), Some(true));
    }

    #[test]
    fn test_apply_validates_before_mutating() {
        let expand = ExpandCollapseOptions::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        expand.add_listener(move || *counter.lock() += 1);

        let bad = ExpandCollapseConfig {
            duration_ms: 0,
            ..ExpandCollapseConfig::default()
        };
        assert!(expand.apply(bad).is_err());
        assert_eq!(*calls.lock(), 0);
        assert_eq!(expand.snapshot(), ExpandCollapseConfig::default());

        let good = ExpandCollapseConfig {
            duration_ms: 500,
            ..ExpandCollapseConfig::default()
        };
        expand.apply(good).unwrap();
        assert_eq!(*calls.lock(), 1);
        assert_eq!(expand.duration().as_millis(), 500);
    }

    #[test]
    fn test_bags_are_independent() {
        let border = BorderOptions::new();
        let colors = ColorOptions::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        border.add_listener(move || *counter.lock() += 1);

        colors.set_header_foreground(Rgba::rgb(1, 2, 3));
        assert_eq!(*calls.lock(), 0);

        border.set_width(3);
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn test_remove_listener() {
        let border = BorderOptions::new();
        let id = border.add_listener(|| {});
        assert_eq!(border.listener_count(), 1);
        assert!(border.remove_listener(id));
        assert_eq!(border.listener_count(), 0);
    }
}
