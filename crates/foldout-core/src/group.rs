//! Named, ordered, optionally sorted collections of actions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::action::{same_action, ActionRef, Icon};
use crate::error::{CoreError, CoreResult};

/// Total order over actions used for a group's display order.
pub type ActionComparator = Arc<dyn Fn(&ActionRef, &ActionRef) -> Ordering + Send + Sync>;

/// Comparator ordering actions by name, ignoring case.
pub fn by_name() -> ActionComparator {
    Arc::new(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
}

/// Case-insensitive name equality used for every group and action lookup.
pub fn names_eq(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::BlankGroupName);
    }
    Ok(())
}

/// A named group of actions with its own expand state.
///
/// Actions are kept twice: in insertion order, and in display order. The
/// display order is re-derived after every mutating call, so it is never
/// stale: it equals insertion order when no comparator is set, otherwise it
/// is insertion order stably sorted by the comparator.
#[derive(Clone)]
pub struct Group {
    name: String,
    insertion_order: Vec<ActionRef>,
    display_order: Vec<ActionRef>,
    comparator: Option<ActionComparator>,
    icon: Option<Icon>,
    expanded: bool,
}

impl Group {
    /// Create an empty, expanded group.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            insertion_order: Vec::new(),
            display_order: Vec::new(),
            comparator: None,
            icon: None,
            expanded: true,
        })
    }

    /// The group name, in the casing last assigned.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if `name` refers to this group (case-insensitive).
    pub fn is_named(&self, name: &str) -> bool {
        names_eq(&self.name, name)
    }

    /// Rename the group.
    ///
    /// Only validates the name itself; uniqueness among siblings is the
    /// owner's responsibility.
    pub fn rename(&mut self, new_name: impl Into<String>) -> CoreResult<()> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        self.name = new_name;
        Ok(())
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Append an action.
    pub fn add(&mut self, action: ActionRef) {
        self.insertion_order.push(action);
        self.resort();
    }

    /// Append several actions, re-deriving the display order once.
    pub fn add_all<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = ActionRef>,
    {
        self.insertion_order.extend(actions);
        self.resort();
    }

    /// Remove every occurrence of `action`.
    ///
    /// Returns `true` if at least one occurrence was present.
    pub fn remove(&mut self, action: &ActionRef) -> bool {
        self.remove_where(|a| same_action(a, action))
    }

    /// Remove every action with the given name.
    pub fn remove_by_name(&mut self, name: &str, case_sensitive: bool) -> bool {
        self.remove_where(|a| name_matches(a.name(), name, case_sensitive))
    }

    /// Remove all actions. Returns `true` if the group had any.
    pub fn clear(&mut self) -> bool {
        if self.insertion_order.is_empty() {
            return false;
        }
        self.insertion_order.clear();
        self.display_order.clear();
        true
    }

    /// Replace the insertion order with the current display order permuted
    /// by `order` (indices into the display order), and drop the comparator
    /// so the new order is what gets displayed.
    ///
    /// Returns `false` and leaves the group untouched if `order` is not a
    /// permutation of `0..len()`.
    pub fn reorder(&mut self, order: &[usize]) -> bool {
        if order.len() != self.display_order.len() {
            return false;
        }
        let mut seen = vec![false; order.len()];
        for &index in order {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        self.insertion_order = order
            .iter()
            .map(|&index| self.display_order[index].clone())
            .collect();
        self.comparator = None;
        self.resort();
        true
    }

    fn remove_where(&mut self, mut pred: impl FnMut(&ActionRef) -> bool) -> bool {
        let before = self.insertion_order.len();
        self.insertion_order.retain(|a| !pred(a));
        if self.insertion_order.len() == before {
            return false;
        }
        self.resort();
        true
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Set or clear the display comparator.
    pub fn set_comparator(&mut self, comparator: Option<ActionComparator>) {
        self.comparator = comparator;
        self.resort();
    }

    /// Check if a comparator is set.
    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    fn resort(&mut self) {
        self.display_order = self.insertion_order.clone();
        if let Some(cmp) = &self.comparator {
            // sort_by is stable: equal actions keep insertion order
            self.display_order.sort_by(|a, b| cmp(a, b));
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Actions in display order (a copy).
    pub fn actions(&self) -> Vec<ActionRef> {
        self.display_order.clone()
    }

    /// Actions in insertion order (a copy).
    pub fn actions_in_insertion_order(&self) -> Vec<ActionRef> {
        self.insertion_order.clone()
    }

    /// Action at a display index.
    pub fn action_at(&self, index: usize) -> Option<ActionRef> {
        self.display_order.get(index).cloned()
    }

    /// Check if `action` is a member.
    pub fn has_action(&self, action: &ActionRef) -> bool {
        self.insertion_order.iter().any(|a| same_action(a, action))
    }

    /// Check if an action with the given name is a member.
    pub fn has_action_named(&self, name: &str, case_sensitive: bool) -> bool {
        self.insertion_order
            .iter()
            .any(|a| name_matches(a.name(), name, case_sensitive))
    }

    /// Number of actions, counting duplicates.
    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    /// Check if the group has no actions.
    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }

    // =========================================================================
    // Presentation State
    // =========================================================================

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("actions", &self.display_order)
            .field("sorted", &self.comparator.is_some())
            .field("icon", &self.icon)
            .field("expanded", &self.expanded)
            .finish()
    }
}

fn name_matches(candidate: &str, name: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        candidate == name
    } else {
        names_eq(candidate, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SimpleAction;

    fn action(name: &str) -> ActionRef {
        SimpleAction::new(name, || {}).into_ref()
    }

    fn names(actions: &[ActionRef]) -> Vec<String> {
        actions.iter().map(|a| a.name().to_string()).collect()
    }

    #[test]
    fn test_new_rejects_blank_name() {
        assert_eq!(Group::new("").unwrap_err(), CoreError::BlankGroupName);
        assert_eq!(Group::new("   ").unwrap_err(), CoreError::BlankGroupName);
        assert!(Group::new("File").is_ok());
    }

    #[test]
    fn test_new_group_is_expanded_and_empty() {
        let group = Group::new("File").unwrap();
        assert!(group.is_expanded());
        assert!(group.is_empty());
        assert_eq!(group.len(), 0);
        assert!(!group.has_comparator());
    }

    #[test]
    fn test_display_order_matches_insertion_without_comparator() {
        let mut group = Group::new("Edit").unwrap();
        group.add(action("paste"));
        group.add(action("copy"));
        group.add(action("cut"));

        assert_eq!(names(&group.actions()), vec!["paste", "copy", "cut"]);
        assert_eq!(
            names(&group.actions_in_insertion_order()),
            vec!["paste", "copy", "cut"]
        );
    }

    #[test]
    fn test_comparator_sorts_display_only() {
        let mut group = Group::new("Edit").unwrap();
        group.add_all(vec![action("paste"), action("Copy"), action("cut")]);
        group.set_comparator(Some(by_name()));

        assert_eq!(names(&group.actions()), vec!["Copy", "cut", "paste"]);
        assert_eq!(
            names(&group.actions_in_insertion_order()),
            vec!["paste", "Copy", "cut"]
        );

        // Clearing the comparator restores insertion order
        group.set_comparator(None);
        assert_eq!(names(&group.actions()), vec!["paste", "Copy", "cut"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_actions() {
        let first = action("open");
        let second = action("open");
        let mut group = Group::new("File").unwrap();
        group.set_comparator(Some(by_name()));
        group.add(action("zip"));
        group.add(first.clone());
        group.add(action("close"));
        group.add(second.clone());

        let shown = group.actions();
        assert_eq!(names(&shown), vec!["close", "open", "open", "zip"]);
        assert!(same_action(&shown[1], &first));
        assert!(same_action(&shown[2], &second));
    }

    #[test]
    fn test_display_order_is_permutation_of_insertion() {
        let mut group = Group::new("Mixed").unwrap();
        let shared = action("b");
        group.add_all(vec![action("c"), shared.clone(), action("a"), shared]);
        group.set_comparator(Some(by_name()));

        let mut shown = names(&group.actions());
        let mut inserted = names(&group.actions_in_insertion_order());
        shown.sort();
        inserted.sort();
        assert_eq!(shown, inserted);
    }

    #[test]
    fn test_add_all_sorts_once() {
        use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut group = Group::new("Counted").unwrap();
        group.set_comparator(Some(Arc::new(move |a: &ActionRef, b: &ActionRef| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
            a.name().cmp(b.name())
        })));

        group.add_all(vec![action("b"), action("a")]);
        // One sort over two elements compares once
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(names(&group.actions()), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_removes_every_duplicate() {
        let dup = action("save");
        let mut group = Group::new("File").unwrap();
        group.add(dup.clone());
        group.add(action("open"));
        group.add(dup.clone());
        assert_eq!(group.len(), 3);

        assert!(group.remove(&dup));
        assert_eq!(group.len(), 1);
        assert!(!group.has_action(&dup));

        // Absent action leaves the group unchanged
        assert!(!group.remove(&dup));
        assert_eq!(names(&group.actions()), vec!["open"]);
    }

    #[test]
    fn test_remove_by_name_case_sensitivity() {
        let mut group = Group::new("File").unwrap();
        group.add_all(vec![action("Save"), action("save"), action("open")]);

        assert!(!group.remove_by_name("SAVE", true));
        assert_eq!(group.len(), 3);

        assert!(group.remove_by_name("Save", true));
        assert_eq!(names(&group.actions()), vec!["save", "open"]);

        assert!(group.remove_by_name("SAVE", false));
        assert_eq!(names(&group.actions()), vec!["open"]);
    }

    #[test]
    fn test_has_action_named() {
        let mut group = Group::new("File").unwrap();
        group.add(action("Open"));

        assert!(group.has_action_named("Open", true));
        assert!(!group.has_action_named("open", true));
        assert!(group.has_action_named("open", false));
        assert!(!group.has_action_named("close", false));
    }

    #[test]
    fn test_rename_validates_only_blankness() {
        let mut group = Group::new("File").unwrap();
        assert_eq!(group.rename(" "), Err(CoreError::BlankGroupName));
        assert_eq!(group.name(), "File");

        group.rename("FILE").unwrap();
        assert_eq!(group.name(), "FILE");
        assert!(group.is_named("file"));
    }

    #[test]
    fn test_reorder_applies_permutation_and_drops_comparator() {
        let mut group = Group::new("Edit").unwrap();
        group.add_all(vec![action("c"), action("a"), action("b")]);
        group.set_comparator(Some(by_name()));
        assert_eq!(names(&group.actions()), vec!["a", "b", "c"]);

        assert!(group.reorder(&[2, 0, 1]));
        assert!(!group.has_comparator());
        assert_eq!(names(&group.actions()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let mut group = Group::new("Edit").unwrap();
        group.add_all(vec![action("a"), action("b")]);

        assert!(!group.reorder(&[0]));
        assert!(!group.reorder(&[0, 0]));
        assert!(!group.reorder(&[0, 2]));
        assert_eq!(names(&group.actions()), vec!["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut group = Group::new("File").unwrap();
        assert!(!group.clear());
        group.add(action("open"));
        assert!(group.clear());
        assert!(group.is_empty());
        assert!(group.actions().is_empty());
    }

    #[test]
    fn test_returned_lists_are_copies() {
        let mut group = Group::new("File").unwrap();
        group.add(action("open"));

        let mut copy = group.actions();
        copy.push(action("injected"));
        copy.clear();

        assert_eq!(group.len(), 1);
        assert_eq!(names(&group.actions()), vec!["open"]);
    }
}
