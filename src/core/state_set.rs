//! Ordered sets of state ids.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// A set of states, compared and hashed by content.
///
/// Subset construction uses these as map keys, so two sets holding the
/// same ids must be equal regardless of how they were built.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateSet {
    states: BTreeSet<StateId>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not present yet.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.states.insert(state)
    }

    pub fn remove(&mut self, state: StateId) -> bool {
        self.states.remove(&state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Iterate in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        self.states.extend(other.states.iter().copied());
    }

    /// Check if this set shares at least one state with `other`.
    pub fn intersects<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        other.into_iter().any(|state| self.states.contains(state))
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.states.is_subset(&other.states)
    }

    /// Sorted ids, the canonical representation.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        self.states.extend(iter);
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a StateId;
    type IntoIter = btree_set::Iter<'a, StateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::new();
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
    }

    #[test]
    fn test_state_set_union() {
        let mut set1: StateSet = [1, 3].into_iter().collect();
        let set2: StateSet = [2, 3].into_iter().collect();

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_state_set_intersects() {
        let set: StateSet = [1, 3, 5].into_iter().collect();
        let finals: BTreeSet<StateId> = [5, 9].into_iter().collect();
        let others: BTreeSet<StateId> = [2, 4].into_iter().collect();

        assert!(set.intersects(&finals));
        assert!(!set.intersects(&others));
    }

    #[test]
    fn equal_content_hashes_equal() {
        let a: StateSet = [4, 1, 2].into_iter().collect();
        let mut b = StateSet::singleton(2);
        b.insert(4);
        b.insert(1);

        let mut seen = HashSet::new();
        seen.insert(a.clone());
        assert!(seen.contains(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn debug_lists_states_in_order() {
        let set: StateSet = [2, 0, 1].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{0, 1, 2}");
    }
}
