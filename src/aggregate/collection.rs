//! Failure aggregate keyed by integer index.

use std::fmt;

use indexmap::IndexMap;
use stillwater::{Semigroup, Validation};

use crate::failure::{slot, view, Emptiable, Failure, Slot, Viewable};
use crate::view::View;

use super::{any_failure, into_result, into_validation, real_failure, write_bracketed, KeyedEntry};

/// Failures keyed by index, e.g. the position of an item in a batch.
///
/// Keys are `usize`, so only non-negative indices can be stored. Use a
/// [`Map`](crate::Map) when failures are keyed by anything else.
///
/// Every index holds at most one slot; inserting at an index that is
/// already present replaces its slot. Entry order in the rendered text and
/// the view is not part of the contract.
///
/// # Example
///
/// ```rust
/// use failtree::{is_error, slot, Collection, Message};
///
/// let mut items = Collection::new();
/// items.insert(0, None);
/// items.insert(4, slot(Message::new("out of stock")));
///
/// assert!(is_error(Some(&items)));
/// assert_eq!(items.to_string(), "[4: out of stock]");
/// ```
#[derive(Debug, Default)]
pub struct Collection {
    slots: IndexMap<usize, Slot>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `slot` at `index`, returning the slot it replaced.
    pub fn insert(&mut self, index: usize, slot: Slot) -> Option<Slot> {
        self.slots.insert(index, slot)
    }

    /// Stores a failure at `index` and returns self for chaining.
    pub fn set<F: Failure>(&mut self, index: usize, err: F) -> &mut Self {
        self.slots.insert(index, slot(err));
        self
    }

    /// Returns the failure at `index`, if the slot exists and is occupied.
    pub fn get(&self, index: usize) -> Option<&(dyn Failure + 'static)> {
        self.slots.get(&index)?.as_deref()
    }

    /// Returns true if a slot exists at `index`, occupied or not.
    pub fn contains_key(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Returns the number of slots, absent ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the collection has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over all `(index, slot)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }

    /// Returns an iterator over the entries that hold real failures.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &(dyn Failure + 'static))> + '_ {
        self.slots
            .iter()
            .filter_map(|(index, slot)| Some((*index, real_failure(slot)?)))
    }

    /// Returns `Err(self)` if the collection holds a real failure, `Ok(())`
    /// otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        into_result(self)
    }

    /// Wraps `value` in a `Validation`, failing with this collection if it
    /// holds a real failure.
    pub fn into_validation<T>(self, value: T) -> Validation<T, Self> {
        into_validation(self, value)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bracketed(f, self.failures().map(|(index, err)| KeyedEntry(index, err)))
    }
}

impl std::error::Error for Collection {}

impl Emptiable for Collection {
    fn is_failure(&self) -> bool {
        any_failure(self.slots.values())
    }
}

impl Viewable for Collection {
    fn error_view(&self) -> View {
        View::Indexed(
            self.slots
                .iter()
                .filter_map(|(index, slot)| Some((*index, view(slot.as_deref())?)))
                .collect(),
        )
    }
}

impl Failure for Collection {
    fn as_emptiable(&self) -> Option<&dyn Emptiable> {
        Some(self)
    }

    fn as_viewable(&self) -> Option<&dyn Viewable> {
        Some(self)
    }
}

/// Merges entries; on a shared index the right-hand slot wins.
impl Semigroup for Collection {
    fn combine(mut self, other: Self) -> Self {
        self.slots.extend(other.slots);
        self
    }
}

impl FromIterator<(usize, Slot)> for Collection {
    fn from_iter<I: IntoIterator<Item = (usize, Slot)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Extend<(usize, Slot)> for Collection {
    fn extend<I: IntoIterator<Item = (usize, Slot)>>(&mut self, iter: I) {
        self.slots.extend(iter);
    }
}

impl IntoIterator for Collection {
    type Item = (usize, Slot);
    type IntoIter = indexmap::map::IntoIter<usize, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is_error, or_nil, List, Message};

    fn msg(s: &str) -> Slot {
        slot(Message::new(s))
    }

    #[test]
    fn test_all_absent_is_not_error() {
        let collection: Collection = vec![(0, None), (1, None), (7, None)]
            .into_iter()
            .collect();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.to_string(), "[]");
        assert!(!is_error(Some(&collection)));
        assert!(view(Some(&collection)).is_none());
    }

    #[test]
    fn test_renders_index_prefix() {
        let mut collection = Collection::new();
        collection.insert(2, msg("negative"));
        collection.insert(5, None);

        assert!(is_error(Some(&collection)));
        assert_eq!(collection.to_string(), "[2: negative]");

        let mut expected = IndexMap::new();
        expected.insert(2, View::from("negative"));
        assert_eq!(collection.error_view(), View::Indexed(expected));
    }

    #[test]
    fn test_last_write_wins() {
        let mut collection = Collection::new();
        assert!(collection.insert(1, msg("first")).is_none());

        let replaced = collection.insert(1, msg("second"));
        assert_eq!(
            replaced.flatten().map(|e| e.to_string()),
            Some("first".to_string())
        );

        collection.insert(1, None);
        assert_eq!(collection.len(), 1);
        assert!(collection.contains_key(1));
        assert!(collection.get(1).is_none());
        assert!(!collection.is_failure());
    }

    #[test]
    fn test_set_chains() {
        let mut collection = Collection::new();
        collection
            .set(0, Message::new("a"))
            .set(3, Message::new("b"));

        let failures: Vec<(usize, String)> = collection
            .failures()
            .map(|(index, err)| (index, err.to_string()))
            .collect();
        assert_eq!(failures.len(), 2);
        assert!(failures.contains(&(0, "a".to_string())));
        assert!(failures.contains(&(3, "b".to_string())));
    }

    #[test]
    fn test_nested_aggregate_view() {
        let mut row = List::new();
        row.push(Message::new("bad cell"));

        let mut empty_row = List::new();
        empty_row.push_none();

        let mut collection = Collection::new();
        collection.insert(0, slot(row));
        collection.insert(1, slot(empty_row));

        assert_eq!(collection.to_string(), "[0: [bad cell]]");

        let mut expected = IndexMap::new();
        expected.insert(0, View::Sequence(vec![View::from("bad cell")]));
        assert_eq!(view(Some(&collection)), Some(View::Indexed(expected)));
    }

    #[test]
    fn test_combine_right_wins() {
        let left: Collection = vec![(0, msg("old")), (1, msg("kept"))].into_iter().collect();
        let right: Collection = vec![(0, None)].into_iter().collect();

        let combined = left.combine(right);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.to_string(), "[1: kept]");
    }

    #[test]
    fn test_into_result_and_or_nil() {
        let mut collection = Collection::new();
        collection.insert(0, None);
        assert!(collection.into_result().is_ok());

        let mut collection = Collection::new();
        collection.set(9, Message::new("x"));
        let kept = or_nil(Some(collection)).expect("collection holds a failure");
        assert_eq!(kept.to_string(), "[9: x]");
    }

    #[test]
    fn test_semigroup_associativity() {
        // Index 0 is overwritten twice and index 1 is cleared by the last
        // operand, so grouping must not change which slot wins.
        let make = || {
            (
                Collection::from_iter([(0, msg("a0")), (1, msg("a1"))]),
                Collection::from_iter([(0, msg("b0")), (2, msg("b2"))]),
                Collection::from_iter([(0, msg("c0")), (1, None)]),
            )
        };

        let (e1, e2, e3) = make();
        let left = e1.combine(e2).combine(e3);
        let (e1, e2, e3) = make();
        let right = e1.combine(e2.combine(e3));

        assert_eq!(left.len(), right.len());
        assert_eq!(left.error_view(), right.error_view());

        let mut expected = IndexMap::new();
        expected.insert(0, View::from("c0"));
        expected.insert(2, View::from("b2"));
        assert_eq!(left.error_view(), View::Indexed(expected));
    }
}
