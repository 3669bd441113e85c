//! Failure aggregate keyed by field name.

use std::fmt;

use indexmap::IndexMap;
use stillwater::{Semigroup, Validation};

use crate::failure::{slot, view, Emptiable, Failure, Slot, Viewable};
use crate::view::View;

use super::{any_failure, into_result, into_validation, real_failure, write_bracketed, KeyedEntry};

/// Failures keyed by name, typically one slot per validated field.
///
/// Inserting under a name that is already present replaces its slot. Entry
/// order in the rendered text and the view is not part of the contract.
///
/// # Example
///
/// ```rust
/// use failtree::{is_error, or_nil, slot, view, Map, Message};
/// use serde_json::json;
///
/// fn validate(name: &str, age: u32) -> Option<Map> {
///     let mut errors = Map::new();
///     errors.insert("name", if name.is_empty() { slot(Message::new("required")) } else { None });
///     errors.insert("age", if age < 18 { slot(Message::new("too young")) } else { None });
///     or_nil(Some(errors))
/// }
///
/// assert!(validate("Ann", 30).is_none());
///
/// let errors = validate("Bob", 12).unwrap();
/// assert_eq!(errors.to_string(), "[age: too young]");
/// assert_eq!(view(Some(&errors)).unwrap().to_json(), json!({"age": "too young"}));
/// ```
#[derive(Debug, Default)]
pub struct Map {
    slots: IndexMap<String, Slot>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `slot` under `key`, returning the slot it replaced.
    pub fn insert(&mut self, key: impl Into<String>, slot: Slot) -> Option<Slot> {
        self.slots.insert(key.into(), slot)
    }

    /// Stores a failure under `key` and returns self for chaining.
    pub fn set<F: Failure>(&mut self, key: impl Into<String>, err: F) -> &mut Self {
        self.slots.insert(key.into(), slot(err));
        self
    }

    /// Returns the failure stored under `key`, if present and occupied.
    pub fn get(&self, key: &str) -> Option<&(dyn Failure + 'static)> {
        self.slots.get(key)?.as_deref()
    }

    /// Returns true if a slot exists under `key`, occupied or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the number of slots, absent ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the map has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over all `(key, slot)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> + '_ {
        self.slots.iter().map(|(key, slot)| (key.as_str(), slot))
    }

    /// Returns an iterator over the entries that hold real failures.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &(dyn Failure + 'static))> + '_ {
        self.slots
            .iter()
            .filter_map(|(key, slot)| Some((key.as_str(), real_failure(slot)?)))
    }

    /// Returns `Err(self)` if the map holds a real failure, `Ok(())` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        into_result(self)
    }

    /// Wraps `value` in a `Validation`, failing with this map if it holds a
    /// real failure.
    pub fn into_validation<T>(self, value: T) -> Validation<T, Self> {
        into_validation(self, value)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bracketed(f, self.failures().map(|(key, err)| KeyedEntry(key, err)))
    }
}

impl std::error::Error for Map {}

impl Emptiable for Map {
    fn is_failure(&self) -> bool {
        any_failure(self.slots.values())
    }
}

impl Viewable for Map {
    fn error_view(&self) -> View {
        View::Keyed(
            self.slots
                .iter()
                .filter_map(|(key, slot)| Some((key.clone(), view(slot.as_deref())?)))
                .collect(),
        )
    }
}

impl Failure for Map {
    fn as_emptiable(&self) -> Option<&dyn Emptiable> {
        Some(self)
    }

    fn as_viewable(&self) -> Option<&dyn Viewable> {
        Some(self)
    }
}

/// Merges entries; on a shared key the right-hand slot wins.
impl Semigroup for Map {
    fn combine(mut self, other: Self) -> Self {
        self.slots.extend(other.slots);
        self
    }
}

impl<K: Into<String>> FromIterator<(K, Slot)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Slot)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(key, slot)| (key.into(), slot))
                .collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Slot)> for Map {
    fn extend<I: IntoIterator<Item = (K, Slot)>>(&mut self, iter: I) {
        self.slots
            .extend(iter.into_iter().map(|(key, slot)| (key.into(), slot)));
    }
}

impl IntoIterator for Map {
    type Item = (String, Slot);
    type IntoIter = indexmap::map::IntoIter<String, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}
