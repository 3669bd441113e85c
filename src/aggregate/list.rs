//! Ordered failure aggregate.

use std::fmt;

use stillwater::{Semigroup, Validation};

use crate::failure::{slot, view, Emptiable, Failure, Slot, Viewable};
use crate::view::View;

use super::{any_failure, into_result, into_validation, real_failure, write_bracketed};

/// An ordered sequence of failure slots.
///
/// Slots are kept in append order, which is the order failures appear in
/// the rendered text and in the [`View::Sequence`] view. Absent slots keep
/// their position in the list but are never rendered.
///
/// # Example
///
/// ```rust
/// use failtree::{is_error, view, List, Message};
/// use serde_json::json;
///
/// let mut list = List::new();
/// list.push(Message::new("a"))
///     .push_none()
///     .push(Message::new("b"));
///
/// assert!(is_error(Some(&list)));
/// assert_eq!(list.to_string(), "[a,b]");
/// assert_eq!(view(Some(&list)).unwrap().to_json(), json!(["a", "b"]));
/// ```
#[derive(Debug, Default)]
pub struct List {
    slots: Vec<Slot>,
}

impl List {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Appends slots to the end of the list and returns self for chaining.
    ///
    /// ```rust
    /// use failtree::{slot, List, Message};
    ///
    /// let mut list = List::new();
    /// list.append([slot(Message::new("a")), None])
    ///     .append([slot(Message::new("b"))]);
    ///
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.to_string(), "[a,b]");
    /// ```
    pub fn append<I>(&mut self, slots: I) -> &mut Self
    where
        I: IntoIterator<Item = Slot>,
    {
        self.slots.extend(slots);
        self
    }

    /// Appends a single failure.
    pub fn push<F: Failure>(&mut self, err: F) -> &mut Self {
        self.slots.push(slot(err));
        self
    }

    /// Appends an absent slot.
    pub fn push_none(&mut self) -> &mut Self {
        self.slots.push(None);
        self
    }

    /// Returns the number of slots, absent ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the list has no slots at all.
    ///
    /// A non-empty list may still not be a failure; use
    /// [`is_error`](crate::is_error) for that.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the failure at `index`, if the slot exists and is occupied.
    pub fn get(&self, index: usize) -> Option<&(dyn Failure + 'static)> {
        self.slots.get(index)?.as_deref()
    }

    /// Returns an iterator over all slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Returns an iterator over the slots that hold real failures.
    pub fn failures(&self) -> impl Iterator<Item = &(dyn Failure + 'static)> + '_ {
        self.slots.iter().filter_map(real_failure)
    }

    /// Returns `Err(self)` if the list holds a real failure, `Ok(())` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        into_result(self)
    }

    /// Wraps `value` in a `Validation`, failing with this list if it holds a
    /// real failure.
    pub fn into_validation<T>(self, value: T) -> Validation<T, Self> {
        into_validation(self, value)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bracketed(f, self.failures())
    }
}

impl std::error::Error for List {}

impl Emptiable for List {
    fn is_failure(&self) -> bool {
        any_failure(&self.slots)
    }
}

impl Viewable for List {
    fn error_view(&self) -> View {
        View::Sequence(
            self.slots
                .iter()
                .filter_map(|slot| view(slot.as_deref()))
                .collect(),
        )
    }
}

impl Failure for List {
    fn as_emptiable(&self) -> Option<&dyn Emptiable> {
        Some(self)
    }

    fn as_viewable(&self) -> Option<&dyn Viewable> {
        Some(self)
    }
}

/// Concatenates slots, left first.
impl Semigroup for List {
    fn combine(mut self, other: Self) -> Self {
        self.slots.extend(other.slots);
        self
    }
}

impl FromIterator<Slot> for List {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Extend<Slot> for List {
    fn extend<I: IntoIterator<Item = Slot>>(&mut self, iter: I) {
        self.slots.extend(iter);
    }
}

impl From<Vec<Slot>> for List {
    fn from(slots: Vec<Slot>) -> Self {
        Self { slots }
    }
}

impl IntoIterator for List {
    type Item = Slot;
    type IntoIter = std::vec::IntoIter<Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
