//! Aggregate failures.
//!
//! This module provides three containers of failure [`Slot`]s:
//! - [`List`]: ordered by append order
//! - [`Collection`]: keyed by integer index
//! - [`Map`]: keyed by field name
//!
//! All three share the same rules. An aggregate is a failure only if at least
//! one of its slots is (see [`is_error`]), slots without a failure are left
//! out of both the rendered text and the structured view, and aggregates can
//! be nested inside each other to any depth.
//!
//! # Example
//!
//! ```rust
//! use failtree::{is_error, slot, Collection, List, Map, Message};
//!
//! // Validating two independent rows, neither of which failed.
//! let mut rows = Collection::new();
//! rows.insert(0, slot(List::new()));
//! rows.insert(1, None);
//!
//! let mut form = Map::new();
//! form.insert("rows", slot(rows));
//! assert!(!is_error(Some(&form)));
//!
//! form.insert("email", slot(Message::new("invalid format")));
//! assert!(is_error(Some(&form)));
//! assert_eq!(form.to_string(), "[email: invalid format]");
//! ```
//!
//! # Thread Safety
//!
//! Aggregates are `Send + Sync` but have no internal locking. Mutating one
//! aggregate from several threads needs external synchronization.

mod collection;
mod list;
mod map;

pub use collection::Collection;
pub use list::List;
pub use map::Map;

use std::fmt::{self, Display};

use stillwater::Validation;

use crate::failure::{is_error, or_nil, Failure, Slot};

/// Returns true if any slot holds a real failure.
fn any_failure<'a, I>(slots: I) -> bool
where
    I: IntoIterator<Item = &'a Slot>,
{
    slots.into_iter().any(|slot| is_error(slot.as_deref()))
}

/// Returns the failure in `slot` if it is a real one.
fn real_failure(slot: &Slot) -> Option<&(dyn Failure + 'static)> {
    slot.as_deref().filter(|err| is_error(Some(*err)))
}

/// Writes `[item,item,...]`.
fn write_bracketed<I, D>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = D>,
    D: Display,
{
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// One `key: description` entry of a keyed aggregate.
struct KeyedEntry<'a, K>(K, &'a dyn Failure);

impl<K: Display> Display for KeyedEntry<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.1)
    }
}

fn into_result<F: Failure>(err: F) -> Result<(), F> {
    match or_nil(Some(err)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn into_validation<T, F: Failure>(err: F, value: T) -> Validation<T, F> {
    match into_result(err) {
        Ok(()) => Validation::Success(value),
        Err(err) => Validation::Failure(err),
    }
}

// Slots are boxed `Failure`s, which are Send + Sync by definition.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<List>();
    assert_sync::<List>();
    assert_send::<Collection>();
    assert_sync::<Collection>();
    assert_send::<Map>();
    assert_sync::<Map>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{failure::slot, Message};

    struct Joined(Vec<&'static str>);

    impl Display for Joined {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_bracketed(f, &self.0)
        }
    }

    #[test]
    fn test_write_bracketed() {
        assert_eq!(Joined(vec![]).to_string(), "[]");
        assert_eq!(Joined(vec!["a"]).to_string(), "[a]");
        assert_eq!(Joined(vec!["a", "b", "c"]).to_string(), "[a,b,c]");
    }

    #[test]
    fn test_any_failure() {
        let empty: Vec<Slot> = vec![];
        assert!(!any_failure(&empty));
        assert!(!any_failure(&vec![None, None]));
        assert!(any_failure(&vec![None, slot(Message::new("x"))]));
    }

    #[test]
    fn test_real_failure_skips_empty_aggregates() {
        assert!(real_failure(&None).is_none());
        assert!(real_failure(&slot(List::new())).is_none());
        assert!(real_failure(&slot(Message::new("x"))).is_some());
    }

    #[test]
    fn test_keyed_entry_display() {
        let msg = Message::new("too young");
        assert_eq!(KeyedEntry("age", &msg).to_string(), "age: too young");
        assert_eq!(KeyedEntry(3, &msg).to_string(), "3: too young");
    }
}
