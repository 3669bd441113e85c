//! The failure contract and its two optional capabilities.
//!
//! Every value stored in an aggregate implements [`Failure`]. On top of the
//! plain `std::error::Error` contract a failure may opt into two narrower
//! capabilities:
//!
//! - [`Emptiable`]: the value can report that it does not actually represent
//!   a failure (an aggregate with nothing inside).
//! - [`Viewable`]: the value can produce a structured [`View`] of itself.
//!
//! The free functions [`is_error`], [`or_nil`] and [`view`] are the only
//! places where these capabilities are queried. Values that opt into neither
//! (like [`Message`](crate::Message)) get the fallback behavior: present means
//! failed, and the view is the plain text description.

use std::error::Error;

use crate::view::View;

/// A single aggregate slot. `None` means "no failure at this position".
pub type Slot = Option<Box<dyn Failure>>;

/// A value that can be stored in an aggregate.
///
/// The default capability queries return `None`, so any error type
/// participates with an empty impl:
///
/// ```rust
/// use failtree::{is_error, Failure};
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "timed out")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
/// impl Failure for Timeout {}
///
/// assert!(is_error(Some(&Timeout)));
/// ```
///
/// For error types owned by another crate, wrap them in [`Foreign`].
pub trait Failure: Error + Send + Sync + 'static {
    /// Returns the emptiness capability, if this value has one.
    fn as_emptiable(&self) -> Option<&dyn Emptiable> {
        None
    }

    /// Returns the view capability, if this value has one.
    fn as_viewable(&self) -> Option<&dyn Viewable> {
        None
    }
}

/// Implemented by compound failures that may contain no failures at all.
pub trait Emptiable {
    /// Returns true if this value actually represents a failure.
    fn is_failure(&self) -> bool;
}

/// Implemented by failures that expose structured data.
///
/// The returned [`View`] is meant to be serialized, e.g. with
/// [`View::to_json`].
pub trait Viewable {
    /// Builds the structured view of this failure.
    fn error_view(&self) -> View;
}

/// Tests whether `err` is present and actually represents a failure.
///
/// - `None` is never a failure.
/// - Values with the [`Emptiable`] capability decide for themselves.
/// - Every other present value is a failure.
///
/// # Example
///
/// ```rust
/// use failtree::{is_error, List, Message};
///
/// assert!(!is_error::<Message>(None));
/// assert!(is_error(Some(&Message::new("boom"))));
///
/// let mut list = List::new();
/// list.push_none();
/// assert!(!is_error(Some(&list)));
/// ```
pub fn is_error<F>(err: Option<&F>) -> bool
where
    F: Failure + ?Sized,
{
    match err {
        None => false,
        Some(err) => err.as_emptiable().map_or(true, |e| e.is_failure()),
    }
}

/// Borrows a value as a `dyn Failure`.
///
/// Implemented for every [`Failure`] and for the boxed form stored in a
/// [`Slot`], so [`or_nil`] accepts both.
pub trait AsFailure {
    /// Returns the value as a failure trait object.
    fn as_failure(&self) -> &dyn Failure;
}

impl<F: Failure> AsFailure for F {
    fn as_failure(&self) -> &dyn Failure {
        self
    }
}

impl AsFailure for Box<dyn Failure> {
    fn as_failure(&self) -> &dyn Failure {
        self.as_ref()
    }
}

/// Normalizes `err` to `None` when it does not represent a failure.
///
/// Use it before returning a possibly-empty aggregate so callers can rely on
/// a plain `is_some()` check. Slots work too:
///
/// ```rust
/// use failtree::{or_nil, slot, List, Message};
///
/// assert!(or_nil(slot(List::new())).is_none());
/// assert!(or_nil(slot(Message::new("x"))).is_some());
/// ```
///
/// Concrete aggregates keep their type:
///
/// ```rust
/// use failtree::{or_nil, slot, Map, Message};
///
/// let mut errors = Map::new();
/// errors.insert("name", None);
/// assert!(or_nil(Some(errors)).is_none());
///
/// let mut errors = Map::new();
/// errors.insert("age", slot(Message::new("too young")));
/// assert!(or_nil(Some(errors)).is_some());
/// ```
pub fn or_nil<F: AsFailure>(err: Option<F>) -> Option<F> {
    err.filter(|e| is_error(Some(e.as_failure())))
}

/// Returns the structured view of `err`, or `None` if it is not a failure.
///
/// Values with the [`Viewable`] capability produce their own view; any
/// other failure is rendered as [`View::Text`] holding its description.
pub fn view<F>(err: Option<&F>) -> Option<View>
where
    F: Failure + ?Sized,
{
    let err = err.filter(|e| is_error(Some(*e)))?;

    Some(match err.as_viewable() {
        Some(v) => v.error_view(),
        None => View::Text(err.to_string()),
    })
}

/// Boxes a failure into an occupied slot.
pub fn slot<F: Failure>(err: F) -> Slot {
    Some(Box::new(err))
}

/// Adapter that lets any foreign error type participate as a leaf failure.
///
/// ```rust
/// use failtree::{Foreign, List};
///
/// let parse = "x".parse::<i32>().unwrap_err();
/// let mut list = List::new();
/// list.push(Foreign(parse));
/// assert_eq!(list.to_string(), "[invalid digit found in string]");
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Foreign<E>(pub E)
where
    E: Error + Send + Sync + 'static;

impl<E> Foreign<E>
where
    E: Error + Send + Sync + 'static,
{
    /// Returns the wrapped error.
    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E> Failure for Foreign<E> where E: Error + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    #[derive(Debug, thiserror::Error)]
    #[error("nothing to see")]
    struct Hollow;

    impl Emptiable for Hollow {
        fn is_failure(&self) -> bool {
            false
        }
    }

    impl Failure for Hollow {
        fn as_emptiable(&self) -> Option<&dyn Emptiable> {
            Some(self)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("structured")]
    struct Structured;

    impl Viewable for Structured {
        fn error_view(&self) -> View {
            View::Sequence(vec![View::Text("inner".to_string())])
        }
    }

    impl Failure for Structured {
        fn as_viewable(&self) -> Option<&dyn Viewable> {
            Some(self)
        }
    }

    #[test]
    fn test_absent_is_not_error() {
        assert!(!is_error::<Message>(None));
        assert!(!is_error::<dyn Failure>(None));
    }

    #[test]
    fn test_plain_failure_is_error() {
        assert!(is_error(Some(&Message::new("x"))));
    }

    #[test]
    fn test_emptiable_capability_is_consulted() {
        assert!(!is_error(Some(&Hollow)));
        assert!(view(Some(&Hollow)).is_none());
        assert!(or_nil(Some(Hollow)).is_none());
    }

    #[test]
    fn test_view_falls_back_to_text() {
        let view = view(Some(&Message::new("plain")));
        assert_eq!(view, Some(View::Text("plain".to_string())));
    }

    #[test]
    fn test_view_uses_capability() {
        let view = view(Some(&Structured));
        assert_eq!(
            view,
            Some(View::Sequence(vec![View::Text("inner".to_string())]))
        );
    }

    #[test]
    fn test_trait_object_dispatch() {
        let boxed: Box<dyn Failure> = Box::new(Structured);
        assert!(is_error(Some(boxed.as_ref())));
        assert!(matches!(view(Some(boxed.as_ref())), Some(View::Sequence(_))));
    }

    #[test]
    fn test_or_nil_is_identity_on_failures() {
        let kept = or_nil(Some(Message::new("kept")));
        assert_eq!(kept, Some(Message::new("kept")));
        assert_eq!(or_nil::<Message>(None), None);
    }

    #[test]
    fn test_or_nil_normalizes_slots() {
        assert!(or_nil(slot(crate::List::new())).is_none());
        assert!(or_nil::<Box<dyn Failure>>(None).is_none());

        let kept = or_nil(slot(Message::new("x"))).unwrap();
        assert_eq!(kept.to_string(), "x");

        let boxed: Box<dyn Failure> = Box::new(Hollow);
        assert!(or_nil(Some(boxed)).is_none());
    }

    #[test]
    fn test_slot_helper() {
        let s = slot(Message::new("a"));
        assert!(is_error(s.as_deref()));
    }

    #[test]
    fn test_foreign_displays_inner() {
        let err = Foreign(std::fmt::Error);
        assert_eq!(err.to_string(), std::fmt::Error.to_string());
        assert!(is_error(Some(&err)));
    }
}
