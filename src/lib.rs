//! # Failtree
//!
//! Aggregate failures that know when they are empty.
//!
//! Batch and keyed operations (validating every field of a form, processing
//! a set of independent inputs) produce one failure slot per item, and most
//! of those slots usually hold nothing. This crate collects such slots into a
//! single failure value that:
//!
//! - tests as "not a failure" when nothing inside it failed, even through
//!   nested aggregates,
//! - renders as a compact human-readable message, and
//! - produces a structured [`View`] for machine consumers.
//!
//! ## Core Types
//!
//! - [`Failure`]: the contract every stored value implements, with two
//!   optional capabilities, [`Emptiable`] and [`Viewable`]
//! - [`Message`]: a leaf failure holding only text (see also [`message!`])
//! - [`List`]: failures in append order
//! - [`Collection`]: failures keyed by integer index
//! - [`Map`]: failures keyed by name
//! - [`View`]: the structured representation, convertible to JSON
//!
//! The free functions [`is_error`], [`or_nil`] and [`view`] apply the
//! capabilities to any failure value.
//!
//! ## Example
//!
//! ```rust
//! use failtree::{is_error, or_nil, slot, view, List, Map, Message};
//! use serde_json::json;
//!
//! let mut tags = List::new();
//! tags.push_none().push(Message::new("too long"));
//!
//! let mut errors = Map::new();
//! errors.insert("name", None);
//! errors.insert("tags", slot(tags));
//!
//! assert!(is_error(Some(&errors)));
//! assert_eq!(errors.to_string(), "[tags: [too long]]");
//! assert_eq!(
//!     view(Some(&errors)).unwrap().to_json(),
//!     json!({"tags": ["too long"]})
//! );
//!
//! // Nothing failed, so the aggregate normalizes to None.
//! let mut errors = Map::new();
//! errors.insert("name", None);
//! assert!(or_nil(Some(errors)).is_none());
//! ```

pub mod aggregate;
pub mod error;
pub mod failure;
pub mod view;

pub use aggregate::{Collection, List, Map};
pub use error::Message;
pub use failure::{
    is_error, or_nil, slot, view, AsFailure, Emptiable, Failure, Foreign, Slot,
    Viewable,
};
pub use view::View;
