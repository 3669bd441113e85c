//! Leaf failure types.
//!
//! Aggregates are built out of leaves. [`Message`] is the one this crate
//! provides; any other [`Failure`](crate::Failure) implementer works too.

mod message;

pub use message::Message;
