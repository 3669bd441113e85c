//! The leaf failure type.

use std::fmt;

use crate::failure::Failure;

/// A failure consisting of nothing but a message.
///
/// `Message` opts into neither the emptiness nor the view capability: a
/// present `Message` is always a failure, and its view is its text.
///
/// # Example
///
/// ```rust
/// use failtree::{message, Message};
///
/// let plain = Message::new("x");
/// assert_eq!(plain.to_string(), "x");
///
/// let formatted = message!("{} items", 5);
/// assert_eq!(formatted.to_string(), "5 items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{0}")]
pub struct Message(String);

impl Message {
    /// Wraps an existing string.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Builds a message from pre-captured format arguments.
    ///
    /// This is what [`message!`](crate::message!) expands to.
    pub fn format(args: fmt::Arguments<'_>) -> Self {
        Self(fmt::format(args))
    }

    /// Returns the message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Message {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for Message {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Failure for Message {}

/// Builds a [`Message`] using `format!` syntax.
///
/// ```rust
/// let err = failtree::message!("field {} is {}", "age", "negative");
/// assert_eq!(err.as_str(), "field age is negative");
/// ```
#[macro_export]
macro_rules! message {
    ($($arg:tt)*) => {
        $crate::Message::format(::std::format_args!($($arg)*))
    };
}

// Message only holds a String.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Message>();
    assert_sync::<Message>();
};
