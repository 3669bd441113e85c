//! Structured failure views.
//!
//! A [`View`] mirrors the shape of a failure tree: leaves render as text,
//! a [`List`](crate::List) renders as a sequence, and keyed aggregates render
//! as maps. Slots that hold no failure never appear in a view.

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value};

/// Structured representation of a failure.
///
/// Two views compare equal regardless of the order of keys in keyed
/// variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// A leaf failure's description.
    Text(String),
    /// Views of the failures in an ordered aggregate, in order.
    Sequence(Vec<View>),
    /// Views keyed by integer index.
    Indexed(IndexMap<usize, View>),
    /// Views keyed by name.
    Keyed(IndexMap<String, View>),
}

impl View {
    /// Returns the text of a leaf view.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            View::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if this is a leaf view.
    pub fn is_text(&self) -> bool {
        matches!(self, View::Text(_))
    }

    /// Returns the number of direct children, or `None` for a leaf.
    ///
    /// A leaf has no children but is never "empty": every view describes a
    /// real failure.
    pub fn len(&self) -> Option<usize> {
        match self {
            View::Text(_) => None,
            View::Sequence(items) => Some(items.len()),
            View::Indexed(items) => Some(items.len()),
            View::Keyed(items) => Some(items.len()),
        }
    }

    /// Converts the view to JSON.
    ///
    /// Integer keys become decimal strings since JSON objects only have
    /// string keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use failtree::{slot, view, List, Map, Message};
    /// use serde_json::json;
    ///
    /// let mut tags = List::new();
    /// tags.push(Message::new("too long")).push_none();
    ///
    /// let mut errors = Map::new();
    /// errors.insert("name", None);
    /// errors.insert("tags", slot(tags));
    ///
    /// let json = view(Some(&errors)).unwrap().to_json();
    /// assert_eq!(json, json!({"tags": ["too long"]}));
    /// ```
    pub fn to_json(&self) -> Value {
        match self {
            View::Text(text) => Value::String(text.clone()),
            View::Sequence(items) => Value::Array(items.iter().map(View::to_json).collect()),
            View::Indexed(items) => Value::Object(
                items
                    .iter()
                    .map(|(key, view)| (key.to_string(), view.to_json()))
                    .collect::<JsonMap<_, _>>(),
            ),
            View::Keyed(items) => Value::Object(
                items
                    .iter()
                    .map(|(key, view)| (key.clone(), view.to_json()))
                    .collect::<JsonMap<_, _>>(),
            ),
        }
    }
}

impl From<View> for Value {
    fn from(view: View) -> Self {
        match view {
            View::Text(text) => Value::String(text),
            View::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            View::Indexed(items) => Value::Object(
                items
                    .into_iter()
                    .map(|(key, view)| (key.to_string(), Value::from(view)))
                    .collect(),
            ),
            View::Keyed(items) => Value::Object(
                items
                    .into_iter()
                    .map(|(key, view)| (key, Value::from(view)))
                    .collect(),
            ),
        }
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        View::Text(text)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        View::Text(text.to_string())
    }
}
