//! # Resource Items
//!
//! The base record every resource collection is made of. The only field the
//! client layer relies on structurally is `id`; everything else lives in a
//! per-resource payload type. Views that want a human-readable label fall
//! back through the conventional `name`/`title`/`description` attributes,
//! all of which are optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An addressable record in a resource collection.
///
/// `T` is the resource-specific payload. At the cache boundary the payload
/// is an untyped `serde_json::Value`; typed consumers pick their own `T`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceItem<T = Value> {
    /// Unique identifier within the resource collection
    pub id: String,

    /// Resource-specific attributes
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ResourceItem<T> {
    pub fn new(id: impl Into<String>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

impl ResourceItem<Value> {
    /// Item with an empty payload, useful for tests and placeholders.
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: Value::Object(serde_json::Map::new()),
        }
    }

    /// Display label: `name`, then `title`, then the id.
    pub fn display_name(&self) -> &str {
        self.attr_str("name")
            .or_else(|| self.attr_str("title"))
            .unwrap_or(&self.id)
    }

    /// Conventional `description` attribute, if present and a string.
    pub fn display_description(&self) -> Option<&str> {
        self.attr_str("description")
    }

    fn attr_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}
