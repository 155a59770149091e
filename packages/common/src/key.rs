//! # Resource and Cache Keys
//!
//! Naming scheme for cached reads. A cache entry is identified by the tuple
//! of resource name, operation kind, and serialized parameters; mutation
//! invalidation is scoped by the resource component of that tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a resource collection (e.g. `events`, `profiles`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Kind of read operation a cache entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    List,
    Detail,
    Search,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::List => "list",
            OperationKind::Detail => "detail",
            OperationKind::Search => "search",
        }
    }
}

/// Identity of one cache entry: resource + operation + serialized params.
///
/// Distinct params never share an entry, even when the underlying service
/// call would be similar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: ResourceKey,
    pub op: OperationKind,
    pub params: String,
}

impl CacheKey {
    pub fn new(resource: ResourceKey, op: OperationKind, params: impl Into<String>) -> Self {
        Self {
            resource,
            op,
            params: params.into(),
        }
    }

    pub fn list(resource: ResourceKey, params: impl Into<String>) -> Self {
        Self::new(resource, OperationKind::List, params)
    }

    pub fn detail(resource: ResourceKey, id: impl Into<String>) -> Self {
        Self::new(resource, OperationKind::Detail, id)
    }

    pub fn search(resource: ResourceKey, term: impl Into<String>) -> Self {
        Self::new(resource, OperationKind::Search, term)
    }

    /// Prefix test used when a mutation invalidates everything cached for
    /// one resource.
    pub fn is_under(&self, resource: &ResourceKey) -> bool {
        &self.resource == resource
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}/{}", self.resource, self.op.as_str())
        } else {
            write!(f, "{}/{}?{}", self.resource, self.op.as_str(), self.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_is_exact() {
        let a = CacheKey::list(ResourceKey::new("events"), "page=2");
        let b = CacheKey::list(ResourceKey::new("events"), "page=2");
        let c = CacheKey::list(ResourceKey::new("events"), "page=3");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_is_under_scopes_by_resource() {
        let events = ResourceKey::new("events");
        let profiles = ResourceKey::new("profiles");

        let list = CacheKey::list(events.clone(), "");
        let detail = CacheKey::detail(events.clone(), "e-1");
        let other = CacheKey::list(profiles.clone(), "");

        assert!(list.is_under(&events));
        assert!(detail.is_under(&events));
        assert!(!other.is_under(&events));
    }

    #[test]
    fn test_display_rendering() {
        let key = CacheKey::list(ResourceKey::new("events"), "page=2&search=foo");
        assert_eq!(key.to_string(), "events/list?page=2&search=foo");

        let bare = CacheKey::list(ResourceKey::new("events"), "");
        assert_eq!(bare.to_string(), "events/list");
    }
}
