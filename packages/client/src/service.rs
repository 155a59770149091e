//! # Resource Service Port
//!
//! The remote service boundary every resource collection sits behind. Reads
//! (`list`, `detail`) are required; mutations are optional and default to a
//! configuration failure so an unconfigured operation fails before any
//! network attempt.

use async_trait::async_trait;
use reskit_common::ResourceItem;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Operation not configured: {0}")]
    NotConfigured(&'static str),
}

/// Remote service for one resource collection.
///
/// `query` strings handed to `list` are the same minimal encodings produced
/// by the params layer, so the displayed URL and the fetch key always match.
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    /// Fetch the collection, optionally filtered/paged by a query string
    async fn list(&self, query: Option<&str>) -> Result<Vec<ResourceItem>, ServiceError>;

    /// Fetch a single item, or `None` when it does not exist
    async fn detail(&self, id: &str) -> Result<Option<ResourceItem>, ServiceError>;

    /// Create an item. Optional; unconfigured by default.
    async fn create(&self, _payload: Value) -> Result<ResourceItem, ServiceError> {
        Err(ServiceError::NotConfigured("create"))
    }

    /// Update an item. Optional; unconfigured by default.
    async fn update(&self, _id: &str, _payload: Value) -> Result<ResourceItem, ServiceError> {
        Err(ServiceError::NotConfigured("update"))
    }

    /// Delete an item, returning whether it existed. Optional; unconfigured
    /// by default.
    async fn delete(&self, _id: &str) -> Result<bool, ServiceError> {
        Err(ServiceError::NotConfigured("delete"))
    }
}
