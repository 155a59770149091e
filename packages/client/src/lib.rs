//! # Reskit Client
//!
//! Generic resource client layer: fetch + cache coordination, mutation
//! coordination, and ephemeral per-view UI state for resource-oriented
//! views.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ view layer (cards, tables, toolbars)        │
//! └─────────────────────────────────────────────┘
//!          ↓ snapshots            ↑ operations
//! ┌─────────────────────────────────────────────┐
//! │ client: coordinators over one shared cache  │
//! │  - FetchCoordinator: list/detail/search,    │
//! │    stale-while-revalidate, dedup            │
//! │  - MutationCoordinator: create/update/      │
//! │    delete, invalidation, notifications      │
//! │  - SelectionStore: per-view ephemera        │
//! └─────────────────────────────────────────────┘
//!          ↓ ResourceService      ↓ NotificationSink
//! ┌─────────────────────────────────────────────┐
//! │ remote service boundary / toast renderer    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The remote service is the source of truth**: the cache is a
//!    freshness-tracked projection, never a store
//! 2. **Keying discipline over locking**: same key means same data;
//!    invalidation is scoped by resource-key prefix; there is no other
//!    shared-state coordination
//! 3. **Coordinators own the cache**: views read snapshots and call
//!    operations, they never touch entries directly
//! 4. **Collaborators are injected**: service, notifier, and cache arrive
//!    through constructors so tests run without a UI runtime
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reskit_client::{ClientConfig, FetchCoordinator, MutationCoordinator, ResourceCache};
//! use reskit_common::ResourceKey;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(ResourceCache::new());
//! let events = FetchCoordinator::new(
//!     cache.clone(),
//!     service.clone(),
//!     ResourceKey::new("events"),
//!     ClientConfig::default(),
//! );
//!
//! let snapshot = events.list(Some("page=2&search=gala")).await;
//! for item in snapshot.items().unwrap_or_default() {
//!     println!("{}", item.display_name());
//! }
//! ```

mod cache;
mod config;
mod error;
mod fetch;
mod mutations;
mod notify;
mod selection;
mod service;

pub use cache::{CacheEntry, CachedValue, ResourceCache};
pub use config::{ClientConfig, DEFAULT_CONFIG_NAME};
pub use error::ClientError;
pub use fetch::{FetchCoordinator, Snapshot};
pub use mutations::{MutationCallbacks, MutationCoordinator};
pub use notify::{ChannelNotifier, Notification, NotificationKind, NotificationSink, NullNotifier};
pub use selection::{SelectionStore, ViewMode, DEFAULT_COLUMNS};
pub use service::{ResourceService, ServiceError};

// Re-export the model and params types consumers always need alongside the
// coordinators
pub use reskit_common::{CacheKey, OperationKind, ResourceItem, ResourceKey};
pub use reskit_params::{
    ListParams, Location, MemoryNavigator, Navigator, ParamSync, ParamsPatch, SortOrder,
};
