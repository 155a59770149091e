//! # Fetch Coordinator
//!
//! Read side of the client layer: list/detail/search with caching,
//! stale-while-revalidate, and in-flight deduplication.
//!
//! ## Read Semantics
//!
//! - Fresh entry: served from cache, no service call
//! - Stale entry with a value: the value is returned immediately and a
//!   background refetch is spawned (`is_loading` reports it)
//! - Missing entry: the caller awaits the fetch; concurrent identical
//!   requests share one service invocation
//! - `detail("")` and short search terms are disabled reads: no fetch is
//!   attempted and an empty snapshot is returned
//!
//! Superseded in-flight fetches are never cancelled; their responses land
//! in their own (now-unread) cache key and are simply ignored. The leading
//! fetch runs as a detached task, so a caller dropping its read future
//! mid-flight never strands the in-flight slot.

use crate::cache::{CacheEntry, CachedValue, FetchPlan, FetchResult, ResourceCache};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::ResourceService;
use reskit_common::{CacheKey, ResourceItem, ResourceKey};
use reskit_params::{ListParams, ParamsPatch};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// What a view sees for one read: last-known data, last error, and whether
/// a fetch is currently outstanding for this key.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub data: Option<CachedValue>,
    pub error: Option<ClientError>,
    pub is_loading: bool,
}

impl Snapshot {
    /// Snapshot of a disabled read (empty detail id, short search term)
    pub fn disabled() -> Self {
        Self::default()
    }

    fn from_entry(entry: CacheEntry, is_loading: bool) -> Self {
        Self {
            data: entry.value,
            error: entry.error,
            is_loading,
        }
    }

    /// Convenience accessor for list/search snapshots
    pub fn items(&self) -> Option<&[ResourceItem]> {
        self.data.as_ref().and_then(CachedValue::as_list)
    }

    /// Convenience accessor for detail snapshots
    pub fn item(&self) -> Option<&ResourceItem> {
        self.data.as_ref().and_then(CachedValue::as_detail)
    }
}

/// The service call backing one cache key
#[derive(Clone)]
enum ServiceCall {
    List(Option<String>),
    Detail(String),
}

/// Per-resource read handle over the shared cache
pub struct FetchCoordinator<S> {
    cache: Arc<ResourceCache>,
    service: Arc<S>,
    resource: ResourceKey,
    config: ClientConfig,
}

impl<S: ResourceService> FetchCoordinator<S> {
    pub fn new(
        cache: Arc<ResourceCache>,
        service: Arc<S>,
        resource: ResourceKey,
        config: ClientConfig,
    ) -> Self {
        Self {
            cache,
            service,
            resource,
            config,
        }
    }

    pub fn resource(&self) -> &ResourceKey {
        &self.resource
    }

    /// Fetch the collection under `(resource, list, query)`.
    pub async fn list(&self, query: Option<&str>) -> Snapshot {
        let key = CacheKey::list(self.resource.clone(), query.unwrap_or(""));
        let call = ServiceCall::List(query.map(str::to_string));
        self.read(key, self.config.list_stale(), call).await
    }

    /// Fetch one item under `(resource, detail, id)`. Disabled when `id` is
    /// empty.
    pub async fn detail(&self, id: &str) -> Snapshot {
        if id.is_empty() {
            return Snapshot::disabled();
        }

        let key = CacheKey::detail(self.resource.clone(), id);
        let call = ServiceCall::Detail(id.to_string());
        self.read(key, self.config.list_stale(), call).await
    }

    /// Server-side search; a list read keyed separately with a shorter
    /// freshness window. Disabled below the configured minimum term length
    /// to avoid noise fetches on every keystroke.
    pub async fn search(&self, term: &str) -> Snapshot {
        if term.chars().count() < self.config.min_search_length {
            return Snapshot::disabled();
        }

        let mut params = ListParams::default();
        params.apply(&ParamsPatch::new().search(term));
        let query = params.to_query_string(&ListParams::default());

        let key = CacheKey::search(self.resource.clone(), query.as_str());
        let call = ServiceCall::List(Some(query));
        self.read(key, self.config.search_stale(), call).await
    }

    async fn read(&self, key: CacheKey, stale_after: Duration, call: ServiceCall) -> Snapshot {
        match self.cache.begin_fetch(&key, stale_after).await {
            FetchPlan::Fresh(entry) => Snapshot::from_entry(entry, false),

            FetchPlan::Join { rx, entry } => {
                if entry.value.is_some() {
                    // Stale-but-present data is returned immediately while
                    // the leader's fetch runs
                    return Snapshot::from_entry(entry, true);
                }
                self.await_broadcast(rx, &key, entry).await
            }

            FetchPlan::Lead { rx, entry } => {
                // The fetch always runs as a detached task: a caller that
                // gives up mid-flight (timeout, select) must not leave the
                // in-flight slot wedged for later readers
                let cache = self.cache.clone();
                let service = self.service.clone();
                let timeout = self.config.timeout();
                let bg_key = key.clone();
                tokio::spawn(async move {
                    perform_fetch(cache, service, bg_key, call, timeout).await;
                });

                if entry.value.is_some() {
                    // Stale-while-revalidate: hand back the old value now,
                    // refresh in the background
                    return Snapshot::from_entry(entry, true);
                }
                self.await_broadcast(rx, &key, entry).await
            }
        }
    }

    /// Wait for the in-flight fetch on `key` and snapshot its outcome
    async fn await_broadcast(
        &self,
        mut rx: broadcast::Receiver<FetchResult>,
        key: &CacheKey,
        entry: CacheEntry,
    ) -> Snapshot {
        match rx.recv().await {
            // The entry now holds the recorded outcome, including a
            // retained value alongside any error
            Ok(_) => match self.cache.entry(key).await {
                Some(entry) => Snapshot::from_entry(entry, false),
                None => Snapshot::disabled(),
            },
            // Fetch task died without recording a result
            Err(_) => Snapshot {
                data: entry.value,
                error: Some(ClientError::Transport(
                    "in-flight fetch dropped".to_string(),
                )),
                is_loading: false,
            },
        }
    }
}

/// Run the service call, record the outcome, and wake joined callers.
async fn perform_fetch<S: ResourceService>(
    cache: Arc<ResourceCache>,
    service: Arc<S>,
    key: CacheKey,
    call: ServiceCall,
    timeout: Option<Duration>,
) {
    let fut = async {
        match &call {
            ServiceCall::List(query) => service
                .list(query.as_deref())
                .await
                .map(CachedValue::List)
                .map_err(ClientError::from),
            ServiceCall::Detail(id) => service
                .detail(id)
                .await
                .map(CachedValue::Detail)
                .map_err(ClientError::from),
        }
    };

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(limit)),
        },
        None => fut.await,
    };

    cache.complete_fetch(&key, result).await;
}
