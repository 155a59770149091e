//! # Shared Resource Cache
//!
//! One cache per application, constructed explicitly and shared between
//! coordinators via `Arc` so two independent views requesting the same key
//! observe the same entry and each other's invalidations.
//!
//! ## Invariants
//!
//! - At most one in-flight fetch per exact key: later identical requests
//!   subscribe to the leader's broadcast instead of hitting the service
//! - Distinct params never share an entry
//! - A failed fetch records the error but keeps the last-known value
//! - Invalidation marks entries stale without dropping their values, so
//!   views keep showing data while the refetch runs

use crate::error::ClientError;
use reskit_common::{CacheKey, ResourceItem, ResourceKey};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, Mutex};

/// Payload of one cache entry
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    List(Vec<ResourceItem>),
    Detail(Option<ResourceItem>),
}

impl CachedValue {
    pub fn as_list(&self) -> Option<&[ResourceItem]> {
        match self {
            CachedValue::List(items) => Some(items),
            CachedValue::Detail(_) => None,
        }
    }

    pub fn as_detail(&self) -> Option<&ResourceItem> {
        match self {
            CachedValue::Detail(item) => item.as_ref(),
            CachedValue::List(_) => None,
        }
    }
}

/// Cached state for one `(resource, op, params)` key
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last-fetched value; retained across failures and invalidations
    pub value: Option<CachedValue>,

    /// Last fetch error, cleared by the next successful fetch
    pub error: Option<ClientError>,

    /// When the value was fetched; `None` marks the entry stale
    pub fetched_at: Option<Instant>,

    /// Freshness window after which a read triggers a background refetch
    pub stale_after: Duration,
}

impl CacheEntry {
    fn empty(stale_after: Duration) -> Self {
        Self {
            value: None,
            error: None,
            fetched_at: None,
            stale_after,
        }
    }

    /// Fresh entries are served without touching the service
    pub fn is_fresh(&self) -> bool {
        match (&self.value, self.fetched_at) {
            (Some(_), Some(at)) => at.elapsed() < self.stale_after,
            _ => false,
        }
    }
}

pub(crate) type FetchResult = Result<CachedValue, ClientError>;

/// What a caller should do for a given key right now
pub(crate) enum FetchPlan {
    /// Entry is fresh, use it as-is
    Fresh(CacheEntry),

    /// Another caller is already fetching this key; subscribe to its result
    Join {
        rx: broadcast::Receiver<FetchResult>,
        entry: CacheEntry,
    },

    /// This caller leads the fetch; a broadcast slot has been registered
    /// and the caller holds its own receiver so the fetch can run detached
    Lead {
        rx: broadcast::Receiver<FetchResult>,
        entry: CacheEntry,
    },
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    in_flight: HashMap<CacheKey, broadcast::Sender<FetchResult>>,
}

/// Process-wide read cache, keyed by resource + operation + params.
///
/// Always constructed explicitly (never a hidden module global) so tests
/// can instantiate isolated caches.
pub struct ResourceCache {
    inner: Mutex<CacheInner>,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
            }),
        }
    }

    /// Snapshot of one entry, if present
    pub async fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.inner.lock().await.entries.get(key).cloned()
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }

    /// Mark every entry under `resource` stale. Values are retained so
    /// views keep rendering while refetches run. Returns the number of
    /// entries touched.
    pub async fn invalidate_resource(&self, resource: &ResourceKey) -> usize {
        let mut inner = self.inner.lock().await;
        let mut touched = 0;

        for (key, entry) in inner.entries.iter_mut() {
            if key.is_under(resource) {
                entry.fetched_at = None;
                touched += 1;
            }
        }

        tracing::debug!(resource = %resource, entries = touched, "cache invalidated");
        touched
    }

    /// Drop everything, including staleness bookkeeping
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
    }

    /// Decide atomically whether a read for `key` is served from cache,
    /// joins the in-flight fetch, or leads a new one.
    pub(crate) async fn begin_fetch(&self, key: &CacheKey, stale_after: Duration) -> FetchPlan {
        let mut inner = self.inner.lock().await;

        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::empty(stale_after))
            .clone();

        if entry.is_fresh() {
            tracing::debug!(key = %key, "cache hit");
            return FetchPlan::Fresh(entry);
        }

        if let Some(tx) = inner.in_flight.get(key) {
            tracing::debug!(key = %key, "joining in-flight fetch");
            return FetchPlan::Join {
                rx: tx.subscribe(),
                entry,
            };
        }

        let (tx, rx) = broadcast::channel(1);
        inner.in_flight.insert(key.clone(), tx);
        tracing::debug!(key = %key, stale = entry.value.is_some(), "leading fetch");
        FetchPlan::Lead { rx, entry }
    }

    /// Record a completed fetch and wake any joined callers.
    ///
    /// Results land in their own key in completion order; a response for a
    /// key nobody reads anymore is written and simply never looked at.
    pub(crate) async fn complete_fetch(&self, key: &CacheKey, result: FetchResult) {
        let mut inner = self.inner.lock().await;

        let stale_after = inner
            .entries
            .get(key)
            .map(|e| e.stale_after)
            .unwrap_or_default();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::empty(stale_after));

        match &result {
            Ok(value) => {
                entry.value = Some(value.clone());
                entry.error = None;
                entry.fetched_at = Some(Instant::now());
            }
            Err(e) => {
                // Keep the last-known value so the UI can show stale data
                // alongside the error indicator
                entry.error = Some(e.clone());
                entry.fetched_at = None;
                tracing::warn!(key = %key, error = %e, "fetch failed");
            }
        }

        if let Some(tx) = inner.in_flight.remove(key) {
            // No receivers is fine; the leader may have been alone
            let _ = tx.send(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(params: &str) -> CacheKey {
        CacheKey::list(ResourceKey::new("events"), params)
    }

    fn list_value(ids: &[&str]) -> CachedValue {
        CachedValue::List(ids.iter().map(|id| ResourceItem::bare(*id)).collect())
    }

    #[tokio::test]
    async fn test_lead_then_fresh() {
        let cache = ResourceCache::new();
        let k = key("");

        match cache.begin_fetch(&k, Duration::from_secs(60)).await {
            FetchPlan::Lead { entry, .. } => assert!(entry.value.is_none()),
            _ => panic!("expected to lead"),
        }
        cache.complete_fetch(&k, Ok(list_value(&["a"]))).await;

        match cache.begin_fetch(&k, Duration::from_secs(60)).await {
            FetchPlan::Fresh(entry) => {
                assert_eq!(entry.value, Some(list_value(&["a"])));
                assert!(entry.error.is_none());
            }
            _ => panic!("expected fresh entry"),
        }
    }

    #[tokio::test]
    async fn test_second_caller_joins_in_flight() {
        let cache = ResourceCache::new();
        let k = key("page=2");

        let first = cache.begin_fetch(&k, Duration::from_secs(60)).await;
        assert!(matches!(first, FetchPlan::Lead { .. }));

        let second = cache.begin_fetch(&k, Duration::from_secs(60)).await;
        let mut rx = match second {
            FetchPlan::Join { rx, .. } => rx,
            _ => panic!("expected to join"),
        };

        cache.complete_fetch(&k, Ok(list_value(&["a", "b"]))).await;
        let received = rx.recv().await.unwrap();
        assert_eq!(received, Ok(list_value(&["a", "b"])));
    }

    #[tokio::test]
    async fn test_distinct_params_do_not_share_entries() {
        let cache = ResourceCache::new();

        let first = cache.begin_fetch(&key("page=1"), Duration::from_secs(60)).await;
        let second = cache.begin_fetch(&key("page=2"), Duration::from_secs(60)).await;

        assert!(matches!(first, FetchPlan::Lead { .. }));
        assert!(matches!(second, FetchPlan::Lead { .. }));
    }

    #[tokio::test]
    async fn test_failure_keeps_last_value() {
        let cache = ResourceCache::new();
        let k = key("");

        cache.begin_fetch(&k, Duration::from_secs(60)).await;
        cache.complete_fetch(&k, Ok(list_value(&["a"]))).await;

        cache.invalidate_resource(&ResourceKey::new("events")).await;
        cache.begin_fetch(&k, Duration::from_secs(60)).await;
        cache
            .complete_fetch(&k, Err(ClientError::Transport("boom".to_string())))
            .await;

        let entry = cache.entry(&k).await.unwrap();
        assert_eq!(entry.value, Some(list_value(&["a"])));
        assert!(entry.error.is_some());
        assert!(!entry.is_fresh());
    }

    #[tokio::test]
    async fn test_invalidation_scoped_by_resource() {
        let cache = ResourceCache::new();
        let events = key("");
        let profiles = CacheKey::list(ResourceKey::new("profiles"), "");

        for k in [&events, &profiles] {
            cache.begin_fetch(k, Duration::from_secs(60)).await;
            cache.complete_fetch(k, Ok(list_value(&["x"]))).await;
        }

        let touched = cache.invalidate_resource(&ResourceKey::new("events")).await;
        assert_eq!(touched, 1);

        assert!(!cache.entry(&events).await.unwrap().is_fresh());
        assert!(cache.entry(&profiles).await.unwrap().is_fresh());
    }
}
