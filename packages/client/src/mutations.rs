//! # Mutation Coordinator
//!
//! Create/update/delete for one resource, keeping the shared cache
//! consistent and the user informed.
//!
//! ## Mutation Semantics
//!
//! - On success: every cache entry under the resource key is marked stale
//!   (lists, details, and searches alike, since an update can change values
//!   shown in any of them), exactly one success notification is emitted,
//!   and the matching callback runs
//! - On failure: exactly one error notification carries the service
//!   message, and the error is returned so the caller can branch
//! - Unconfigured operations fail with a configuration error before any
//!   network attempt
//! - Nothing is retried automatically; a retried `create` is expected to
//!   create a duplicate, which is a deliberate simplicity trade-off

use crate::cache::ResourceCache;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::notify::{NotificationKind, NotificationSink};
use crate::service::{ResourceService, ServiceError};
use reskit_common::{ResourceItem, ResourceKey};
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, Mutex};

type ItemCallback = Box<dyn Fn(&ResourceItem) + Send + Sync>;
type IdCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Caller hooks invoked after the cache and notifications are handled
#[derive(Default)]
pub struct MutationCallbacks {
    on_create: Option<ItemCallback>,
    on_update: Option<ItemCallback>,
    on_delete: Option<IdCallback>,
}

impl MutationCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(mut self, f: impl Fn(&ResourceItem) + Send + Sync + 'static) -> Self {
        self.on_create = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(&ResourceItem) + Send + Sync + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Receives the deleted id so the caller can drop it from any local
    /// selection
    pub fn on_delete(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Update,
    Delete,
}

/// Observable state of the three operations, for UI polling
#[derive(Debug, Clone, Default)]
struct MutationStatus {
    creating: bool,
    updating: bool,
    deleting: bool,
    create_error: Option<ClientError>,
    update_error: Option<ClientError>,
    delete_error: Option<ClientError>,
}

/// Per-resource write handle over the shared cache
pub struct MutationCoordinator<S> {
    cache: Arc<ResourceCache>,
    service: Arc<S>,
    resource: ResourceKey,
    notifier: Arc<dyn NotificationSink>,
    callbacks: MutationCallbacks,
    config: ClientConfig,
    status: Mutex<MutationStatus>,
}

impl<S: ResourceService> MutationCoordinator<S> {
    pub fn new(
        cache: Arc<ResourceCache>,
        service: Arc<S>,
        resource: ResourceKey,
        notifier: Arc<dyn NotificationSink>,
        config: ClientConfig,
    ) -> Self {
        Self {
            cache,
            service,
            resource,
            notifier,
            callbacks: MutationCallbacks::default(),
            config,
            status: Mutex::new(MutationStatus::default()),
        }
    }

    pub fn with_callbacks(mut self, callbacks: MutationCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Create an item and invalidate every cached read for this resource.
    pub async fn create(&self, payload: Value) -> Result<ResourceItem, ClientError> {
        self.begin(Operation::Create);
        let result = self
            .call(self.service.create(payload))
            .await;

        match &result {
            Ok(item) => {
                self.settle_success(Operation::Create).await;
                self.notifier.notify(
                    NotificationKind::Success,
                    &format!("Created {}", item.display_name()),
                );
                if let Some(cb) = &self.callbacks.on_create {
                    cb(item);
                }
            }
            Err(e) => self.settle_failure(Operation::Create, e),
        }

        result
    }

    /// Update an item; both list and detail entries for this resource are
    /// invalidated, since an update can change values shown in either.
    pub async fn update(&self, id: &str, payload: Value) -> Result<ResourceItem, ClientError> {
        self.begin(Operation::Update);
        let result = self
            .call(self.service.update(id, payload))
            .await;

        match &result {
            Ok(item) => {
                self.settle_success(Operation::Update).await;
                self.notifier.notify(
                    NotificationKind::Success,
                    &format!("Updated {}", item.display_name()),
                );
                if let Some(cb) = &self.callbacks.on_update {
                    cb(item);
                }
            }
            Err(e) => self.settle_failure(Operation::Update, e),
        }

        result
    }

    /// Delete an item; the id is passed to `on_delete` so callers can drop
    /// it from any local selection.
    pub async fn delete(&self, id: &str) -> Result<bool, ClientError> {
        self.begin(Operation::Delete);
        let result = self.call(self.service.delete(id)).await;

        match &result {
            Ok(_) => {
                self.settle_success(Operation::Delete).await;
                self.notifier
                    .notify(NotificationKind::Success, &format!("Deleted {}", id));
                if let Some(cb) = &self.callbacks.on_delete {
                    cb(id);
                }
            }
            Err(e) => self.settle_failure(Operation::Delete, e),
        }

        result
    }

    pub fn is_creating(&self) -> bool {
        self.status.lock().unwrap().creating
    }

    pub fn is_updating(&self) -> bool {
        self.status.lock().unwrap().updating
    }

    pub fn is_deleting(&self) -> bool {
        self.status.lock().unwrap().deleting
    }

    pub fn create_error(&self) -> Option<ClientError> {
        self.status.lock().unwrap().create_error.clone()
    }

    pub fn update_error(&self) -> Option<ClientError> {
        self.status.lock().unwrap().update_error.clone()
    }

    pub fn delete_error(&self) -> Option<ClientError> {
        self.status.lock().unwrap().delete_error.clone()
    }

    /// Run a service call under the configured per-call timeout
    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ClientError> {
        match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result.map_err(ClientError::from),
                Err(_) => Err(ClientError::Timeout(limit)),
            },
            None => fut.await.map_err(ClientError::from),
        }
    }

    fn begin(&self, op: Operation) {
        let mut status = self.status.lock().unwrap();
        match op {
            Operation::Create => {
                status.creating = true;
                status.create_error = None;
            }
            Operation::Update => {
                status.updating = true;
                status.update_error = None;
            }
            Operation::Delete => {
                status.deleting = true;
                status.delete_error = None;
            }
        }
    }

    async fn settle_success(&self, op: Operation) {
        let touched = self.cache.invalidate_resource(&self.resource).await;
        tracing::debug!(
            resource = %self.resource,
            op = ?op,
            invalidated = touched,
            "mutation succeeded"
        );

        let mut status = self.status.lock().unwrap();
        match op {
            Operation::Create => status.creating = false,
            Operation::Update => status.updating = false,
            Operation::Delete => status.deleting = false,
        }
    }

    fn settle_failure(&self, op: Operation, error: &ClientError) {
        tracing::warn!(resource = %self.resource, op = ?op, error = %error, "mutation failed");
        self.notifier
            .notify(NotificationKind::Error, &error.to_string());

        let mut status = self.status.lock().unwrap();
        match op {
            Operation::Create => {
                status.creating = false;
                status.create_error = Some(error.clone());
            }
            Operation::Update => {
                status.updating = false;
                status.update_error = Some(error.clone());
            }
            Operation::Delete => {
                status.deleting = false;
                status.delete_error = Some(error.clone());
            }
        }
    }
}
