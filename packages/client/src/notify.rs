//! Notification sink port.
//!
//! Mutation outcomes are user-visible: every create/update/delete produces
//! exactly one notification, success or failure. The sink is an injected
//! collaborator, never an ambient global, so the core stays testable
//! without a UI runtime.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// One user-facing toast-like message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: i64,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Where mutation outcomes are pushed for display
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Channel-backed sink; the receiving half is consumed as a stream by the
/// toast renderer (or collected by tests)
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, UnboundedReceiverStream<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UnboundedReceiverStream::new(rx))
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        // Receiver gone means nobody is rendering toasts anymore; drop it
        let _ = self.tx.send(Notification::new(kind, message));
    }
}

/// Sink that drops everything, for headless embeddings
pub struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn notify(&self, _kind: NotificationKind, _message: &str) {}
}
