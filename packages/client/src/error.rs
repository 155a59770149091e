//! Error types for the client layer

use crate::service::ServiceError;
use std::time::Duration;
use thiserror::Error;

/// Client-layer error taxonomy.
///
/// Read failures are recorded on the cache entry and never panic past the
/// coordinator boundary; mutation failures are returned to the caller and
/// pushed to the notification sink, always both.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Operation invoked without a backing service function
    #[error("Operation not configured: {0}")]
    Configuration(String),

    /// Network or service failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload rejected by the service
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-call timeout elapsed before the service responded
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ServiceError> for ClientError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Transport(msg) => ClientError::Transport(msg),
            ServiceError::Validation(msg) => ClientError::Validation(msg),
            ServiceError::NotConfigured(op) => ClientError::Configuration(op.to_string()),
        }
    }
}

impl ClientError {
    /// True when the call never reached the network
    pub fn is_configuration(&self) -> bool {
        matches!(self, ClientError::Configuration(_))
    }
}
