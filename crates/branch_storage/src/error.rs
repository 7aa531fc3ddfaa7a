//! Error types for storage operations.

use crate::kind::BackendKind;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for calls into a host port.
pub type HostResult<T> = Result<T, HostError>;

/// A failure reported by a host storage object.
///
/// Hosts do not know which backend they serve; adapters attach that when
/// converting into [`StorageError::Host`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    /// Creates a host error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur during storage operations.
///
/// Reads never produce an error: a missing key is `None`, and a failing host
/// read is logged and treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A call into the host storage object failed.
    #[error("{backend} host error: {message}")]
    Host {
        /// Backend whose host rejected the call.
        backend: BackendKind,
        /// Host-provided description (exception name, quota message, ...).
        message: String,
    },

    /// The cookie name is empty; browsers read `=value` as a nameless cookie.
    #[error("invalid cookie name: {0:?}")]
    InvalidCookieName(String),

    /// A backend preference token was not recognized.
    #[error("unknown backend: {0:?}")]
    UnknownBackend(String),

    /// The availability probe rejected a candidate backend.
    #[error("{backend} probe failed: {reason}")]
    ProbeFailed {
        /// The candidate that was probed.
        backend: BackendKind,
        /// Why the round trip was rejected.
        reason: String,
    },

    /// No candidate was usable and the in-memory fallback was disabled.
    #[error("no usable storage backend (tried: {tried:?})")]
    NoUsableBackend {
        /// Candidates that were probed, in order.
        tried: Vec<BackendKind>,
    },
}

impl StorageError {
    /// Creates a host error for the given backend.
    pub fn host(backend: BackendKind, message: impl Into<String>) -> Self {
        Self::Host {
            backend,
            message: message.into(),
        }
    }

    /// Wraps a host failure with the backend it came from.
    pub fn from_host(backend: BackendKind, err: HostError) -> Self {
        Self::host(backend, err.0)
    }

    /// Creates a probe failure for the given backend.
    pub fn probe_failed(backend: BackendKind, reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            backend,
            reason: reason.into(),
        }
    }
}
