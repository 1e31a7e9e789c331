//! Error types for the zone backup core library.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the zone backup library.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot document failed structural validation
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Snapshot not found in storage
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// Snapshot domain does not match the target zone's domain
    #[error("Domain mismatch: snapshot is for '{expected}' but target zone is '{actual}'")]
    DomainMismatch { expected: String, actual: String },

    /// Record store (DNS provider) error
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A change batch failed after retries; earlier batches remain applied
    #[error("Batch apply failed after {applied}/{total} batches: {source}")]
    BatchApply {
        /// Batches fully applied before the failure
        applied: usize,
        /// Total batches in the plan
        total: usize,
        source: ProviderError,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the run aborted before any write was attempted.
    ///
    /// Callers use this to map errors to a distinct validation-failure
    /// exit status. `BatchApply` is deliberately not in this set.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MalformedSnapshot(_)
                | Error::SnapshotNotFound(_)
                | Error::DomainMismatch { .. }
        )
    }
}

/// Record-store specific errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// Hosted zone does not exist
    #[error("Hosted zone not found: {0}")]
    ZoneNotFound(String),

    /// Request was throttled by the provider
    #[error("Throttled: {0}")]
    Throttling(String),

    /// The change batch was rejected as a whole
    #[error("Change batch rejected: {0}")]
    InvalidChangeBatch(String),

    /// Provider API error response
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Transport-level failure
    #[error("Connection error: {0}")]
    Connection(String),
}

impl ProviderError {
    /// Throttling-class failures are retried with backoff; everything
    /// else fails the batch immediately.
    pub fn is_throttling(&self) -> bool {
        matches!(self, ProviderError::Throttling(_))
    }
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Storage backend error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
