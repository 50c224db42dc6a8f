//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend cannot be used at all (disabled, not opened).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the backend's capacity.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Failed to encode or decode a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be represented by this backend.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure.
    #[error("Store operation failed: {0}")]
    Backend(String),
}
