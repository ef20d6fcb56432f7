use thiserror::Error;

/// Errors reported by an [`ItemStore`](super::ItemStore) backend.
///
/// The resolver passes these through to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A put under [`CollisionPolicy::Reject`](super::CollisionPolicy::Reject)
    /// hit an existing primary key.
    #[error("Item already exists: {id}")]
    AlreadyExists { id: String },
    /// Timeout, throttling, or connectivity failure.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage request failed: {0}")]
    RequestFailed(String),
    /// A stored record could not be decoded into an item.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
