use thiserror::Error;

use crate::storage::{storage_error_to_status_code, StorageError};

use super::{ResultShape, TypeName};

/// Errors returned by the resolver.
///
/// `UnknownOperation` and `InvalidArgument` are raised before any storage call.
/// Storage failures are wrapped without modification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Unknown operation: {type_name}.{field_name}")]
    UnknownOperation {
        type_name: TypeName,
        field_name: String,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Storage response does not match result shape {expected}: got {actual}")]
    ShapeMismatch {
        expected: ResultShape,
        actual: &'static str,
    },
}

impl ResolverError {
    /// Stable name of the error condition, reported to callers as `errorType`.
    pub fn error_type(&self) -> &'static str {
        match self {
            ResolverError::UnknownOperation { .. } => "UnknownOperation",
            ResolverError::InvalidArgument(_) => "InvalidArgument",
            ResolverError::Storage(StorageError::AlreadyExists { .. }) => "AlreadyExists",
            ResolverError::Storage(StorageError::Unavailable(_)) => "StorageUnavailable",
            ResolverError::Storage(StorageError::RequestFailed(_)) => "StorageRequestFailed",
            ResolverError::Storage(StorageError::InvalidData(_)) => "InvalidData",
            ResolverError::ShapeMismatch { .. } => "ShapeMismatch",
        }
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - `UnknownOperation`, `InvalidArgument` -> 400 (Bad Request)
    /// - `Storage` -> see [`storage_error_to_status_code`]
    /// - `ShapeMismatch` -> 500 (Internal Server Error)
    pub fn status_code(&self) -> u16 {
        match self {
            ResolverError::UnknownOperation { .. } => 400,
            ResolverError::InvalidArgument(_) => 400,
            ResolverError::Storage(err) => storage_error_to_status_code(err),
            ResolverError::ShapeMismatch { .. } => 500,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ResolverError::InvalidArgument(message.into())
    }
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;
