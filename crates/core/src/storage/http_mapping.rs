//! Pure functions for mapping storage errors to HTTP status codes.

use super::StorageError;

/// Maps a [`StorageError`] to an HTTP status code.
///
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `RequestFailed` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use itemsync_core::storage::{storage_error_to_status_code, StorageError};
///
/// let error = StorageError::Unavailable("throttled".to_string());
/// assert_eq!(storage_error_to_status_code(&error), 503);
/// ```
pub fn storage_error_to_status_code(error: &StorageError) -> u16 {
    match error {
        StorageError::AlreadyExists { .. } => 409,
        StorageError::Unavailable(_) => 503,
        StorageError::RequestFailed(_) => 500,
        StorageError::InvalidData(_) => 500,
    }
}
