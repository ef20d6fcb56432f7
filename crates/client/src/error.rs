//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the invocation with a resolver error.
    #[error("{error_type} ({status}): {message}")]
    Resolver {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },
}
