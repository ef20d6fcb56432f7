//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ItemStore` trait
//! defined in `itemsync_core::storage`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local store, nothing is persisted
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p itemsync
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p itemsync --no-default-features --features dynamodb
//! ```

use std::sync::Arc;

use itemsync_core::storage::ItemStore;

use crate::config::Config;

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p itemsync --features inmemory"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

/// Name of the compiled-in backend.
#[cfg(feature = "inmemory")]
pub const BACKEND: &str = "inmemory";

/// Name of the compiled-in backend.
#[cfg(feature = "dynamodb")]
pub const BACKEND: &str = "dynamodb";

/// Creates the compiled-in store for the configured table.
#[cfg(feature = "inmemory")]
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn ItemStore>> {
    Ok(Arc::new(InMemoryStore::with_schema(config.key_schema())))
}

/// Creates the compiled-in store for the configured table.
#[cfg(feature = "dynamodb")]
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn ItemStore>> {
    Ok(Arc::new(DynamoDbStore::from_env(config.key_schema()).await))
}
