use async_trait::async_trait;

use crate::item::Item;

use super::{CollisionPolicy, Result};

/// The four storage primitives the resolver issues.
///
/// Each resolver invocation makes exactly one of these calls.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes an item keyed by its `id`.
    async fn put(&self, item: &Item, policy: CollisionPolicy) -> Result<()>;

    /// Gets an item by its primary key.
    async fn get_by_primary(&self, id: &str) -> Result<Option<Item>>;

    /// Gets every item whose secondary key (`title`) equals `value`.
    ///
    /// Bounded like [`ItemStore::scan_all`].
    async fn query_by_secondary(&self, value: &str) -> Result<Vec<Item>>;

    /// Returns the entire collection.
    ///
    /// Each call is a single request, so a backend that pages its results
    /// returns only the first page. A DynamoDB page holds at most 1 MB, and the
    /// DynamoDB store logs a warning when it truncates.
    async fn scan_all(&self) -> Result<Vec<Item>>;
}
