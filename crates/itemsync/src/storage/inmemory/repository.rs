//! In-memory item store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use itemsync_core::item::Item;
use itemsync_core::schema::KeySchema;
use itemsync_core::storage::{CollisionPolicy, ItemStore, Result, StorageError};

#[derive(Debug, Default)]
struct Table {
    items: HashMap<String, Item>,
    /// Title -> ids, in write order.
    by_title: HashMap<String, Vec<String>>,
}

impl Table {
    fn unindex(&mut self, item: &Item) {
        if let Some(ids) = self.by_title.get_mut(&item.title) {
            ids.retain(|id| id != &item.id);
            if ids.is_empty() {
                self.by_title.remove(&item.title);
            }
        }
    }
}

/// In-memory storage backend.
///
/// The table and its title index share one lock so a put is never visible in
/// one without the other.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    table: Arc<RwLock<Table>>,
    schema: KeySchema,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_schema(KeySchema::default())
    }
}

impl InMemoryStore {
    /// Creates a new empty store that reports the given table names.
    pub fn with_schema(schema: KeySchema) -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
            schema,
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn put(&self, item: &Item, policy: CollisionPolicy) -> Result<()> {
        let keys = self.schema.keys_of(item);
        let mut table = self.table.write().await;

        if let Some(existing) = table.items.get(keys.primary).cloned() {
            if policy == CollisionPolicy::Reject {
                return Err(StorageError::AlreadyExists {
                    id: keys.primary.to_string(),
                });
            }
            table.unindex(&existing);
        }

        table
            .by_title
            .entry(keys.secondary.to_string())
            .or_default()
            .push(keys.primary.to_string());
        table.items.insert(keys.primary.to_string(), item.clone());
        Ok(())
    }

    async fn get_by_primary(&self, id: &str) -> Result<Option<Item>> {
        let table = self.table.read().await;
        Ok(table.items.get(id).cloned())
    }

    async fn query_by_secondary(&self, value: &str) -> Result<Vec<Item>> {
        let table = self.table.read().await;
        let Some(ids) = table.by_title.get(value) else {
            return Ok(Vec::new());
        };

        ids.iter()
            .map(|id| {
                table.items.get(id).cloned().ok_or_else(|| {
                    StorageError::InvalidData(format!("Index entry without item: {id}"))
                })
            })
            .collect()
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        let table = self.table.read().await;
        Ok(table.items.values().cloned().collect())
    }
}
