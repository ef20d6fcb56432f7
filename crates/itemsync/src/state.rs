use std::{sync::Arc, time::Duration};

use itemsync_core::operation::Resolver;
use itemsync_core::schema::KeySchema;
use itemsync_core::storage::ItemStore;

use crate::config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resolver bound to the configured store.
    pub resolver: Resolver,
    /// Table and index names, used to render storage requests.
    pub schema: Arc<KeySchema>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates the state for a store and configuration.
    pub fn new(store: Arc<dyn ItemStore>, config: &Config) -> Self {
        Self {
            resolver: Resolver::new(store).with_collision_policy(config.collision_policy),
            schema: Arc::new(config.key_schema()),
            request_timeout: config.request_timeout(),
        }
    }
}

#[cfg(feature = "inmemory")]
impl Default for AppState {
    fn default() -> Self {
        let config = Config::default();
        let store = crate::storage::InMemoryStore::with_schema(config.key_schema());
        Self::new(Arc::new(store), &config)
    }
}
