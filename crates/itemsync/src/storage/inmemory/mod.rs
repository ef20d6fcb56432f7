//! In-memory storage backend.
//!
//! Keeps the table and a title index in HashMaps behind a single
//! `Arc<RwLock<_>>`. Data is not persisted and is lost when the store is
//! dropped, which makes it the backend used for local runs and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use itemsync::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::default();
//! let resolver = Resolver::new(Arc::new(store));
//! ```

mod repository;

pub use repository::InMemoryStore;
