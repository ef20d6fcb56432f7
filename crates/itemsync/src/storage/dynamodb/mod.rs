//! DynamoDB storage backend implementation.
//!
//! Items are stored one per record in the configured table, keyed by `id`,
//! with the secondary index partitioned on `title`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbStore;
