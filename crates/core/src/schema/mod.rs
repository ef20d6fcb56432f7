//! Key schema for the item table.
//!
//! Two access paths exist: the primary key (`id`, unique) and one global
//! secondary index on `title` (non-unique). Primary key values are generated
//! here when the caller does not supply one.

mod ids;
mod keys;

pub use ids::{IdGenerator, UuidGenerator};
pub use keys::{
    stack_prefix, ItemKeys, KeySchema, CREATION_FIELDS, DEFAULT_STACK_NAME,
    PRIMARY_KEY_ATTRIBUTE, SECONDARY_KEY_ATTRIBUTE,
};
