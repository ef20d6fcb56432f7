//! itemsync_core - functional core for the itemsync resolver service.
//!
//! Maps a small set of caller-facing operations (`listItems`, `getItemByTitle`,
//! `getItem`, `addItem`) onto the four primitives of a key-value store: put by
//! primary key, get by primary key, query on the secondary index, and full scan.
//!
//! - [`item`] - The stored record and its creation input.
//! - [`schema`] - Key schema (primary key, secondary index) and id generation.
//! - [`operation`] - Operation descriptors, resolver, and result shaper.
//! - [`storage`] - The `ItemStore` trait and storage errors.

pub mod item;
pub mod operation;
pub mod schema;
pub mod storage;
