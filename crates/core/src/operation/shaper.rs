//! Result shaping.
//!
//! Pure functions that turn a raw storage response into the shape the
//! operation declares. A response of the wrong kind is an error, never a
//! partially shaped result.

use serde::Serialize;

use crate::item::Item;

use super::descriptor::ResultShape;
use super::error::{ResolverError, Result};

/// Raw response of a storage call.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageResponse {
    /// Scan or query results, in storage order.
    Items(Vec<Item>),
    /// Get-item result.
    Item(Option<Item>),
    /// The item a put wrote.
    Written(Item),
}

impl StorageResponse {
    fn kind(&self) -> &'static str {
        match self {
            StorageResponse::Items(_) => "item list",
            StorageResponse::Item(_) => "item lookup",
            StorageResponse::Written(_) => "written item",
        }
    }
}

/// Caller-facing result of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationResult {
    Items(Vec<Item>),
    Item(Item),
    /// Serializes as `null` when absent.
    MaybeItem(Option<Item>),
}

impl OperationResult {
    /// Returns the item list, if this is a list result.
    pub fn into_items(self) -> Option<Vec<Item>> {
        match self {
            OperationResult::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the single item, if this is a single-item result.
    pub fn into_item(self) -> Option<Item> {
        match self {
            OperationResult::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the lookup result, if this is an optional-item result.
    pub fn into_maybe_item(self) -> Option<Option<Item>> {
        match self {
            OperationResult::MaybeItem(item) => Some(item),
            _ => None,
        }
    }

    /// Number of items carried by the result.
    pub fn len(&self) -> usize {
        match self {
            OperationResult::Items(items) => items.len(),
            OperationResult::Item(_) => 1,
            OperationResult::MaybeItem(item) => usize::from(item.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shapes a storage response according to the declared result shape.
///
/// Written items are returned as-is, without re-reading storage. List order is
/// whatever storage returned.
pub fn shape(expected: ResultShape, response: StorageResponse) -> Result<OperationResult> {
    match (expected, response) {
        (ResultShape::List, StorageResponse::Items(items)) => Ok(OperationResult::Items(items)),
        (ResultShape::Item, StorageResponse::Written(item)) => Ok(OperationResult::Item(item)),
        (ResultShape::OptionalItem, StorageResponse::Item(item)) => {
            Ok(OperationResult::MaybeItem(item))
        }
        (expected, response) => Err(ResolverError::ShapeMismatch {
            expected,
            actual: response.kind(),
        }),
    }
}
