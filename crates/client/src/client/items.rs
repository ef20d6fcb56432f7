//! Item operations.

use serde_json::{Map, Value};

use itemsync_core::item::{Item, ItemInput};
use itemsync_core::operation::{Invocation, Operation};

use super::ItemsyncClient;
use crate::error::Result;

/// Builds the invocation for an operation and its arguments.
///
/// Anything but a JSON object means no arguments. Arguments are validated by
/// the server.
pub fn invocation(operation: Operation, arguments: Value) -> Invocation {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Invocation::of(operation, arguments)
}

/// Invocation of `addItem` for an input.
pub fn add_item_invocation(input: &ItemInput) -> Invocation {
    let mut arguments = Map::new();
    arguments.insert("input".to_string(), Value::Object(input.to_argument()));
    Invocation::of(Operation::AddItem, arguments)
}

impl ItemsyncClient {
    /// List every item.
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        self.invoke(&invocation(Operation::ListItems, Value::Null))
            .await
    }

    /// Get every item with the given title.
    pub async fn get_item_by_title(&self, title: &str) -> Result<Vec<Item>> {
        self.invoke(&invocation(
            Operation::GetItemByTitle,
            serde_json::json!({ "title": title }),
        ))
        .await
    }

    /// Get an item by id, if it exists.
    pub async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        self.invoke(&invocation(
            Operation::GetItem,
            serde_json::json!({ "id": id }),
        ))
        .await
    }

    /// Add an item and return it with its id.
    pub async fn add_item(&self, input: &ItemInput) -> Result<Item> {
        self.invoke(&add_item_invocation(input)).await
    }
}
