use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{PRIMARY_KEY_ATTRIBUTE, SECONDARY_KEY_ATTRIBUTE};

/// A stored record: a unique primary identifier, the indexed `title`, and any
/// caller-supplied fields captured at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    /// Remaining attributes, stored verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Creates an item with no extra fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: Map::new(),
        }
    }

    /// Builds the item written for `input` under the given primary key.
    ///
    /// A caller-supplied `input.id` is discarded in favor of `id`; the resolver
    /// is responsible for deciding which one wins.
    pub fn from_input(id: impl Into<String>, input: ItemInput) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            fields: input.fields,
        }
    }

    /// Sets an attribute. `id` and `title` set the key fields.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            PRIMARY_KEY_ATTRIBUTE => self.id = key_string(value),
            SECONDARY_KEY_ATTRIBUTE => self.title = key_string(value),
            _ => {
                self.fields.insert(name, value);
            }
        }
        self
    }

    /// Returns the full attribute set, key attributes included.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attributes = self.fields.clone();
        attributes.insert(
            PRIMARY_KEY_ATTRIBUTE.to_string(),
            Value::String(self.id.clone()),
        );
        attributes.insert(
            SECONDARY_KEY_ATTRIBUTE.to_string(),
            Value::String(self.title.clone()),
        );
        attributes
    }
}

/// Input accepted by `addItem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    /// Caller-chosen primary key. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ItemInput {
    /// Creates an input with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            fields: Map::new(),
        }
    }

    /// Sets a caller-chosen primary key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an attribute. `id` and `title` set the key fields.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            PRIMARY_KEY_ATTRIBUTE => self.id = Some(key_string(value)),
            SECONDARY_KEY_ATTRIBUTE => self.title = key_string(value),
            _ => {
                self.fields.insert(name, value);
            }
        }
        self
    }

    /// Returns the `addItem` argument object.
    ///
    /// Key fields are written last so a stray `id` or `title` entry in
    /// `fields` never replaces them.
    pub fn to_argument(&self) -> Map<String, Value> {
        let mut argument = self.fields.clone();
        argument.remove(PRIMARY_KEY_ATTRIBUTE);
        if let Some(id) = &self.id {
            argument.insert(PRIMARY_KEY_ATTRIBUTE.to_string(), Value::String(id.clone()));
        }
        argument.insert(
            SECONDARY_KEY_ATTRIBUTE.to_string(),
            Value::String(self.title.clone()),
        );
        argument
    }
}

fn key_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
