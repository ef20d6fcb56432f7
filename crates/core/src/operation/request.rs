//! Storage requests produced by the resolver.
//!
//! A request is store-agnostic data. [`StorageRequest::render`] turns it into
//! the DynamoDB resolver request document it corresponds to, which is what gets
//! logged and returned by the explain endpoint.

use serde_json::{json, Map, Value};

use crate::item::Item;
use crate::schema::KeySchema;
use crate::storage::CollisionPolicy;

/// Version tag of the rendered request documents.
const REQUEST_DOCUMENT_VERSION: &str = "2017-02-28";

/// The single storage call an invocation resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageRequest {
    /// Scan the whole table, no filter.
    Scan,
    /// Get one item by primary key.
    GetByPrimary { id: String },
    /// Equality query on the secondary index.
    QueryBySecondary { value: String },
    /// Put the item keyed by its `id`.
    Put { item: Item, policy: CollisionPolicy },
}

impl StorageRequest {
    /// Short name of the storage primitive.
    pub fn primitive(&self) -> &'static str {
        match self {
            StorageRequest::Scan => "Scan",
            StorageRequest::GetByPrimary { .. } => "GetItem",
            StorageRequest::QueryBySecondary { .. } => "Query",
            StorageRequest::Put { .. } => "PutItem",
        }
    }

    /// Renders the request as a DynamoDB resolver request document.
    pub fn render(&self, schema: &KeySchema) -> Value {
        let mut document = json!({
            "version": REQUEST_DOCUMENT_VERSION,
            "operation": self.primitive(),
            "tableName": schema.table_name,
        });

        match self {
            StorageRequest::Scan => {}
            StorageRequest::GetByPrimary { id } => {
                document["key"] = json!({ schema.partition_key(): { "S": id } });
            }
            StorageRequest::QueryBySecondary { value } => {
                let attribute = schema.index_partition_key();
                document["index"] = json!(schema.index_name);
                document["query"] = json!({
                    "expression": format!("#{attribute} = :{attribute}"),
                    "expressionNames": { format!("#{attribute}"): attribute },
                    "expressionValues": { format!(":{attribute}"): { "S": value } },
                });
            }
            StorageRequest::Put { item, policy } => {
                let key = schema.partition_key();
                document["key"] = json!({ key: { "S": item.id } });

                let mut values = Map::new();
                values.insert(
                    schema.index_partition_key().to_string(),
                    json!({ "S": item.title }),
                );
                for (name, value) in &item.fields {
                    values.insert(name.clone(), typed_value(value));
                }
                document["attributeValues"] = Value::Object(values);

                if *policy == CollisionPolicy::Reject {
                    document["condition"] = json!({
                        "expression": format!("attribute_not_exists(#{key})"),
                        "expressionNames": { format!("#{key}"): key },
                    });
                }
            }
        }

        document
    }
}

/// Converts a JSON value into DynamoDB's typed JSON notation.
///
/// Numbers are carried as strings under `N`, as the wire format requires.
fn typed_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "NULL": true }),
        Value::Bool(b) => json!({ "BOOL": b }),
        Value::Number(n) => json!({ "N": n.to_string() }),
        Value::String(s) => json!({ "S": s }),
        Value::Array(values) => json!({ "L": values.iter().map(typed_value).collect::<Vec<_>>() }),
        Value::Object(map) => {
            let typed: Map<String, Value> = map
                .iter()
                .map(|(name, value)| (name.clone(), typed_value(value)))
                .collect();
            json!({ "M": typed })
        }
    }
}
