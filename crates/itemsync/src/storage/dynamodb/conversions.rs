//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! items. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use itemsync_core::item::Item;
use itemsync_core::schema::{PRIMARY_KEY_ATTRIBUTE, SECONDARY_KEY_ATTRIBUTE};
use itemsync_core::storage::StorageError;

pub type Record = HashMap<String, AttributeValue>;

// ============================================================================
// Item conversions
// ============================================================================

/// Convert an Item to a DynamoDB record.
///
/// Key attributes are written as strings; every other field keeps its JSON
/// type.
pub fn item_to_record(item: &Item) -> Record {
    let mut record: Record = item
        .fields
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect();

    record.insert(
        PRIMARY_KEY_ATTRIBUTE.to_string(),
        AttributeValue::S(item.id.clone()),
    );
    record.insert(
        SECONDARY_KEY_ATTRIBUTE.to_string(),
        AttributeValue::S(item.title.clone()),
    );

    record
}

/// Convert a DynamoDB record to an Item.
pub fn record_to_item(record: &Record) -> Result<Item, StorageError> {
    let mut fields = Map::new();
    for (name, value) in record {
        if name == PRIMARY_KEY_ATTRIBUTE || name == SECONDARY_KEY_ATTRIBUTE {
            continue;
        }
        fields.insert(name.clone(), from_attribute_value(value)?);
    }

    Ok(Item {
        id: get_string(record, PRIMARY_KEY_ATTRIBUTE)?,
        title: get_string(record, SECONDARY_KEY_ATTRIBUTE)?,
        fields,
    })
}

// ============================================================================
// Value conversions
// ============================================================================

/// Convert a JSON value to an AttributeValue.
pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute_value).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

/// Convert an AttributeValue to a JSON value.
///
/// String and number sets become arrays. Binary attributes are rejected.
pub fn from_attribute_value(value: &AttributeValue) -> Result<Value, StorageError> {
    match value {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::L(values) => values
            .iter()
            .map(from_attribute_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .iter()
            .map(|(name, value)| Ok((name.clone(), from_attribute_value(value)?)))
            .collect::<Result<Map<_, _>, StorageError>>()
            .map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(StorageError::InvalidData(
            "Binary attributes are not supported".to_string(),
        )),
        other => Err(StorageError::InvalidData(format!(
            "Unsupported attribute value: {:?}",
            other
        ))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(record: &Record, key: &str) -> Result<String, StorageError> {
    record
        .get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StorageError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Parse a DynamoDB number, preferring integers.
fn parse_number(n: &str) -> Result<Value, StorageError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::Number(i.into()));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::Number(u.into()));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StorageError::InvalidData(format!("Invalid number: {}", n)))
}
