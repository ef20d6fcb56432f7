//! DynamoDB item store implementation.
//!
//! Implements `ItemStore` from `itemsync_core::storage` with one DynamoDB call
//! per trait method. Paginated responses are not followed: only the first page
//! is returned and a warning is logged.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use itemsync_core::item::Item;
use itemsync_core::schema::KeySchema;
use itemsync_core::storage::{CollisionPolicy, ItemStore, Result};

use super::conversions::{item_to_record, record_to_item, Record};
use super::error::{map_get_item_error, map_put_item_error, map_query_error, map_scan_error};

/// DynamoDB-based item store.
pub struct DynamoDbStore {
    client: Client,
    schema: KeySchema,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and key schema.
    pub fn new(client: Client, schema: KeySchema) -> Self {
        Self { client, schema }
    }

    /// Creates a new store using the AWS SDK default credential chain.
    pub async fn from_env(schema: KeySchema) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), schema)
    }
}

fn placeholder(attribute: &str) -> String {
    format!("#{attribute}")
}

fn records_to_items(records: Option<Vec<Record>>) -> Result<Vec<Item>> {
    records.unwrap_or_default().iter().map(record_to_item).collect()
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn put(&self, item: &Item, policy: CollisionPolicy) -> Result<()> {
        let key = self.schema.partition_key();
        let mut request = self
            .client
            .put_item()
            .table_name(&self.schema.table_name)
            .set_item(Some(item_to_record(item)));

        if policy == CollisionPolicy::Reject {
            request = request
                .condition_expression(format!("attribute_not_exists({})", placeholder(key)))
                .expression_attribute_names(placeholder(key), key);
        }

        request
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &item.id))?;

        Ok(())
    }

    async fn get_by_primary(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.schema.table_name)
            .key(self.schema.partition_key(), AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(record) => Ok(Some(record_to_item(&record)?)),
            None => Ok(None),
        }
    }

    async fn query_by_secondary(&self, value: &str) -> Result<Vec<Item>> {
        let attribute = self.schema.index_partition_key();
        let value_placeholder = format!(":{attribute}");

        let result = self
            .client
            .query()
            .table_name(&self.schema.table_name)
            .index_name(&self.schema.index_name)
            .key_condition_expression(format!(
                "{} = {}",
                placeholder(attribute),
                value_placeholder
            ))
            .expression_attribute_names(placeholder(attribute), attribute)
            .expression_attribute_values(value_placeholder, AttributeValue::S(value.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                index = %self.schema.index_name,
                "Query result truncated, only the first page is returned"
            );
        }

        records_to_items(result.items)
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        let result = self
            .client
            .scan()
            .table_name(&self.schema.table_name)
            .send()
            .await
            .map_err(map_scan_error)?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %self.schema.table_name,
                "Scan result truncated, only the first page is returned"
            );
        }

        records_to_items(result.items)
    }
}
