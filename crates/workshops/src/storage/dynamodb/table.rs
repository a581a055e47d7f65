//! DynamoDB table implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use workshops_core::keys::{TableKey, PARTITION_KEY, SORT_KEY};
use workshops_core::storage::StoreError;

use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error};
use crate::storage::conversions::{item_key, key_to_item};
use crate::storage::{Item, Table};

/// DynamoDB-backed table.
///
/// The client is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct DynamoDbTable {
    client: Client,
    table_name: String,
}

impl DynamoDbTable {
    /// Creates a new table handle with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a table handle from the default AWS credential chain.
    ///
    /// `endpoint_url` overrides the service endpoint (e.g. DynamoDB Local).
    pub async fn connect(table_name: impl Into<String>, endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;

        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl Table for DynamoDbTable {
    async fn get_item(&self, key: &TableKey) -> Result<Option<Item>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_item(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn query_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut exclusive_start_key = None;

        // Follow LastEvaluatedKey until the result set is exhausted
        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#pk = :pk AND begins_with(#sk, :sk_prefix)")
                .expression_attribute_names("#pk", PARTITION_KEY)
                .expression_attribute_names("#sk", SORT_KEY)
                .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
                .expression_attribute_values(
                    ":sk_prefix",
                    AttributeValue::S(sort_key_prefix.to_string()),
                )
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            items.extend(result.items.unwrap_or_default());

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(
            table = %self.table_name,
            partition_key,
            sort_key_prefix,
            count = items.len(),
            "Queried rows by prefix"
        );

        Ok(items)
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, key.to_string()))?;

        Ok(())
    }

    async fn create_item(&self, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#sk)")
            .expression_attribute_names("#sk", SORT_KEY)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, key.to_string()))?;

        Ok(())
    }

    async fn delete_item(&self, key: &TableKey) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_item(key)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
