//! In-memory table implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use workshops_core::keys::TableKey;
use workshops_core::storage::StoreError;

use crate::storage::conversions::item_key;
use crate::storage::{Item, Table};

/// In-memory table for local runs and testing.
///
/// Rows are kept ordered by `(partitionKey, sortKey)` in a `BTreeMap` wrapped
/// in `Arc<RwLock<_>>`, so a prefix query is a range scan like on the real
/// table. Data is not persisted and will be lost when the table is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    rows: Arc<RwLock<BTreeMap<TableKey, Item>>>,
}

impl InMemoryTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every row, in key order.
    #[cfg(test)]
    pub async fn rows(&self) -> Vec<Item> {
        self.rows.read().await.values().cloned().collect()
    }

    /// Writes a row bypassing any codec, e.g. to plant corrupt data.
    #[cfg(test)]
    pub async fn insert_raw(&self, item: Item) {
        if let Ok(key) = item_key(&item) {
            self.rows.write().await.insert(key, item);
        }
    }
}

#[async_trait]
impl Table for InMemoryTable {
    async fn get_item(&self, key: &TableKey) -> Result<Option<Item>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(key).cloned())
    }

    async fn query_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let start = TableKey {
            partition_key: partition_key.to_string(),
            sort_key: sort_key_prefix.to_string(),
        };

        let rows = self.rows.read().await;
        Ok(rows
            .range(start..)
            .take_while(|(key, _)| {
                key.partition_key == partition_key && key.sort_key.starts_with(sort_key_prefix)
            })
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?;
        let mut rows = self.rows.write().await;
        rows.insert(key, item);
        Ok(())
    }

    async fn create_item(&self, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?;
        let mut rows = self.rows.write().await;

        if rows.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                entity_type: "Item",
                id: key.to_string(),
            });
        }

        rows.insert(key, item);
        Ok(())
    }

    async fn delete_item(&self, key: &TableKey) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.remove(key);
        Ok(())
    }
}
