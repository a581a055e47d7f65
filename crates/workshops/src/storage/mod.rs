//! Table backends.
//!
//! Every entity kind lives in one table keyed by `(partitionKey, sortKey)`.
//! The [`Table`] trait is the narrow surface the DAO layer needs from it; the
//! concrete backend is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local table behind a tokio `RwLock`
//! - `dynamodb`: AWS DynamoDB table using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive. The in-memory table is always
//! compiled since tests run against it.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p workshops --no-default-features --features dynamodb
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use workshops_core::keys::TableKey;
use workshops_core::storage::StoreError;

pub mod conversions;
#[cfg_attr(not(feature = "inmemory"), allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use conversions::ItemCodec;
#[cfg_attr(not(feature = "inmemory"), allow(unused_imports))]
pub use inmemory::InMemoryTable;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbTable;

/// One table row as a map of attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Raw access to the shared table.
#[async_trait]
pub trait Table: Send + Sync {
    /// Fetches a row by its full key.
    async fn get_item(&self, key: &TableKey) -> Result<Option<Item>, StoreError>;

    /// Returns every row of a partition whose sort key starts with `sort_key_prefix`.
    async fn query_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<Item>, StoreError>;

    /// Writes a row, replacing any row under the same key.
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;

    /// Writes a row only if no row exists under its key.
    async fn create_item(&self, item: Item) -> Result<(), StoreError>;

    /// Removes a row. Removing a missing row succeeds.
    async fn delete_item(&self, key: &TableKey) -> Result<(), StoreError>;
}
