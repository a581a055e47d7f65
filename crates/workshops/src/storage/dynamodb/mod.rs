//! DynamoDB table backend.
//!
//! Layout: one table, hash key `partitionKey` (S), range key `sortKey` (S).
//! The partition key is the client id; the sort key is the entity tag
//! followed by the entity id, so every kind of a client shares a partition.

mod error;
mod table;

pub use table::DynamoDbTable;
