use async_trait::async_trait;

use crate::entity::Entity;

use super::Result;

/// CRUD surface for one entity kind stored in the shared table.
///
/// Every failure is reported as a [`super::DataProcessingError`]; absence is
/// never a failure.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Gets an entity by client and id. Returns `None` when the row does not exist.
    async fn read(&self, client_id: &str, id: &str) -> Result<Option<E>>;

    /// Gets every entity of this kind for a client, in no particular order.
    async fn read_all(&self, client_id: &str) -> Result<Vec<E>>;

    /// Creates an entity under a freshly minted id and returns what was written.
    async fn create(&self, entity: E) -> Result<E>;

    /// Replaces the stored entity wholesale.
    ///
    /// `createdOn` is taken from the input, `lastUpdatedOn` is set to now and
    /// any field missing from the input is missing from storage afterwards.
    async fn update(&self, entity: E) -> Result<()>;

    /// Deletes an entity. Deleting a missing entity succeeds.
    async fn delete(&self, client_id: &str, id: &str) -> Result<()>;
}
