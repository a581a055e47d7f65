//! Data access objects over the shared table.
//!
//! One generic [`EntityDao`] serves every entity kind: the kind's tag, mapper
//! and item codec come from its [`Entity`] implementation.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use workshops_core::clock::{Clock, SystemClock};
use workshops_core::entity::{Entity, Location, StoredRecord, Workshop};
use workshops_core::ids::generate_id;
use workshops_core::keys::build_key;
use workshops_core::storage::{DataProcessingError, Repository, Result, StoreError};

use crate::metrics::Stopwatch;
use crate::storage::{ItemCodec, Table};

/// DAO for workshops.
pub type WorkshopDao = EntityDao<Workshop>;

/// DAO for locations.
pub type LocationDao = EntityDao<Location>;

/// Reads and writes one entity kind in the shared table.
///
/// Holds only shared handles, so it is cheap to clone and safe to use from
/// many tasks at once.
pub struct EntityDao<E> {
    table: Arc<dyn Table>,
    clock: Arc<dyn Clock>,
    _kind: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityDao<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            clock: self.clock.clone(),
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> EntityDao<E> {
    /// Creates a DAO stamping records with the system clock.
    pub fn new(table: Arc<dyn Table>) -> Self {
        Self::with_clock(table, Arc::new(SystemClock))
    }

    pub fn with_clock(table: Arc<dyn Table>, clock: Arc<dyn Clock>) -> Self {
        Self {
            table,
            clock,
            _kind: PhantomData,
        }
    }

    fn name() -> String {
        format!("{}Dao", E::KIND)
    }

    fn stopwatch(operation: &str) -> Stopwatch {
        Stopwatch::start(format!("{}::{}", Self::name(), operation))
    }

    /// Logs a store failure and wraps it as the single domain failure kind.
    fn fail(operation: &str, err: StoreError) -> DataProcessingError {
        let dao = Self::name();
        tracing::error!(dao = %dao, operation, error = %err, "Data access failed");
        DataProcessingError::new(dao, err)
    }
}

#[async_trait]
impl<E> Repository<E> for EntityDao<E>
where
    E: Entity,
    E::Stored: ItemCodec,
{
    async fn read(&self, client_id: &str, id: &str) -> Result<Option<E>> {
        let _timer = Self::stopwatch("read");
        let key = build_key(client_id, E::TAG, id);

        let item = self
            .table
            .get_item(&key)
            .await
            .map_err(|e| Self::fail("read", e))?;

        let Some(item) = item else {
            tracing::debug!(%key, "Row not found");
            return Ok(None);
        };

        let stored = E::Stored::from_item(&item).map_err(|e| Self::fail("read", e))?;
        Ok(Some(E::from_stored(stored)))
    }

    async fn read_all(&self, client_id: &str) -> Result<Vec<E>> {
        let _timer = Self::stopwatch("read_all");

        let items = self
            .table
            .query_prefix(client_id, E::TAG.prefix())
            .await
            .map_err(|e| Self::fail("read_all", e))?;

        items
            .iter()
            .map(|item| {
                E::Stored::from_item(item)
                    .map(E::from_stored)
                    .map_err(|e| Self::fail("read_all", e))
            })
            .collect()
    }

    async fn create(&self, mut entity: E) -> Result<E> {
        let _timer = Self::stopwatch("create");

        let now = self.clock.now();
        let client_id = entity.client_id().to_string();
        entity.set_key(client_id, generate_id());
        entity.set_audit(Some(now), now);

        let stored = entity.to_stored();
        let key = stored.key();

        self.table
            .create_item(stored.to_item())
            .await
            .map_err(|e| Self::fail("create", e))?;

        tracing::info!(%key, "Created row");
        Ok(E::from_stored(stored))
    }

    async fn update(&self, mut entity: E) -> Result<()> {
        let _timer = Self::stopwatch("update");

        if entity.id().trim().is_empty() {
            let err = StoreError::InvalidData(format!("{} id is required", E::KIND));
            return Err(Self::fail("update", err));
        }

        let now = self.clock.now();
        let created_on = entity.created_on();
        entity.set_audit(created_on, now);

        let stored = entity.to_stored();
        let key = stored.key();

        self.table
            .put_item(stored.to_item())
            .await
            .map_err(|e| Self::fail("update", e))?;

        tracing::info!(%key, "Replaced row");
        Ok(())
    }

    async fn delete(&self, client_id: &str, id: &str) -> Result<()> {
        let _timer = Self::stopwatch("delete");
        let key = build_key(client_id, E::TAG, id);

        self.table
            .delete_item(&key)
            .await
            .map_err(|e| Self::fail("delete", e))?;

        tracing::info!(%key, "Deleted row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
    use workshops_core::clock::SteppingClock;
    use workshops_core::keys::{PARTITION_KEY, SORT_KEY};

    use super::*;
    use crate::storage::{InMemoryTable, Item};
    use crate::testing::{EventCapture, FailingTable};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn setup() -> (InMemoryTable, WorkshopDao) {
        let table = InMemoryTable::new();
        let clock = Arc::new(SteppingClock::new(start(), Duration::seconds(1)));
        let dao = WorkshopDao::with_clock(Arc::new(table.clone()), clock);
        (table, dao)
    }

    fn sample_workshop() -> Workshop {
        Workshop::new(
            "C1",
            "Intro",
            "A",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            60,
        )
        .with_location("L1")
    }

    fn attr<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
        item.get(name).and_then(|v| v.as_s().ok()).map(String::as_str)
    }

    fn assert_no_tags(workshop: &Workshop) {
        assert!(!workshop.workshop_id.contains('#'));
        for reference in [&workshop.location_id, &workshop.organizer_id] {
            if let Some(id) = reference {
                assert!(!id.contains('#'));
            }
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (_, dao) = setup();

        let created = dao.create(sample_workshop()).await.unwrap();

        assert!(!created.workshop_id.is_empty());
        assert_eq!(created.client_id, "C1");
        assert_eq!(created.location_id.as_deref(), Some("L1"));
        assert_eq!(created.created_on, Some(start()));
        assert_eq!(created.last_updated_on, created.created_on);

        let read = dao.read("C1", &created.workshop_id).await.unwrap();
        assert_eq!(read, Some(created));
    }

    #[tokio::test]
    async fn test_create_mints_fresh_ids() {
        let (table, dao) = setup();

        let first = dao.create(sample_workshop()).await.unwrap();
        let second = dao
            .create(sample_workshop().with_id(first.workshop_id.clone()))
            .await
            .unwrap();

        assert_ne!(first.workshop_id, second.workshop_id);
        assert_eq!(table.rows().await.len(), 2);
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let (_, dao) = setup();
        assert_eq!(dao.read("C1", "does-not-exist").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_written_rows_carry_tags() {
        let (table, dao) = setup();

        let workshop = sample_workshop().with_organizer("O1");
        let created = dao.create(workshop).await.unwrap();

        let mut changed = created.clone();
        changed.location_id = Some("L2".to_string());
        dao.update(changed).await.unwrap();

        let rows = table.rows().await;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert_eq!(attr(row, PARTITION_KEY), Some("C1"));
        assert_eq!(
            attr(row, SORT_KEY),
            Some(format!("WORKSHOP#{}", created.workshop_id).as_str())
        );
        assert_eq!(attr(row, "locationId"), Some("LOCATION#L2"));
        assert_eq!(attr(row, "organizerId"), Some("ORGANIZER#O1"));
    }

    #[tokio::test]
    async fn test_returned_records_carry_no_tags() {
        let (_, dao) = setup();

        let created = dao
            .create(sample_workshop().with_organizer("O1"))
            .await
            .unwrap();
        assert_no_tags(&created);

        let read = dao.read("C1", &created.workshop_id).await.unwrap().unwrap();
        assert_no_tags(&read);

        for workshop in dao.read_all("C1").await.unwrap() {
            assert_no_tags(&workshop);
        }
    }

    #[tokio::test]
    async fn test_update_keeps_created_on_and_bumps_last_updated_on() {
        let (_, dao) = setup();
        let created = dao.create(sample_workshop()).await.unwrap();

        let mut changed = created.clone();
        changed.name = "Intro v2".to_string();
        dao.update(changed).await.unwrap();

        let read = dao.read("C1", &created.workshop_id).await.unwrap().unwrap();
        assert_eq!(read.name, "Intro v2");
        assert_eq!(read.created_on, created.created_on);
        assert!(read.last_updated_on > read.created_on);
    }

    #[tokio::test]
    async fn test_update_is_full_replacement() {
        let (_, dao) = setup();
        let created = dao
            .create(sample_workshop().with_description("first run"))
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.description = None;
        changed.location_id = None;
        dao.update(changed).await.unwrap();

        let read = dao.read("C1", &created.workshop_id).await.unwrap().unwrap();
        assert_eq!(read.description, None);
        assert_eq!(read.location_id, None);
    }

    #[tokio::test]
    async fn test_delete_then_read() {
        let (_, dao) = setup();
        let created = dao.create(sample_workshop()).await.unwrap();

        dao.delete("C1", &created.workshop_id).await.unwrap();
        dao.delete("C1", &created.workshop_id).await.unwrap();

        assert_eq!(dao.read("C1", &created.workshop_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_all_returns_only_own_kind_and_partition() {
        let (table, dao) = setup();
        let location_dao = LocationDao::new(Arc::new(table.clone()));

        let a = dao.create(sample_workshop()).await.unwrap();
        let b = dao.create(sample_workshop()).await.unwrap();
        let mut other_client = sample_workshop();
        other_client.client_id = "C2".to_string();
        dao.create(other_client).await.unwrap();
        location_dao
            .create(Location::new("C1", "Main hall"))
            .await
            .unwrap();

        let mut ids: Vec<String> = dao
            .read_all("C1")
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.workshop_id)
            .collect();
        ids.sort();

        let mut expected = vec![a.workshop_id, b.workshop_id];
        expected.sort();
        assert_eq!(ids, expected);

        let locations = location_dao.read_all("C1").await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Main hall");
    }

    #[tokio::test]
    async fn test_read_all_empty_partition() {
        let (_, dao) = setup();
        assert!(dao.read_all("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_becomes_data_processing_error() {
        let cause = StoreError::ConnectionFailed("refused".to_string());
        let dao = WorkshopDao::new(Arc::new(FailingTable(cause.clone())));

        let errors = vec![
            dao.read("C1", "W1").await.unwrap_err(),
            dao.read_all("C1").await.unwrap_err(),
            dao.create(sample_workshop()).await.unwrap_err(),
            dao.update(sample_workshop().with_id("W1")).await.unwrap_err(),
            dao.delete("C1", "W1").await.unwrap_err(),
        ];

        for error in errors {
            assert_eq!(error.origin(), "WorkshopDao");
            let source = error
                .source()
                .and_then(|s| s.downcast_ref::<StoreError>());
            assert_eq!(source, Some(&cause));
        }
    }

    #[tokio::test]
    async fn test_corrupt_row_becomes_data_processing_error() {
        let (table, dao) = setup();

        let mut item = Item::new();
        item.insert(
            PARTITION_KEY.to_string(),
            AttributeValue::S("C1".to_string()),
        );
        item.insert(
            SORT_KEY.to_string(),
            AttributeValue::S("WORKSHOP#bad".to_string()),
        );
        table.insert_raw(item).await;

        let error = dao.read("C1", "bad").await.unwrap_err();
        assert!(error.to_string().starts_with("Error in WorkshopDao: Invalid data"));

        let error = dao.read_all("C1").await.unwrap_err();
        assert!(matches!(
            error.source().and_then(|s| s.downcast_ref::<StoreError>()),
            Some(StoreError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_id() {
        let (table, dao) = setup();

        let error = dao.update(sample_workshop()).await.unwrap_err();

        assert_eq!(error.origin(), "WorkshopDao");
        assert!(matches!(
            error.source().and_then(|s| s.downcast_ref::<StoreError>()),
            Some(StoreError::InvalidData(_))
        ));
        assert!(table.rows().await.is_empty());
    }

    const OPERATION_LABELS: [&str; 5] = [
        "WorkshopDao::create",
        "WorkshopDao::read",
        "WorkshopDao::read_all",
        "WorkshopDao::update",
        "WorkshopDao::delete",
    ];

    #[tokio::test]
    async fn test_every_operation_is_timed_once() {
        let (capture, _guard) = EventCapture::install();
        let (_, dao) = setup();

        let created = dao.create(sample_workshop()).await.unwrap();
        dao.read("C1", &created.workshop_id).await.unwrap();
        dao.read_all("C1").await.unwrap();
        dao.update(created.clone()).await.unwrap();
        dao.delete("C1", &created.workshop_id).await.unwrap();

        assert_eq!(capture.timings(), OPERATION_LABELS);
        assert!(capture.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failed_operations_are_timed_and_logged_once() {
        let (capture, _guard) = EventCapture::install();
        let cause = StoreError::QueryFailed("Table not found".to_string());
        let dao = WorkshopDao::new(Arc::new(FailingTable(cause)));

        assert!(dao.create(sample_workshop()).await.is_err());
        assert!(dao.read("C1", "W1").await.is_err());
        assert!(dao.read_all("C1").await.is_err());
        assert!(dao.update(sample_workshop().with_id("W1")).await.is_err());
        assert!(dao.delete("C1", "W1").await.is_err());

        assert_eq!(capture.timings(), OPERATION_LABELS);

        let errors = capture.errors();
        assert_eq!(errors.len(), OPERATION_LABELS.len());
        for event in errors {
            assert_eq!(event.target, "workshops::dao");
            assert_eq!(event.message, "Data access failed");
        }
    }
}
