//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Handlers extract only the part they need through
//! [`FromRef`], e.g. `State<Arc<dyn Repository<Workshop>>>`.

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::task::JoinHandle;

use workshops_core::entity::{Location, Workshop};
use workshops_core::storage::Repository;

use crate::config::Config;
use crate::dao::{LocationDao, WorkshopDao};
use crate::orchestration::{spawn_worker, Orchestration, OrchestrationService, WorkshopCsvExporter};
use crate::storage::Table;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned for each request handler; every field is a shared handle.
#[derive(Clone)]
pub struct AppState {
    pub workshops: Arc<dyn Repository<Workshop>>,
    pub locations: Arc<dyn Repository<Location>>,
    pub orchestration: Arc<dyn Orchestration>,
}

impl AppState {
    pub fn new(
        workshops: Arc<dyn Repository<Workshop>>,
        locations: Arc<dyn Repository<Location>>,
        orchestration: Arc<dyn Orchestration>,
    ) -> Self {
        Self {
            workshops,
            locations,
            orchestration,
        }
    }

    /// Wires DAOs, the export queue and its worker on top of a table.
    ///
    /// The returned handle completes once every clone of the state is
    /// dropped and pending exports are done.
    pub fn with_table(table: Arc<dyn Table>, config: &Config) -> (Self, JoinHandle<()>) {
        let workshops: Arc<dyn Repository<Workshop>> = Arc::new(WorkshopDao::new(table.clone()));
        let locations: Arc<dyn Repository<Location>> = Arc::new(LocationDao::new(table));

        let exporter = Arc::new(WorkshopCsvExporter::new(
            workshops.clone(),
            config.export_client_id.clone(),
            config.export_dir.clone(),
        ));
        let (orchestration, receiver) =
            OrchestrationService::channel(config.export_queue_capacity);
        let worker = spawn_worker(receiver, exporter);

        (
            Self::new(workshops, locations, Arc::new(orchestration)),
            worker,
        )
    }
}

impl FromRef<AppState> for Arc<dyn Repository<Workshop>> {
    fn from_ref(state: &AppState) -> Self {
        state.workshops.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Repository<Location>> {
    fn from_ref(state: &AppState) -> Self {
        state.locations.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Orchestration> {
    fn from_ref(state: &AppState) -> Self {
        state.orchestration.clone()
    }
}

// ============================================================================
// Factory functions for different backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryTable;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for local runs without any external dependencies.
        pub async fn from_config(config: &Config) -> Result<(Self, JoinHandle<()>), anyhow::Error> {
            tracing::info!("Using in-memory table");
            Ok(Self::with_table(Arc::new(InMemoryTable::new()), config))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::DynamoDbTable;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn from_config(config: &Config) -> Result<(Self, JoinHandle<()>), anyhow::Error> {
            let table =
                DynamoDbTable::connect(config.table_name.clone(), config.endpoint_url.as_deref())
                    .await;
            tracing::info!(table = table.table_name(), "Using DynamoDB table");
            Ok(Self::with_table(Arc::new(table), config))
        }
    }
}
