//! Export job implementations.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use workshops_core::csv::{render_workshops, sort_for_export};
use workshops_core::entity::Workshop;
use workshops_core::storage::{DataProcessingError, Repository};

/// Errors raised while producing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Data(#[from] DataProcessingError),
    #[error("Failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Produces one export file per tracking id.
#[async_trait]
pub trait CsvExporter: Send + Sync {
    /// Runs the export and returns the path of the written file.
    async fn export(&self, tracking_id: &str) -> Result<PathBuf, ExportError>;
}

/// Exports every workshop of one client to `<export_dir>/<tracking_id>.csv`.
pub struct WorkshopCsvExporter {
    workshops: Arc<dyn Repository<Workshop>>,
    client_id: String,
    export_dir: PathBuf,
}

impl WorkshopCsvExporter {
    pub fn new(
        workshops: Arc<dyn Repository<Workshop>>,
        client_id: impl Into<String>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            workshops,
            client_id: client_id.into(),
            export_dir: export_dir.into(),
        }
    }
}

#[async_trait]
impl CsvExporter for WorkshopCsvExporter {
    async fn export(&self, tracking_id: &str) -> Result<PathBuf, ExportError> {
        let mut workshops = self.workshops.read_all(&self.client_id).await?;
        sort_for_export(&mut workshops);
        let csv = render_workshops(&workshops);

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|source| ExportError::Io {
                path: self.export_dir.clone(),
                source,
            })?;

        let path = self.export_dir.join(format!("{tracking_id}.csv"));
        tokio::fs::write(&path, csv)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            tracking_id,
            client_id = %self.client_id,
            rows = workshops.len(),
            "Wrote CSV export"
        );

        Ok(path)
    }
}
