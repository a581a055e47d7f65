//! Background export worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{CsvExporter, ExportError, ExportJob};
use crate::metrics::Stopwatch;

/// Spawns the task that runs queued exports one at a time.
///
/// The task ends once every sender is dropped and the queue is drained, so
/// awaiting the handle after dropping the service finishes pending jobs.
pub fn spawn_worker(
    mut receiver: mpsc::Receiver<ExportJob>,
    exporter: Arc<dyn CsvExporter>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!("Export worker started");

        while let Some(job) = receiver.recv().await {
            let timer = Stopwatch::start("CsvExporter::export");

            match exporter.export(&job.tracking_id).await {
                Ok(path) => tracing::info!(
                    tracking_id = %job.tracking_id,
                    path = %path.display(),
                    elapsed_ms = timer.elapsed().as_millis() as u64,
                    "CSV export finished"
                ),
                // Data access failures were logged where they happened
                Err(ExportError::Data(err)) => tracing::debug!(
                    tracking_id = %job.tracking_id,
                    error = %err,
                    "CSV export aborted"
                ),
                Err(err) => tracing::error!(
                    tracking_id = %job.tracking_id,
                    error = %err,
                    "CSV export failed"
                ),
            }
        }

        tracing::debug!("Export worker shutting down");
    })
}
