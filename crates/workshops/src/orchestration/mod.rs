//! CSV export orchestration.
//!
//! Accepting an export and running it are decoupled: [`OrchestrationService`]
//! only enqueues a job on a bounded channel and returns, and a background
//! worker (see [`spawn_worker`]) drains the channel and writes the files.
//! A full queue is reported to the caller instead of blocking the request.

mod exporter;
mod worker;

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

use workshops_core::storage::{DataProcessingError, Result};

pub use exporter::{CsvExporter, ExportError, WorkshopCsvExporter};
pub use worker::spawn_worker;

const ORIGIN: &str = "OrchestrationService";

/// Starts long-running jobs on behalf of HTTP handlers.
pub trait Orchestration: Send + Sync {
    /// Schedules a CSV export identified by `tracking_id` and returns at once.
    fn create_csv(&self, tracking_id: &str) -> Result<()>;
}

/// A CSV export waiting for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub tracking_id: String,
}

/// Reasons a job could not be queued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Export queue is full ({capacity} pending jobs)")]
    Full { capacity: usize },
    #[error("Export worker is not running")]
    Closed,
}

/// Queues export jobs for the background worker.
#[derive(Debug, Clone)]
pub struct OrchestrationService {
    sender: mpsc::Sender<ExportJob>,
    capacity: usize,
}

impl OrchestrationService {
    /// Creates the service and the receiving end for the worker.
    ///
    /// `capacity` is clamped to at least one pending job.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ExportJob>) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender, capacity }, receiver)
    }
}

impl Orchestration for OrchestrationService {
    fn create_csv(&self, tracking_id: &str) -> Result<()> {
        let job = ExportJob {
            tracking_id: tracking_id.to_string(),
        };

        match self.sender.try_send(job) {
            Ok(()) => {
                tracing::info!(tracking_id, "CSV export queued");
                Ok(())
            }
            Err(err) => {
                let cause = match err {
                    TrySendError::Full(_) => QueueError::Full {
                        capacity: self.capacity,
                    },
                    TrySendError::Closed(_) => QueueError::Closed,
                };
                tracing::error!(tracking_id, error = %cause, "Failed to queue CSV export");
                Err(DataProcessingError::new(ORIGIN, cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn queue_error(err: &DataProcessingError) -> Option<&QueueError> {
        err.source().and_then(|s| s.downcast_ref::<QueueError>())
    }

    #[tokio::test]
    async fn test_create_csv_enqueues_job() {
        let (service, mut receiver) = OrchestrationService::channel(4);

        service.create_csv("abc").unwrap();

        let job = receiver.recv().await.unwrap();
        assert_eq!(job.tracking_id, "abc");
    }

    #[tokio::test]
    async fn test_full_queue_is_reported() {
        let (service, _receiver) = OrchestrationService::channel(1);

        service.create_csv("first").unwrap();
        let err = service.create_csv("second").unwrap_err();

        assert_eq!(err.origin(), "OrchestrationService");
        assert_eq!(queue_error(&err), Some(&QueueError::Full { capacity: 1 }));
    }

    #[tokio::test]
    async fn test_closed_queue_is_reported() {
        let (service, receiver) = OrchestrationService::channel(4);
        drop(receiver);

        let err = service.create_csv("abc").unwrap_err();

        assert_eq!(queue_error(&err), Some(&QueueError::Closed));
        assert_eq!(
            err.to_string(),
            "Error in OrchestrationService: Export worker is not running"
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let (service, _receiver) = OrchestrationService::channel(0);
        assert_eq!(service.capacity, 1);
    }
}
