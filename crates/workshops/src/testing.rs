//! Shared test doubles: a table that always fails and a `tracing` layer that
//! records emitted events.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use workshops_core::keys::TableKey;
use workshops_core::storage::StoreError;

use crate::storage::{Item, Table};

/// Table whose every operation fails with the same error.
pub struct FailingTable(pub StoreError);

#[async_trait]
impl Table for FailingTable {
    async fn get_item(&self, _key: &TableKey) -> Result<Option<Item>, StoreError> {
        Err(self.0.clone())
    }

    async fn query_prefix(
        &self,
        _partition_key: &str,
        _sort_key_prefix: &str,
    ) -> Result<Vec<Item>, StoreError> {
        Err(self.0.clone())
    }

    async fn put_item(&self, _item: Item) -> Result<(), StoreError> {
        Err(self.0.clone())
    }

    async fn create_item(&self, _item: Item) -> Result<(), StoreError> {
        Err(self.0.clone())
    }

    async fn delete_item(&self, _key: &TableKey) -> Result<(), StoreError> {
        Err(self.0.clone())
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub label: Option<String>,
}

/// Records every event dispatched while it is installed.
#[derive(Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Installs a capture as the default subscriber of the current thread.
    ///
    /// Events are recorded until the guard is dropped. Events emitted on
    /// other threads are not recorded.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Labels of the `metrics` events, in emission order.
    pub fn timings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.target == "metrics")
            .filter_map(|event| event.label)
            .collect()
    }

    /// ERROR events raised by this crate's own code.
    pub fn errors(&self) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level == Level::ERROR && event.target.starts_with("workshops"))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldRecorder::default();
        event.record(&mut fields);

        let metadata = event.metadata();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: fields.message,
            label: fields.label,
        });
    }
}

#[derive(Default)]
struct FieldRecorder {
    message: String,
    label: Option<String>,
}

impl FieldRecorder {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "label" => self.label = Some(value),
            _ => {}
        }
    }
}

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }
}
