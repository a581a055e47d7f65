//! Scoped operation timing.
//!
//! A [`Stopwatch`] records the wall-clock time between its creation and the
//! moment it is dropped, and emits it as a `tracing` event on the `metrics`
//! target:
//!
//! ```text
//! INFO metrics: label="WorkshopDao::read" elapsed_ms=3
//! ```

use std::time::{Duration, Instant};

/// Times the enclosing scope.
///
/// The measurement is emitted on every exit path, including early returns
/// through `?` and unwinding.
#[derive(Debug)]
#[must_use = "a stopwatch measures until it is dropped"]
pub struct Stopwatch {
    label: String,
    start: Instant,
}

impl Stopwatch {
    /// Starts timing an operation.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed since the stopwatch was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(target: "metrics", label = %self.label, elapsed_ms, "Operation timed");
    }
}
