// Path: crates/telemetry/src/time.rs
use std::time::{Duration, Instant};

/// Logs the time spent in a scope at `debug` when dropped.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Starts timing a scope named `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "telemetry",
            scope = self.label,
            elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
            "scope finished"
        );
    }
}
