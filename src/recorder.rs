use std::sync::Arc;

use tokio::time::Instant;

use crate::capability::{Properties, TelemetrySink};
use crate::config::Mode;
use crate::error::InsightsError;

/// Measures wall-clock duration of a caller-delimited span of work and emits
/// it as one labeled telemetry event.
///
/// Single-use: create, `start()`, do the work, `stop()`. `stop()` appends a
/// `"Duration"` property holding the elapsed seconds rounded to an integer
/// (e.g. `"12s"`) and sends the event through the sink, unless the facade was
/// configured in debug mode, in which case nothing is transmitted.
///
/// Uses `tokio::time::Instant`, so elapsed time follows the runtime clock
/// (pausable in tests).
pub struct EventRecorder {
    name: String,
    properties: Properties,
    started_at: Option<Instant>,
    sink: Arc<dyn TelemetrySink>,
    mode: Mode,
}

impl EventRecorder {
    pub fn new(
        name: impl Into<String>,
        properties: Properties,
        sink: Arc<dyn TelemetrySink>,
        mode: Mode,
    ) -> Self {
        Self {
            name: name.into(),
            properties,
            started_at: None,
            sink,
            mode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Record the span start. Calling twice overwrites the previous start
    /// timestamp; last write wins.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Finalize the span: append the `"Duration"` property and, outside debug
    /// mode, transmit the event.
    ///
    /// Fails with [`InsightsError::InvalidState`] if `start()` was never
    /// called. Not idempotent: a second call recomputes the duration
    /// (overwriting the key) and transmits again.
    pub fn stop(&mut self) -> Result<(), InsightsError> {
        let started_at = self.started_at.ok_or(InsightsError::InvalidState)?;

        let secs = started_at.elapsed().as_secs_f64();
        self.properties
            .insert("Duration".to_string(), format!("{secs:.0}s"));

        if !self.mode.is_debug() {
            self.sink.track_event(&self.name, &self.properties);
        }

        Ok(())
    }
}
