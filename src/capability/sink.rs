use std::collections::BTreeMap;

use tracing::info;

/// Event property map. Keys are unique; insertion order is irrelevant, so a
/// BTreeMap keeps iteration (and logged output) deterministic.
pub type Properties = BTreeMap<String, String>;

/// Destination that durably records or transmits telemetry events.
///
/// Fire-and-forget: no return value is consumed and implementations must not
/// block the caller on network I/O.
pub trait TelemetrySink: Send + Sync {
    /// Record one named event with its properties.
    fn track_event(&self, name: &str, properties: &Properties);

    /// Attach custom properties to the current user/device.
    fn set_user_properties(&self, properties: &Properties);
}

/// Sink that renders events into the `tracing` stream instead of a backend.
///
/// Useful as a local default and in development; properties are JSON-encoded
/// into a single field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn track_event(&self, name: &str, properties: &Properties) {
        let props = serde_json::to_string(properties).unwrap_or_default();
        info!(target: "insights::sink", event = name, %props, "track_event");
    }

    fn set_user_properties(&self, properties: &Properties) {
        let props = serde_json::to_string(properties).unwrap_or_default();
        info!(target: "insights::sink", %props, "set_user_properties");
    }
}
