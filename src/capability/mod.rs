//! Boundary contracts for the external telemetry SDK.
//!
//! Everything behind these traits is opaque: transport, batching, retry, and
//! persistence belong to the SDK, not to this crate. Implementations are
//! best-effort collaborators; their errors are `anyhow` values that callers on
//! this side swallow rather than propagate.

pub mod crash;
pub mod sink;
pub mod toggle;

use std::sync::Arc;

pub use crash::{CrashHistory, LastSessionCrashReport, STARTUP_CRASH_WINDOW};
pub use sink::{Properties, TelemetrySink, TracingSink};
pub use toggle::TogglePort;

/// The external handles the facade is wired with at construction.
#[derive(Clone)]
pub struct SdkCapabilities {
    pub sink: Arc<dyn TelemetrySink>,
    pub crashes: Arc<dyn CrashHistory>,
    /// Process-wide telemetry transmission enablement.
    pub transmission: Arc<dyn TogglePort>,
    /// Crash-capture enablement.
    pub crash_capture: Arc<dyn TogglePort>,
}
