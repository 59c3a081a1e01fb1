use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bridge::{PendingNotificationBridge, SubscriptionId};
use crate::capability::{Properties, SdkCapabilities, TogglePort};
use crate::config::{Context, Mode, SdkModule};
use crate::recorder::EventRecorder;

/// Warning level attached to reported errors as the `"Severity"` property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("Warning"),
            Severity::Error => f.write_str("Error"),
            Severity::Critical => f.write_str("Critical"),
        }
    }
}

/// Well-known property keys for [`Insights::identify`].
pub mod traits {
    pub const ADDRESS: &str = "Address";
    pub const AGE: &str = "Age";
    pub const AVATAR: &str = "Avatar";
    pub const CREATED_AT: &str = "CreatedAt";
    pub const DATE_OF_BIRTH: &str = "DateOfBirth";
    pub const DESCRIPTION: &str = "Description";
    pub const EMAIL: &str = "Email";
    pub const FIRST_NAME: &str = "FirstName";
    pub const GENDER: &str = "Gender";
    pub const GUEST_IDENTIFIER: &str = "GuestIdentifier";
    pub const LAST_NAME: &str = "LastName";
    pub const NAME: &str = "Name";
    pub const PHONE: &str = "Phone";
    pub const WEBSITE: &str = "Website";
}

/// Legacy-shaped analytics facade over the external telemetry SDK.
///
/// Construct with the SDK capability handles, then call
/// [`configure`](Insights::configure) once. Configuring with the reserved
/// [`DEBUG_MODE_KEY`](crate::DEBUG_MODE_KEY) switches every operation into a
/// silent no-op; any other key is live. The mode is decided once and never
/// reset.
///
/// External failures never surface to callers: a sink or toggle that errors
/// out degrades to defaults. Telemetry must not crash the host application.
pub struct Insights {
    ctx: Context,
    caps: SdkCapabilities,
    bridge: PendingNotificationBridge,
}

impl Insights {
    /// Unconfigured facade. Operations behave as live until
    /// [`configure`](Insights::configure) says otherwise, matching the legacy
    /// API's pre-initialization pass-through.
    pub fn new(caps: SdkCapabilities) -> Self {
        let bridge = PendingNotificationBridge::new(caps.crashes.clone());
        Self {
            ctx: Context::default(),
            caps,
            bridge,
        }
    }

    /// Decide the operating mode from `api_key` and record the module list.
    /// Idempotent: once configured, later calls are no-ops.
    pub fn configure(&mut self, api_key: &str, modules: &[SdkModule]) {
        if self.ctx.is_initialized() {
            return;
        }
        let mode = Mode::from_api_key(api_key);
        self.ctx.mode = Some(mode);
        self.ctx.modules = modules.to_vec();
        info!(?mode, ?modules, "insights configured");
    }

    pub fn is_initialized(&self) -> bool {
        self.ctx.is_initialized()
    }

    pub fn mode(&self) -> Mode {
        self.ctx.mode()
    }

    pub fn modules(&self) -> &[SdkModule] {
        &self.ctx.modules
    }

    /// Attach `"Unique ID"` plus the given table to the current user.
    pub fn identify(&self, uid: &str, table: Properties) {
        if self.ctx.mode().is_debug() {
            return;
        }
        let mut properties = table;
        properties.insert("Unique ID".to_string(), uid.to_string());
        self.caps.sink.set_user_properties(&properties);
    }

    /// Send one named event with its properties.
    pub fn track(&self, name: &str, table: Properties) {
        if self.ctx.mode().is_debug() {
            return;
        }
        self.caps.sink.track_event(name, &table);
    }

    /// Begin a timed event; call `start()`/`stop()` on the returned recorder.
    pub fn track_time(&self, name: &str, table: Properties) -> EventRecorder {
        EventRecorder::new(name, table, self.caps.sink.clone(), self.ctx.mode())
    }

    /// Report an error as an analytics event named after the error's type,
    /// carrying `"Message"`, `"Severity"`, and (when the error has a source
    /// chain) a `"Cause"` property.
    pub fn report<E>(&self, error: &E, extra: Properties, severity: Severity)
    where
        E: StdError + ?Sized,
    {
        if self.ctx.mode().is_debug() {
            return;
        }
        let name = short_type_name::<E>();
        let mut properties = extra;
        properties.insert("Message".to_string(), error.to_string());
        if let Some(cause) = cause_chain(error) {
            properties.insert("Cause".to_string(), cause);
        }
        properties.insert("Severity".to_string(), severity.to_string());
        self.caps.sink.track_event(name, &properties);
    }

    /// Report without a source error; the event is named `"Unknown Error"`.
    pub fn report_anonymous(&self, extra: Properties, severity: Severity) {
        if self.ctx.mode().is_debug() {
            return;
        }
        let mut properties = extra;
        properties.insert("Severity".to_string(), severity.to_string());
        self.caps.sink.track_event("Unknown Error", &properties);
    }

    /// Whether telemetry transmission is currently disabled.
    ///
    /// Debug mode short-circuits to `false` without querying; a failing query
    /// also reads as `false`.
    pub async fn data_transmission_disabled(&self) -> bool {
        toggle_disabled(&self.caps.transmission, self.ctx.mode(), "transmission").await
    }

    pub async fn set_data_transmission_disabled(&self, disabled: bool) {
        set_toggle_disabled(&self.caps.transmission, self.ctx.mode(), disabled, "transmission")
            .await;
    }

    /// Whether crash capture is currently disabled. Same defaults as
    /// [`data_transmission_disabled`](Insights::data_transmission_disabled).
    pub async fn exception_catching_disabled(&self) -> bool {
        toggle_disabled(&self.caps.crash_capture, self.ctx.mode(), "crash capture").await
    }

    pub async fn set_exception_catching_disabled(&self, disabled: bool) {
        set_toggle_disabled(&self.caps.crash_capture, self.ctx.mode(), disabled, "crash capture")
            .await;
    }

    /// Subscribe to the previous-session crash notification; see
    /// [`PendingNotificationBridge::subscribe`].
    pub fn on_pending_crash_report(
        &self,
        callback: impl Fn(bool) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.bridge.subscribe(callback)
    }

    pub fn remove_pending_crash_listener(&self, id: SubscriptionId) {
        self.bridge.unsubscribe(id);
    }

    pub fn bridge(&self) -> &PendingNotificationBridge {
        &self.bridge
    }
}

async fn toggle_disabled(toggle: &Arc<dyn TogglePort>, mode: Mode, what: &str) -> bool {
    if mode.is_debug() {
        return false;
    }
    match toggle.is_enabled().await {
        Ok(enabled) => !enabled,
        Err(err) => {
            warn!("{what} toggle read failed, assuming enabled: {err:#}");
            false
        }
    }
}

async fn set_toggle_disabled(toggle: &Arc<dyn TogglePort>, mode: Mode, disabled: bool, what: &str) {
    if mode.is_debug() {
        return;
    }
    if let Err(err) = toggle.set_enabled(!disabled).await {
        warn!("{what} toggle write failed: {err:#}");
    }
}

/// Last path segment of the type name, e.g. `std::io::Error` -> `Error`.
fn short_type_name<E: ?Sized>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

/// `source()` chain joined for the `"Cause"` property, `None` when the error
/// has no source.
fn cause_chain(error: &(impl StdError + ?Sized)) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(": "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_renders_like_the_property_value() {
        assert_eq!(Severity::Warning.to_string(), "Warning");
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }

    #[test]
    fn short_type_name_strips_the_path() {
        assert_eq!(short_type_name::<std::io::Error>(), "Error");
        assert_eq!(short_type_name::<crate::InsightsError>(), "InsightsError");
    }
}
