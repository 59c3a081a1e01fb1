use anyhow::Result;
use async_trait::async_trait;

/// Async enable/disable switch owned by the external SDK.
///
/// Used twice: once for telemetry transmission, once for crash capture.
#[async_trait]
pub trait TogglePort: Send + Sync {
    async fn is_enabled(&self) -> Result<bool>;

    async fn set_enabled(&self, enabled: bool) -> Result<()>;
}
