use std::time::{Duration, SystemTime};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A crash within this window of app start counts as a startup crash.
pub const STARTUP_CRASH_WINDOW: Duration = Duration::from_secs(5);

/// Read-only snapshot of the previous session's crash, fetched once per query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastSessionCrashReport {
    pub crashed_at: SystemTime,
    pub app_started_at: SystemTime,
}

impl LastSessionCrashReport {
    /// Whether the crash happened within [`STARTUP_CRASH_WINDOW`] of app start.
    ///
    /// A crash timestamp at or before app start is not a startup crash; the
    /// clocks disagreeing is treated the same as a crash outside the window.
    pub fn is_startup_crash(&self) -> bool {
        self.crashed_at
            .duration_since(self.app_started_at)
            .map(|elapsed| elapsed < STARTUP_CRASH_WINDOW)
            .unwrap_or(false)
    }
}

/// Async query surface over the SDK's crash history for the previous session.
#[async_trait]
pub trait CrashHistory: Send + Sync {
    async fn has_crashed_last_session(&self) -> Result<bool>;

    /// The previous session's crash report, if one was recorded and retrievable.
    async fn last_session_crash_report(&self) -> Result<Option<LastSessionCrashReport>>;
}
