use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use crate::capability::CrashHistory;

/// Handle identifying one registration in the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type CrashCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Adapts the SDK's async "did the previous session crash" query into a
/// subscription callback, without blocking registration.
///
/// Each `subscribe` call launches its own detached crash-history lookup: N
/// registrations mean N independent lookups, and every lookup that finds a
/// crash fires the full subscriber list as it stands when the lookup resolves.
/// The callback argument is whether that crash was a startup crash (within
/// [`crate::capability::STARTUP_CRASH_WINDOW`] of app start).
///
/// Lookup failures are swallowed: telemetry never takes down the host, so a
/// failing query simply means no notification.
pub struct PendingNotificationBridge {
    subscribers: Arc<Mutex<HashMap<SubscriptionId, CrashCallback>>>,
    crashes: Arc<dyn CrashHistory>,
}

impl PendingNotificationBridge {
    pub fn new(crashes: Arc<dyn CrashHistory>) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            crashes,
        }
    }

    /// Register `callback` and launch one crash-history lookup for it.
    ///
    /// Returns immediately; the lookup runs on the tokio runtime and resolves
    /// concurrently. Must be called from within a runtime context.
    pub fn subscribe(&self, callback: impl Fn(bool) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        lock(&self.subscribers).insert(id, Arc::new(callback));

        let crashes = Arc::clone(&self.crashes);
        let subscribers = Arc::clone(&self.subscribers);
        tokio::spawn(async move {
            match crashes.has_crashed_last_session().await {
                Ok(true) => {
                    let is_startup = match crashes.last_session_crash_report().await {
                        Ok(Some(report)) => report.is_startup_crash(),
                        // A crash with no retrievable report still notifies.
                        Ok(None) => false,
                        // A failed query notifies nobody, same as the first one.
                        Err(err) => {
                            debug!("last-session crash report unavailable: {err:#}");
                            return;
                        }
                    };

                    // Snapshot at resolution time: callbacks removed while the
                    // lookup was in flight must not fire.
                    let snapshot: Vec<CrashCallback> =
                        lock(&subscribers).values().cloned().collect();
                    for callback in snapshot {
                        callback(is_startup);
                    }
                }
                Ok(false) => {}
                Err(err) => debug!("crash-history lookup failed: {err:#}"),
            }
        });

        id
    }

    /// Remove one registration. In-flight lookups keep running, but the
    /// removed callback will not be fired by them.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        lock(&self.subscribers).remove(&id);
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

/// Poison-recovering lock: a panicked callback must not wedge the registry.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
