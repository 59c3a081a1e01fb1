pub mod bridge;
pub mod capability;
pub mod config;
pub mod error;
pub mod facade;
pub mod recorder;

// Re-export the surface most callers need
pub use bridge::{PendingNotificationBridge, SubscriptionId};
pub use capability::{
    CrashHistory, LastSessionCrashReport, Properties, SdkCapabilities, TelemetrySink, TogglePort,
    TracingSink,
};
pub use config::{Mode, SdkModule, DEBUG_MODE_KEY};
pub use error::InsightsError;
pub use facade::{traits, Insights, Severity};
pub use recorder::EventRecorder;
