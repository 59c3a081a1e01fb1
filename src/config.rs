use serde::{Deserialize, Serialize};

/// Reserved api key that switches the facade into debug/no-op mode.
pub const DEBUG_MODE_KEY: &str = "DEBUG";

/// Operating mode, decided once at configure time and never reset.
///
/// In `Debug` mode every recording, reporting, identification, and toggle
/// operation is a silent no-op with default results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Live,
    Debug,
}

impl Mode {
    pub fn from_api_key(api_key: &str) -> Self {
        if api_key == DEBUG_MODE_KEY {
            Mode::Debug
        } else {
            Mode::Live
        }
    }

    pub fn is_debug(self) -> bool {
        self == Mode::Debug
    }
}

/// SDK modules the caller asks to start at configure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdkModule {
    Analytics,
    Crashes,
}

/// Configuration state carried by the facade instead of a process-wide static.
#[derive(Debug, Clone, Default)]
pub(crate) struct Context {
    pub mode: Option<Mode>,
    pub modules: Vec<SdkModule>,
}

impl Context {
    pub fn is_initialized(&self) -> bool {
        self.mode.is_some()
    }

    /// Effective mode; unconfigured behaves as live, matching the legacy API.
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or(Mode::Live)
    }
}
