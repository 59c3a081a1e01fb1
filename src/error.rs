use thiserror::Error;

/// Errors surfaced to callers of this crate.
///
/// External SDK failures never show up here: the capability boundary swallows
/// them and falls back to safe defaults. The only hard error is caller misuse.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// `stop()` called on a recorder that was never started.
    #[error("invalid state: stop() called before start()")]
    InvalidState,
}
