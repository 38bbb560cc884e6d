use std::sync::Arc;

use uuid::Uuid;

use crate::{error::Result, play::PlayData};

/// Kind of play lifecycle event observed in the game's state files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    /// A play has begun.
    Register,
    /// A previously registered play got new data (typically results).
    Modify,
}

/// Callback invoked for each observed play event.
pub type PlayCallback = Arc<dyn Fn(WatchKind, PlayData) + Send + Sync>;

/// Observes local game state and emits play lifecycle events.
///
/// `stop` must be safe to call even if the watcher never started, and
/// `unsubscribe` of an unknown id is a no-op.
pub trait PlayWatcher: Send + Sync {
    /// Begin watching. Fails if already watching or the watched
    /// location is unavailable.
    fn start(&self) -> Result<()>;

    /// Stop watching. Safe to call when not started.
    fn stop(&self) -> Result<()>;

    /// Register a callback under a subscription key.
    fn subscribe(&self, id: Uuid, callback: PlayCallback);

    /// Remove the callback registered under `id`, if any.
    fn unsubscribe(&self, id: Uuid);
}
