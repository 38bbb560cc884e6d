//! Single-slot storage for the current session.

use parking_lot::Mutex;

use crate::{play::PlayData, session::StreamSession};

/// Owns the single "current session" slot.
///
/// `get` hands out snapshot clones rather than the live object, so
/// readers never observe a half-applied mutation. Only the recorder
/// writes back through `set`.
pub trait CurrentSessionRepository: Send + Sync {
    /// Snapshot of the current session.
    fn get(&self) -> StreamSession<PlayData>;

    /// Replace the current session.
    fn set(&self, session: StreamSession<PlayData>);

    /// Discard the current session and install a fresh `Waiting` one.
    fn reset(&self) -> StreamSession<PlayData>;
}

/// In-memory single-slot repository.
pub struct InMemoryCurrentSession {
    slot: Mutex<StreamSession<PlayData>>,
}

impl InMemoryCurrentSession {
    /// Create a repository holding a fresh `Waiting` session.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(StreamSession::new()),
        }
    }
}

impl Default for InMemoryCurrentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentSessionRepository for InMemoryCurrentSession {
    fn get(&self) -> StreamSession<PlayData> {
        self.slot.lock().clone()
    }

    fn set(&self, session: StreamSession<PlayData>) {
        *self.slot.lock() = session;
    }

    fn reset(&self) -> StreamSession<PlayData> {
        let fresh = StreamSession::new();
        *self.slot.lock() = fresh.clone();
        fresh
    }
}
