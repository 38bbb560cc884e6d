use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;

/// Stream lifecycle event reported by the external streaming tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEventKind {
    /// The stream went live.
    StreamStarted,
    /// The stream ended.
    StreamEnded,
}

/// Callback invoked for each stream lifecycle event.
pub type StreamCallback = Arc<dyn Fn(StreamEventKind) + Send + Sync>;

/// Connection to the external streaming tool.
///
/// `connect` is synchronous from the caller's perspective but may take
/// network-bound time. `unsubscribe` of an unknown id is a no-op.
pub trait StreamGateway: Send + Sync {
    /// Open the connection.
    fn connect(&self, host: &str, port: u16, password: &str) -> Result<()>;

    /// Close the connection. Safe to call when not connected.
    fn disconnect(&self) -> Result<()>;

    /// Register a callback under a subscription key.
    fn subscribe(&self, id: Uuid, callback: StreamCallback);

    /// Remove the callback registered under `id`, if any.
    fn unsubscribe(&self, id: Uuid);
}
