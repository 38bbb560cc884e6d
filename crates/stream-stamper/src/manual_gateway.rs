//! Manually driven stream gateway.
//!
//! Stands in for a live connection to the streaming tool: the
//! companion's `live` and `offline` commands feed stream lifecycle
//! events into it. Connection state is tracked so the recorder's
//! connect/disconnect sequencing behaves like the real thing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use stream_stamper_core::{
    CoreResult, RecordingError, StreamCallback, StreamEventKind, StreamGateway,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// [`StreamGateway`] whose events are injected by the user.
#[derive(Default)]
pub struct ManualStreamGateway {
    callbacks: Mutex<HashMap<Uuid, StreamCallback>>,
    connected: AtomicBool,
}

impl ManualStreamGateway {
    /// Create a disconnected gateway with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a stream lifecycle event to every subscriber.
    ///
    /// Dropped with a warning while disconnected, matching a real
    /// gateway that cannot hear events without a connection.
    #[instrument(skip(self))]
    pub fn emit(&self, kind: StreamEventKind) {
        if !self.connected.load(Ordering::SeqCst) {
            warn!(kind = ?kind, "Gateway is not connected, event dropped");
            return;
        }
        // Callbacks are invoked outside the registry lock; one may
        // re-enter unsubscribe.
        let callbacks: Vec<StreamCallback> = self.callbacks.lock().values().cloned().collect();
        for callback in callbacks {
            callback(kind);
        }
    }
}

impl StreamGateway for ManualStreamGateway {
    #[instrument(skip(self, _password))]
    fn connect(&self, host: &str, port: u16, _password: &str) -> CoreResult<()> {
        if self.connected.swap(true, Ordering::SeqCst) {
            return Err(RecordingError::gateway("already connected"));
        }
        info!(host = %host, port = port, "Stream gateway connected");
        Ok(())
    }

    #[instrument(skip(self))]
    fn disconnect(&self) -> CoreResult<()> {
        if self.connected.swap(false, Ordering::SeqCst) {
            info!("Stream gateway disconnected");
        }
        Ok(())
    }

    fn subscribe(&self, id: Uuid, callback: StreamCallback) {
        self.callbacks.lock().insert(id, callback);
    }

    fn unsubscribe(&self, id: Uuid) {
        self.callbacks.lock().remove(&id);
    }
}
