//! Event-driven orchestration of the recording session lifecycle.
//!
//! [`PlayRecorder`] is the only component that mutates the current
//! session slot. It bridges two independent asynchronous event sources
//! (the play watcher and the stream gateway) into one session's
//! lifecycle and exposes synchronous operations to the presentation
//! layer.

use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::{RecordingError, Result},
    play::PlayData,
    port::{
        PlayCallback, PlayWatcher, RecordingPresenter, StreamCallback, StreamEventKind,
        StreamGateway, WatchKind,
    },
    repository::CurrentSessionRepository,
    session::{StreamSession, StreamStatus, Timestamp},
};

/// Connection settings for the external streaming tool.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Whether streaming-tool integration is enabled at all. When
    /// disabled, recording starts immediately instead of waiting for a
    /// stream-started signal.
    pub enabled: bool,
    /// Gateway host.
    pub host: String,
    /// Gateway port.
    pub port: u16,
    /// Gateway password, empty when authentication is off.
    pub password: String,
}

/// State shared between the recorder and its event callbacks.
struct RecorderShared {
    repository: Arc<dyn CurrentSessionRepository>,
    watcher: Arc<dyn PlayWatcher>,
    gateway: Arc<dyn StreamGateway>,
    /// Serializes every session mutation, whether it comes from a
    /// caller thread or from a watcher/gateway callback thread.
    mutation: Mutex<()>,
}

/// Orchestrates the recording session lifecycle.
///
/// Public operations are expected to be called from one thread at a
/// time (the presentation layer offloads long-running calls to a
/// worker); the event handlers are safe to invoke concurrently from
/// the watcher's and gateway's background threads.
pub struct PlayRecorder {
    shared: Arc<RecorderShared>,
    settings: GatewaySettings,
}

impl PlayRecorder {
    /// Create a recorder over the given slot, watcher, and gateway.
    pub fn new(
        settings: GatewaySettings,
        repository: Arc<dyn CurrentSessionRepository>,
        watcher: Arc<dyn PlayWatcher>,
        gateway: Arc<dyn StreamGateway>,
    ) -> Self {
        Self {
            shared: Arc::new(RecorderShared {
                repository,
                watcher,
                gateway,
                mutation: Mutex::new(()),
            }),
            settings,
        }
    }

    /// Snapshot of the current session.
    pub fn current_session(&self) -> StreamSession<PlayData> {
        self.shared.repository.get()
    }

    /// Start recording.
    ///
    /// Requires the current session to be `Waiting`. With integration
    /// enabled the session is parked in `BeforeStream` until the
    /// gateway reports a stream start; a failed connect leaves it
    /// there and propagates (no auto-retry, the subscriptions stay in
    /// place so a retry after cleanup is safe). With integration
    /// disabled, recording begins immediately.
    #[instrument(skip(self, presenter))]
    pub fn start_recording(
        &self,
        presenter: Arc<dyn RecordingPresenter>,
    ) -> Result<StreamSession<PlayData>> {
        info!("Starting play recording");
        let shared = &self.shared;
        let _guard = shared.mutation.lock();
        let mut session = shared.repository.get();

        if session.status != StreamStatus::Waiting {
            let err = RecordingError::state_conflict("start_recording", session.status);
            error!(session_id = %session.id, error = %err, "Failed to start recording");
            return Err(err);
        }

        if self.settings.enabled {
            session.wait_stream()?;
            shared.repository.set(session.clone());
            shared
                .gateway
                .subscribe(session.id, shared.stream_callback(&presenter));

            info!(
                host = %self.settings.host,
                port = self.settings.port,
                "Connecting to the streaming tool"
            );
            if let Err(e) = shared.gateway.connect(
                &self.settings.host,
                self.settings.port,
                &self.settings.password,
            ) {
                // The session stays in BeforeStream so the caller can
                // clean up with stop_recording and try again.
                error!(error = %e, "Gateway connection failed");
                return Err(e);
            }
        } else {
            info!("Streaming-tool integration disabled, recording starts now");
            session.start_recording(Local::now())?;
            shared.repository.set(session.clone());
        }

        shared
            .watcher
            .subscribe(session.id, shared.play_callback(&presenter));
        shared.watcher.start()?;

        info!(session_id = %session.id, "Play recording started");
        Ok(shared.repository.get())
    }

    /// Stop recording and detach both event sources.
    ///
    /// Idempotent: called while `Waiting` or already `Completed` it
    /// warns and returns the session unchanged. Teardown is
    /// best-effort, watcher first, then gateway; a failure in either
    /// is logged and swallowed so the session still completes.
    #[instrument(skip(self))]
    pub fn stop_recording(&self) -> StreamSession<PlayData> {
        info!("Stopping play recording");
        let _guard = self.shared.mutation.lock();
        self.shared.stop_locked()
    }

    /// Resume a completed recording, keeping its history.
    ///
    /// Requires `Completed`. Re-attaches the watcher and, with
    /// integration enabled, reconnects the gateway; I/O failures
    /// propagate after logging.
    #[instrument(skip(self, presenter))]
    pub fn resume_recording(
        &self,
        presenter: Arc<dyn RecordingPresenter>,
    ) -> Result<StreamSession<PlayData>> {
        info!("Resuming play recording");
        let shared = &self.shared;
        let _guard = shared.mutation.lock();
        let mut session = shared.repository.get();

        if session.status != StreamStatus::Completed {
            let err = RecordingError::state_conflict("resume_recording", session.status);
            error!(session_id = %session.id, error = %err, "Failed to resume recording");
            return Err(err);
        }

        session.resume_recording()?;
        shared.repository.set(session.clone());

        shared
            .watcher
            .subscribe(session.id, shared.play_callback(&presenter));
        shared.watcher.start()?;

        if self.settings.enabled {
            shared
                .gateway
                .subscribe(session.id, shared.stream_callback(&presenter));
            shared.gateway.connect(
                &self.settings.host,
                self.settings.port,
                &self.settings.password,
            )?;
        }

        info!(
            session_id = %session.id,
            timestamps = session.count_timestamps(),
            "Play recording resumed"
        );
        Ok(shared.repository.get())
    }

    /// Whether resetting now would destroy recorded data. Used by the
    /// presentation layer to decide on a confirmation prompt.
    pub fn confirm_reset_recording(&self) -> bool {
        self.shared.repository.get().has_content()
    }

    /// Discard the current session and install a fresh `Waiting` one.
    ///
    /// Requires `Completed`. The old session is not retained here;
    /// persisting it beforehand is the presenter's responsibility.
    #[instrument(skip(self))]
    pub fn reset_recording(&self) -> Result<StreamSession<PlayData>> {
        let _guard = self.shared.mutation.lock();
        let session = self.shared.repository.get();

        if session.status != StreamStatus::Completed {
            let err = RecordingError::state_conflict("reset_recording", session.status);
            error!(session_id = %session.id, error = %err, "Failed to reset recording");
            return Err(err);
        }

        let fresh = self.shared.repository.reset();
        info!(
            old_session_id = %session.id,
            new_session_id = %fresh.id,
            "Recording reset"
        );
        Ok(fresh)
    }

    /// Replace the current session with one loaded from storage.
    ///
    /// The loaded session is forced to `Completed` so it can be
    /// resumed or reset. Rejected while a recording is in flight.
    #[instrument(skip(self, session))]
    pub fn load_session(
        &self,
        mut session: StreamSession<PlayData>,
    ) -> Result<StreamSession<PlayData>> {
        let _guard = self.shared.mutation.lock();
        let current = self.shared.repository.get();
        match current.status {
            StreamStatus::Waiting | StreamStatus::Completed => {}
            status => {
                return Err(RecordingError::state_conflict("load_session", status));
            }
        }

        session.status = StreamStatus::Completed;
        self.shared.repository.set(session.clone());
        info!(
            session_id = %session.id,
            timestamps = session.count_timestamps(),
            "Session loaded"
        );
        Ok(session)
    }

    /// Directly edit the current session's start time.
    ///
    /// Not a state transition: the source allows this in any status,
    /// so the before/after values are logged for traceability.
    #[instrument(skip(self))]
    pub fn edit_start_time(&self, start_time: Option<DateTime<Local>>) -> StreamSession<PlayData> {
        let _guard = self.shared.mutation.lock();
        let mut session = self.shared.repository.get();
        info!(
            session_id = %session.id,
            before = ?session.start_time,
            after = ?start_time,
            "Editing session start time"
        );
        session.start_time = start_time;
        self.shared.repository.set(session.clone());
        session
    }
}

impl RecorderShared {
    fn play_callback(self: &Arc<Self>, presenter: &Arc<dyn RecordingPresenter>) -> PlayCallback {
        let shared = Arc::clone(self);
        let presenter = Arc::clone(presenter);
        Arc::new(move |kind, play_data| shared.handle_watch_event(kind, play_data, &presenter))
    }

    fn stream_callback(self: &Arc<Self>, presenter: &Arc<dyn RecordingPresenter>) -> StreamCallback {
        let shared = Arc::clone(self);
        let presenter = Arc::clone(presenter);
        Arc::new(move |kind| shared.handle_stream_event(kind, &presenter))
    }

    /// Gateway event handler; runs on the gateway's callback thread.
    fn handle_stream_event(&self, kind: StreamEventKind, presenter: &Arc<dyn RecordingPresenter>) {
        let _guard = self.mutation.lock();
        let mut session = self.repository.get();
        debug!(kind = ?kind, session_id = %session.id, "Stream event received");

        match kind {
            StreamEventKind::StreamStarted => {
                // Duplicate or late start notifications are expected
                // from the gateway; only BeforeStream honors them.
                if session.status != StreamStatus::BeforeStream {
                    debug!(status = ?session.status, "Stream-started event ignored");
                    return;
                }
                if let Err(e) = session.start_recording(Local::now()) {
                    warn!(error = %e, "Could not apply stream-started event");
                    return;
                }
                self.repository.set(session.clone());
                info!(session_id = %session.id, "Stream started, recording begins");
                presenter.stream_started(&session);
            }
            StreamEventKind::StreamEnded => {
                info!(session_id = %session.id, "Stream ended, stopping recording");
                let session = self.stop_locked();
                presenter.stream_ended(&session);
            }
        }
    }

    /// Watcher event handler; runs on the watcher's thread.
    fn handle_watch_event(
        &self,
        kind: WatchKind,
        play_data: PlayData,
        presenter: &Arc<dyn RecordingPresenter>,
    ) {
        use crate::session::TimestampData;

        let _guard = self.mutation.lock();
        let mut session = self.repository.get();
        debug!(kind = ?kind, key = %play_data.key, "Play event received");

        if session.status != StreamStatus::Recording {
            warn!(
                status = ?session.status,
                "Session is not recording, play event skipped"
            );
            return;
        }

        match kind {
            WatchKind::Register => {
                let timestamp = Timestamp::new(play_data);
                session.add_timestamp(timestamp.clone());
                self.repository.set(session.clone());
                presenter.timestamp_added(&session, &timestamp);
            }
            WatchKind::Modify => {
                let Some(index) = session.latest_index() else {
                    // A modify with no prior register is a glitch in the
                    // game's state files, not an error.
                    warn!("Modify event received but no timestamp exists");
                    return;
                };
                if let Some(latest) = session.timestamps.get_mut(index) {
                    if latest.data.equals_without_result(&play_data) {
                        latest.data = play_data;
                    }
                }
                let Some(timestamp) = session.timestamps.get(index).cloned() else {
                    return;
                };
                self.repository.set(session.clone());
                presenter.timestamp_updated(&session, &timestamp);
            }
        }
    }

    /// Complete the session and detach both sources. The mutation lock
    /// must already be held by the caller.
    fn stop_locked(&self) -> StreamSession<PlayData> {
        let mut session = self.repository.get();
        match session.status {
            StreamStatus::Waiting | StreamStatus::Completed => {
                warn!(
                    session_id = %session.id,
                    status = ?session.status,
                    "Nothing to stop"
                );
                return session;
            }
            _ => {}
        }

        if let Err(e) = session.complete_recording() {
            warn!(session_id = %session.id, error = %e, "Could not complete session");
            return session;
        }
        self.repository.set(session.clone());

        // Watcher teardown comes first, and a failure here must not
        // prevent the gateway disconnect attempt.
        if let Err(e) = self.watcher.stop() {
            error!(error = %e, "Failed to stop the play watcher");
        }
        self.watcher.unsubscribe(session.id);

        self.gateway.unsubscribe(session.id);
        if let Err(e) = self.gateway.disconnect() {
            error!(error = %e, "Failed to disconnect the stream gateway");
        }

        info!(
            session_id = %session.id,
            status = ?session.status,
            "Play recording stopped"
        );
        session
    }
}
