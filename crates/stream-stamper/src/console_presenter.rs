//! Console rendering of recorder notifications.

use stream_stamper_core::{
    PlayData, RecordingPresenter, StreamSession, Timestamp, TimestampFormatter,
};
use tracing::info;

/// [`RecordingPresenter`] that prints one line per session event.
///
/// Recorder callbacks arrive on background threads; printing is cheap
/// enough to do inline.
pub struct ConsolePresenter {
    formatter: TimestampFormatter,
}

impl ConsolePresenter {
    /// Create a presenter rendering timestamps with `formatter`.
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self { formatter }
    }
}

impl RecordingPresenter for ConsolePresenter {
    fn stream_started(&self, session: &StreamSession<PlayData>) {
        info!(session_id = %session.id, "Stream is live");
        println!("recording started");
    }

    fn stream_ended(&self, session: &StreamSession<PlayData>) {
        info!(session_id = %session.id, "Stream went offline");
        println!(
            "recording stopped ({} timestamps)",
            session.count_timestamps()
        );
    }

    fn timestamp_added(&self, session: &StreamSession<PlayData>, timestamp: &Timestamp<PlayData>) {
        println!("+ {}", self.formatter.format(session, timestamp));
    }

    fn timestamp_updated(
        &self,
        session: &StreamSession<PlayData>,
        timestamp: &Timestamp<PlayData>,
    ) {
        println!("* {}", self.formatter.format(session, timestamp));
    }
}
