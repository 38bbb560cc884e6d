//! Clipboard export of a session's timestamp list.
//!
//! Renders every timestamp through the configured template and copies
//! the joined lines, ready to paste into a video description.

use crate::{AppError, AppResult};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use stream_stamper_core::{PlayData, StreamSession, TimestampFormatter};
use tracing::{debug, info, instrument, warn};

/// Output handler for clipboard operations.
pub struct OutputHandler {
    pub(crate) clipboard: Clipboard,
}

impl OutputHandler {
    /// Create a new output handler.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("OutputHandler initialized");

        Ok(Self { clipboard })
    }

    /// Copy the session's rendered timestamp list to the clipboard.
    ///
    /// Returns `false` without touching the clipboard when the session
    /// has no start time, since the offsets would be meaningless.
    #[instrument(skip(self, session, formatter))]
    pub fn copy_session(
        &mut self,
        session: &StreamSession<PlayData>,
        formatter: &TimestampFormatter,
    ) -> AppResult<bool> {
        let Some(lines) = render_lines(formatter, session) else {
            warn!(session_id = %session.id, "Session has no start time, nothing copied");
            return Ok(false);
        };

        let text = lines.join("\n");
        self.clipboard
            .set_text(&text)
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(
            session_id = %session.id,
            lines = lines.len(),
            "Timestamp list copied to clipboard"
        );

        Ok(true)
    }
}

/// Render every timestamp of `session`, one line each, in insertion
/// order. `None` when the session has no start time.
pub(crate) fn render_lines(
    formatter: &TimestampFormatter,
    session: &StreamSession<PlayData>,
) -> Option<Vec<String>> {
    let rows = session.timestamp_rows()?;
    Some(
        rows.into_iter()
            .map(|(_, timestamp)| formatter.format(session, timestamp))
            .collect(),
    )
}
