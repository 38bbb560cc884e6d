use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

use crate::session::StreamStatus;

/// Recording errors with source location tracking.
///
/// Legality problems (`StateConflict`) and environment problems
/// (`Watcher`, `Gateway`) are distinct variants so callers can branch
/// without string matching.
#[derive(Error, Debug)]
pub enum RecordingError {
    /// An operation was attempted from a session status that forbids it.
    /// The session is left untouched.
    #[error("{operation} is not allowed while the session is {status:?} {location}")]
    StateConflict {
        /// The rejected operation.
        operation: &'static str,
        /// The session status at the time of the call.
        status: StreamStatus,
        /// Source location where the error occurred.
        location: ErrorLocation,
    },

    /// The play watcher failed to start, stop, or observe game state.
    #[error("Play watcher error: {reason} {location}")]
    Watcher {
        /// Description of the watcher failure.
        reason: String,
        /// Source location where the error occurred.
        location: ErrorLocation,
    },

    /// The stream gateway failed to connect, disconnect, or deliver events.
    #[error("Stream gateway error: {reason} {location}")]
    Gateway {
        /// Description of the gateway failure.
        reason: String,
        /// Source location where the error occurred.
        location: ErrorLocation,
    },
}

impl RecordingError {
    /// Build a `StateConflict` for `operation` rejected in `status`.
    #[track_caller]
    pub fn state_conflict(operation: &'static str, status: StreamStatus) -> Self {
        RecordingError::StateConflict {
            operation,
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build a `Watcher` error from a reason string.
    #[track_caller]
    pub fn watcher(reason: impl Into<String>) -> Self {
        RecordingError::Watcher {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build a `Gateway` error from a reason string.
    #[track_caller]
    pub fn gateway(reason: impl Into<String>) -> Self {
        RecordingError::Gateway {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`RecordingError`].
pub type Result<T> = std::result::Result<T, RecordingError>;
