//! Stream session entities and the recording state machine.
//!
//! A [`StreamSession`] is one recording unit: a status, an optional start
//! time, and an append-only list of [`Timestamp`]s. Status changes go
//! through the transition methods only; an illegal transition returns a
//! [`RecordingError::StateConflict`] and leaves the session untouched.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RecordingError, Result};

/// Lifecycle status of a [`StreamSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreamStatus {
    /// Waiting for recording to be started.
    Waiting,
    /// Recording requested, waiting for the streaming tool's start signal.
    BeforeStream,
    /// Actively recording play events.
    Recording,
    /// Recording finished.
    Completed,
}

impl Default for StreamStatus {
    fn default() -> Self {
        Self::Waiting
    }
}

/// Payload carried by a [`Timestamp`].
pub trait TimestampData {
    /// Whether two payloads describe the same play, ignoring any
    /// result fields. Used to de-duplicate an in-progress play against
    /// its result-enriched follow-up.
    fn equals_without_result(&self, other: &Self) -> bool;
}

/// One logged play event within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timestamp<T> {
    /// Unique timestamp id.
    pub id: Uuid,
    /// Capture-time instant, set at creation and never changed.
    pub occurred_at: DateTime<Local>,
    /// The play payload.
    pub data: T,
}

impl<T> Timestamp<T> {
    /// Create a timestamp occurring now.
    pub fn new(data: T) -> Self {
        Self::at(Local::now(), data)
    }

    /// Create a timestamp at an explicit instant.
    pub fn at(occurred_at: DateTime<Local>, data: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at,
            data,
        }
    }

    /// Elapsed time since `base`, truncated to whole seconds
    /// (toward zero, never rounded).
    pub fn elapsed_since(&self, base: DateTime<Local>) -> Duration {
        Duration::seconds((self.occurred_at - base).num_seconds())
    }
}

/// One recording unit with its timestamp history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSession<T> {
    /// Unique session id, assigned at creation.
    pub id: Uuid,
    /// Current lifecycle status.
    pub status: StreamStatus,
    /// When recording began; `None` until it does. May be edited after
    /// the fact, which is a direct mutation rather than a transition.
    pub start_time: Option<DateTime<Local>>,
    /// Append-only ordered timestamp history.
    pub timestamps: Vec<Timestamp<T>>,
}

impl<T> StreamSession<T> {
    /// Create a fresh session in `Waiting` with no history.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: StreamStatus::Waiting,
            start_time: None,
            timestamps: Vec::new(),
        }
    }

    /// Park the session until the streaming tool signals a start.
    ///
    /// Legal only from `Waiting`.
    pub fn wait_stream(&mut self) -> Result<()> {
        if self.status != StreamStatus::Waiting {
            return Err(RecordingError::state_conflict("wait_stream", self.status));
        }
        self.status = StreamStatus::BeforeStream;
        Ok(())
    }

    /// Begin recording at `start_time`.
    ///
    /// Legal from `Waiting` or `BeforeStream`.
    pub fn start_recording(&mut self, start_time: DateTime<Local>) -> Result<()> {
        match self.status {
            StreamStatus::Waiting | StreamStatus::BeforeStream => {}
            status => {
                return Err(RecordingError::state_conflict("start_recording", status));
            }
        }
        self.start_time = Some(start_time);
        self.status = StreamStatus::Recording;
        Ok(())
    }

    /// Resume a completed recording, keeping start time and history.
    ///
    /// Legal only from `Completed`.
    pub fn resume_recording(&mut self) -> Result<()> {
        if self.status != StreamStatus::Completed {
            return Err(RecordingError::state_conflict(
                "resume_recording",
                self.status,
            ));
        }
        self.status = StreamStatus::Recording;
        Ok(())
    }

    /// Finish recording.
    ///
    /// From `Recording` the session becomes `Completed`. From
    /// `BeforeStream` recording never actually started, so the session
    /// falls back to `Waiting`. Illegal from anywhere else.
    pub fn complete_recording(&mut self) -> Result<()> {
        match self.status {
            StreamStatus::BeforeStream => {
                self.status = StreamStatus::Waiting;
                Ok(())
            }
            StreamStatus::Recording => {
                self.status = StreamStatus::Completed;
                Ok(())
            }
            status => Err(RecordingError::state_conflict(
                "complete_recording",
                status,
            )),
        }
    }

    /// Append a timestamp to the history.
    pub fn add_timestamp(&mut self, timestamp: Timestamp<T>) {
        self.timestamps.push(timestamp);
    }

    /// The most recent timestamp by `occurred_at`.
    ///
    /// Ties are broken by insertion order: the last-appended timestamp
    /// wins.
    pub fn latest_timestamp(&self) -> Option<&Timestamp<T>> {
        self.latest_index().and_then(|i| self.timestamps.get(i))
    }

    pub(crate) fn latest_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, timestamp) in self.timestamps.iter().enumerate() {
            best = match best {
                Some(current)
                    if self
                        .timestamps
                        .get(current)
                        .is_some_and(|c| c.occurred_at > timestamp.occurred_at) =>
                {
                    Some(current)
                }
                _ => Some(index),
            };
        }
        best
    }

    /// Number of timestamps recorded so far.
    pub fn count_timestamps(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the session holds anything worth a reset confirmation:
    /// any timestamp, or a start time.
    pub fn has_content(&self) -> bool {
        !self.timestamps.is_empty() || self.start_time.is_some()
    }

    /// Elapsed-time/timestamp pairs in insertion order, or `None` when
    /// the session has no start time to measure from.
    pub fn timestamp_rows(&self) -> Option<Vec<(Duration, &Timestamp<T>)>> {
        let start_time = self.start_time?;
        Some(
            self.timestamps
                .iter()
                .map(|t| (t.elapsed_since(start_time), t))
                .collect(),
        )
    }
}

impl<T> Default for StreamSession<T> {
    fn default() -> Self {
        Self::new()
    }
}
