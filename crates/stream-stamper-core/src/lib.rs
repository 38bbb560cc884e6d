//! Stream-stamper Core Library
//!
//! Session state machine, play payloads, timestamp template rendering,
//! and the recorder that bridges a play watcher and a stream gateway
//! into one recording session.
//!
//! # Example
//!
//! ```
//! use chrono::Local;
//! use stream_stamper_core::{CoreResult, PlayData, StreamSession, Timestamp, TimestampFormatter};
//!
//! fn main() -> CoreResult<()> {
//!     let mut session = StreamSession::new();
//!     session.start_recording(Local::now())?;
//!
//!     let play = PlayData::new("spica#11", "spica", 11);
//!     let timestamp = Timestamp::new(play);
//!     session.add_timestamp(timestamp.clone());
//!
//!     let formatter = TimestampFormatter::new("$timestamp $title [Lv.$level]");
//!     println!("{}", formatter.format(&session, &timestamp));
//!     Ok(())
//! }
//! ```

mod error;
mod format;
mod play;
mod port;
mod recorder;
mod repository;
mod session;

pub use {
    error::{RecordingError, Result as CoreResult},
    format::{FormatId, TimestampFormatter},
    play::{ChartDetail, ClearLamp, DjLevel, PlayData, PlayResult},
    port::{
        PlayCallback, PlayWatcher, RecordingPresenter, StreamCallback, StreamEventKind,
        StreamGateway, WatchKind,
    },
    recorder::{GatewaySettings, PlayRecorder},
    repository::{CurrentSessionRepository, InMemoryCurrentSession},
    session::{StreamSession, StreamStatus, Timestamp, TimestampData},
};

#[cfg(test)]
mod tests;
