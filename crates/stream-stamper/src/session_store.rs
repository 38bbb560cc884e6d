//! JSON persistence of recorded sessions.

use crate::{AppError, AppResult};

use std::{fs, io::Write, panic::Location, path::{Path, PathBuf}};

use chrono::Local;
use error_location::ErrorLocation;
use stream_stamper_core::{PlayData, StreamSession};
use tracing::{info, instrument};

/// Saves and loads sessions as pretty-printed JSON files named after
/// their start time (`2026-08-30_21-00-00.json`).
pub struct SessionStore {
    directory: PathBuf,
}

impl SessionStore {
    /// Create a store over `directory`, which must already exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Save `session`, returning the path written.
    ///
    /// A session that never started is named after the current time
    /// instead. Uses the same atomic write pattern as the config file.
    #[track_caller]
    #[instrument(skip(self, session))]
    pub fn save(&self, session: &StreamSession<PlayData>) -> AppResult<PathBuf> {
        let named_after = session.start_time.unwrap_or_else(Local::now);
        let path = self
            .directory
            .join(format!("{}.json", named_after.format("%Y-%m-%d_%H-%M-%S")));

        let contents =
            serde_json::to_string_pretty(session).map_err(|e| AppError::StoreError {
                reason: format!("Failed to serialize session: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let temp_path = path.with_extension("json.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::StoreError {
            reason: format!("Failed to create temp session file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::StoreError {
                reason: format!("Failed to write temp session file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::StoreError {
            reason: format!("Failed to sync temp session file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &path).map_err(|e| AppError::StoreError {
            reason: format!("Failed to rename temp session to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            session_id = %session.id,
            path = ?path,
            timestamps = session.count_timestamps(),
            "Session saved"
        );

        Ok(path)
    }

    /// Load a session from `path`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> AppResult<StreamSession<PlayData>> {
        // Bare file names resolve inside the store directory.
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        };

        let contents = fs::read_to_string(&path).map_err(|e| AppError::StoreError {
            reason: format!("Failed to read session file {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let session: StreamSession<PlayData> =
            serde_json::from_str(&contents).map_err(|e| AppError::StoreError {
                reason: format!("Failed to parse session file {}: {}", path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            session_id = %session.id,
            path = ?path,
            timestamps = session.count_timestamps(),
            "Session loaded"
        );

        Ok(session)
    }
}
