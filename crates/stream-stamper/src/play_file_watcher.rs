//! Polling watcher over the game's play-state files.
//!
//! The game's companion exporter maintains four files in one directory:
//! `playstate.txt` (current screen, `play` while a chart runs),
//! `title.txt` and `level.txt` (the selected chart), and `latest.json`
//! (full metrics of the most recently finished play). Entering `play`
//! emits a register event; leaving it emits a modify event built from
//! `latest.json`.

use crate::{AppError, AppResult};

use std::collections::HashMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use error_location::ErrorLocation;
use parking_lot::Mutex;
use serde::Deserialize;
use stream_stamper_core::{
    ChartDetail, ClearLamp, CoreResult, DjLevel, PlayCallback, PlayData, PlayResult,
    PlayWatcher, RecordingError, WatchKind,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const PLAYSTATE_FILE: &str = "playstate.txt";
const TITLE_FILE: &str = "title.txt";
const LEVEL_FILE: &str = "level.txt";
const LATEST_FILE: &str = "latest.json";

/// The playstate value while a chart is being played.
const STATE_PLAYING: &str = "play";

/// Shape of `latest.json`. Every field is lenient so a partially
/// written file still parses.
#[derive(Debug, Default, Deserialize)]
struct LatestPlay {
    #[serde(default)]
    title: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    bpm: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    note_count: i32,
    #[serde(default)]
    dj_level: String,
    #[serde(default)]
    clear_lamp: String,
    #[serde(default)]
    gauge: String,
    #[serde(default)]
    p_great: i32,
    #[serde(default)]
    great: i32,
    #[serde(default)]
    good: i32,
    #[serde(default)]
    bad: i32,
    #[serde(default)]
    poor: i32,
    #[serde(default)]
    fast: i32,
    #[serde(default)]
    slow: i32,
    #[serde(default)]
    combo_break: i32,
}

struct WatcherInner {
    directory: PathBuf,
    poll_interval: Duration,
    callbacks: Mutex<HashMap<Uuid, PlayCallback>>,
    /// Flag of the currently running poll thread, if any. The thread
    /// keeps its own clone and exits once the flag goes false; it is
    /// never joined so `stop` cannot block behind an in-flight event.
    active: Mutex<Option<Arc<AtomicBool>>>,
}

/// [`PlayWatcher`] that polls the game's state files on a background
/// thread.
pub struct PlayFileWatcher {
    inner: Arc<WatcherInner>,
}

impl PlayFileWatcher {
    /// Create a watcher over `directory`, polling at `poll_interval`.
    pub fn new(directory: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                directory: directory.into(),
                poll_interval,
                callbacks: Mutex::new(HashMap::new()),
                active: Mutex::new(None),
            }),
        }
    }
}

impl PlayWatcher for PlayFileWatcher {
    #[instrument(skip(self))]
    fn start(&self) -> CoreResult<()> {
        let mut active = self.inner.active.lock();
        if active.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            return Err(RecordingError::watcher("already watching"));
        }
        if !self.inner.directory.is_dir() {
            return Err(RecordingError::watcher(format!(
                "watched directory not found: {}",
                self.inner.directory.display()
            )));
        }

        let flag = Arc::new(AtomicBool::new(true));
        *active = Some(Arc::clone(&flag));

        // The baseline state is read before the thread exists so a
        // transition right after start() cannot be missed.
        let initial_state = self.inner.read_playstate().unwrap_or_default();
        let inner = Arc::clone(&self.inner);
        std::thread::spawn(move || inner.poll_loop(&flag, initial_state));

        info!(directory = ?self.inner.directory, "Play watcher started");
        Ok(())
    }

    #[instrument(skip(self))]
    fn stop(&self) -> CoreResult<()> {
        if let Some(flag) = self.inner.active.lock().take() {
            flag.store(false, Ordering::SeqCst);
            info!("Play watcher stopped");
        } else {
            debug!("Play watcher was not running");
        }
        Ok(())
    }

    fn subscribe(&self, id: Uuid, callback: PlayCallback) {
        self.inner.callbacks.lock().insert(id, callback);
    }

    fn unsubscribe(&self, id: Uuid) {
        self.inner.callbacks.lock().remove(&id);
    }
}

impl WatcherInner {
    /// Poll until the flag goes false. Runs on its own thread.
    fn poll_loop(&self, flag: &AtomicBool, mut last_state: String) {
        while flag.load(Ordering::SeqCst) {
            std::thread::sleep(self.poll_interval);

            let Some(state) = self.read_playstate() else {
                continue;
            };
            if state == last_state {
                continue;
            }
            debug!(from = %last_state, to = %state, "Play state changed");

            if state == STATE_PLAYING {
                match self.read_registration() {
                    Ok(play_data) => self.emit(WatchKind::Register, play_data),
                    Err(e) => warn!(error = %e, "Skipping unreadable play registration"),
                }
            } else if last_state == STATE_PLAYING {
                match self.read_latest() {
                    Ok(play_data) => self.emit(WatchKind::Modify, play_data),
                    Err(e) => warn!(error = %e, "Skipping unreadable play result"),
                }
            }

            last_state = state;
        }
    }

    fn emit(&self, kind: WatchKind, play_data: PlayData) {
        // Callbacks are invoked outside the registry lock; one may
        // re-enter unsubscribe.
        let callbacks: Vec<PlayCallback> = self.callbacks.lock().values().cloned().collect();
        for callback in callbacks {
            callback(kind, play_data.clone());
        }
    }

    fn read_playstate(&self) -> Option<String> {
        read_text(&self.directory.join(PLAYSTATE_FILE)).ok()
    }

    /// Build the register payload from `title.txt` and `level.txt`.
    fn read_registration(&self) -> AppResult<PlayData> {
        let title = read_text(&self.directory.join(TITLE_FILE))?;
        let level = parse_int(&read_text(&self.directory.join(LEVEL_FILE))?)?;
        Ok(PlayData::new(play_key(&title, level), title, level))
    }

    /// Build the modify payload from `latest.json`.
    fn read_latest(&self) -> AppResult<PlayData> {
        let path = self.directory.join(LATEST_FILE);
        let contents = read_text(&path)?;
        let latest: LatestPlay =
            serde_json::from_str(&contents).map_err(|e| AppError::StoreError {
                reason: format!("Failed to parse {}: {}", path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut play_data = PlayData::new(
            play_key(&latest.title, latest.level),
            latest.title.clone(),
            latest.level,
        );
        play_data.chart_detail = Some(ChartDetail {
            artist: latest.artist,
            genre: latest.genre,
            bpm: latest.bpm,
            difficulty: latest.difficulty,
            note_count: latest.note_count,
        });
        play_data.play_result = Some(PlayResult {
            dj_level: DjLevel::from_code(&latest.dj_level).unwrap_or_default(),
            lamp: ClearLamp::from_code(&latest.clear_lamp).unwrap_or_default(),
            gauge: latest.gauge,
            p_great: latest.p_great,
            great: latest.great,
            good: latest.good,
            bad: latest.bad,
            poor: latest.poor,
            fast: latest.fast,
            slow: latest.slow,
            combo_break: latest.combo_break,
        });
        Ok(play_data)
    }
}

/// Stable play key shared by the register and modify payloads.
fn play_key(title: &str, level: i32) -> String {
    format!("{}#{}", title, level)
}

#[track_caller]
fn read_text(path: &Path) -> AppResult<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| AppError::StoreError {
        reason: format!("Failed to read {}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    Ok(contents.trim().to_string())
}

#[track_caller]
fn parse_int(text: &str) -> AppResult<i32> {
    text.parse().map_err(|e| AppError::StoreError {
        reason: format!("Failed to parse number {:?}: {}", text, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
