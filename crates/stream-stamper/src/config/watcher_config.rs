use crate::config::default_poll_interval_ms;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Play-state watcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Directory holding the game's state files
    /// (`playstate.txt`, `title.txt`, `level.txt`, `latest.json`).
    pub directory: PathBuf,
    /// Polling interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}
