//! Configuration management for stream-stamper.
//!
//! Handles loading and saving TOML configuration files with
//! cross-platform paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{FormatConfig, StreamConfig, WatcherConfig, default_template},
};

use std::{collections::HashMap, fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Streaming-tool connection settings.
    pub stream: StreamConfig,
    /// Play-state watcher settings.
    pub watcher: WatcherConfig,
    /// Timestamp line template settings.
    pub format: FormatConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Note: This does NOT validate the watched directory exists. The
    /// watcher checks it when recording starts, so the app can launch
    /// and let the user fix the path first.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent
    /// corruption if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Directory where saved sessions live, created on first use.
    #[track_caller]
    pub fn sessions_dir() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let dir = proj_dirs.data_dir().join("sessions");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(sessions_dir = ?dir, "Created sessions directory");
        }

        Ok(dir)
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "stream-stamper", "Stream-Stamper").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs = Self::project_dirs()?;
        let watch_dir = proj_dirs.data_dir().join("play-state");

        let config = Config {
            stream: StreamConfig {
                enabled: crate::config::DEFAULT_ENABLED,
                host: crate::config::DEFAULT_HOST.to_string(),
                port: crate::config::DEFAULT_PORT,
                password: String::new(),
            },
            watcher: WatcherConfig {
                directory: watch_dir.clone(),
                poll_interval_ms: crate::config::DEFAULT_POLL_INTERVAL_MS,
            },
            format: FormatConfig {
                template: default_template(),
                defaults: HashMap::new(),
            },
        };

        config.save()?;

        warn!(
            watch_dir = ?watch_dir,
            "Default config created. Point [watcher] directory at the game's state files."
        );

        Ok(config)
    }
}
