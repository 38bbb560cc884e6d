//! Stream-Stamper: Rhythm-game timestamp companion for stream recordings.

mod app;
mod app_command;
mod config;
mod console_presenter;
mod error;
mod manual_gateway;
mod output_handler;
mod play_file_watcher;
mod session_store;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_presenter::ConsolePresenter,
    error::{AppError, Result as AppResult},
    manual_gateway::ManualStreamGateway,
    output_handler::OutputHandler,
    play_file_watcher::PlayFileWatcher,
    session_store::SessionStore,
};

use crate::config::Config;

use std::sync::Arc;
use std::time::Duration;

use stream_stamper_core::{
    CurrentSessionRepository, InMemoryCurrentSession, PlayRecorder, PlayWatcher, StreamGateway,
};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("stream_stamper=debug,stream_stamper_core=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let sessions_dir = match Config::sessions_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to prepare sessions directory: {:?}", e);
            std::process::exit(1);
        }
    };

    let output_handler = match OutputHandler::new() {
        Ok(oh) => oh,
        Err(e) => {
            error!("Failed to create OutputHandler: {:?}", e);
            std::process::exit(1);
        }
    };

    let formatter = config.format.formatter();

    let watcher = Arc::new(PlayFileWatcher::new(
        &config.watcher.directory,
        Duration::from_millis(config.watcher.poll_interval_ms),
    ));
    let gateway = Arc::new(ManualStreamGateway::new());

    let recorder = PlayRecorder::new(
        config.stream.gateway_settings(),
        Arc::new(InMemoryCurrentSession::new()) as Arc<dyn CurrentSessionRepository>,
        Arc::clone(&watcher) as Arc<dyn PlayWatcher>,
        Arc::clone(&gateway) as Arc<dyn StreamGateway>,
    );

    let app = App {
        recorder,
        gateway,
        presenter: Arc::new(ConsolePresenter::new(formatter.clone())),
        output_handler,
        session_store: SessionStore::new(sessions_dir),
        formatter,
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        if let Err(e) = app.run().await {
            error!(error = ?e, "App error");
            std::process::exit(1);
        }
    });
}
