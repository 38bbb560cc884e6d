#![allow(clippy::unwrap_used)]

mod app;
mod config;
mod play_file_watcher;
mod session_store;
