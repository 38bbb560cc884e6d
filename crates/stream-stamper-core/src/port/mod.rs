//! Boundary contracts the recorder consumes and exposes.
//!
//! The watcher and gateway deliver their events from their own
//! background threads; callbacks are therefore `Send + Sync` and
//! shared via `Arc` so an implementation can invoke them outside its
//! own registry lock.

mod play_watcher;
mod presenter;
mod stream_gateway;

pub use {
    play_watcher::{PlayCallback, PlayWatcher, WatchKind},
    presenter::RecordingPresenter,
    stream_gateway::{StreamCallback, StreamEventKind, StreamGateway},
};
