use crate::{AppError, SessionStore};

use std::path::Path;

use chrono::{Local, TimeZone};
use stream_stamper_core::{PlayData, StreamSession, Timestamp};

fn recorded_session() -> StreamSession<PlayData> {
    let noon = Local.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let mut session = StreamSession::new();
    session.start_recording(noon).unwrap();
    session.add_timestamp(Timestamp::at(noon, PlayData::new("spica#11", "spica", 11)));
    session.complete_recording().unwrap();
    session
}

/// WHAT: A saved session round-trips through its JSON file
/// WHY: Saved sessions must reload with their full history
#[test]
fn given_recorded_session_when_saving_and_loading_then_round_trips() {
    // Given: A completed session and a store in a temp directory
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session = recorded_session();

    // When: Saving and loading back
    let path = store.save(&session).unwrap();
    let loaded = store.load(&path).unwrap();

    // Then: Identity and history survive
    assert_eq!(loaded.id, session.id);
    assert_eq!(loaded.status, session.status);
    assert_eq!(loaded.start_time, session.start_time);
    assert_eq!(loaded.count_timestamps(), 1);
    assert_eq!(loaded.timestamps[0].data.key, "spica#11");
}

/// WHAT: The file is named after the session's start time
/// WHY: Users find sessions by when the stream happened
#[test]
fn given_started_session_when_saving_then_named_after_start_time() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());

    let path = store.save(&recorded_session()).unwrap();

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("2026-08-30_12-00-00.json")
    );
    assert!(path.exists());
}

/// WHAT: Bare file names resolve inside the store directory
/// WHY: The open command takes the name the save command printed
#[test]
fn given_bare_file_name_when_loading_then_resolved_in_store_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session = recorded_session();
    store.save(&session).unwrap();

    let loaded = store.load(Path::new("2026-08-30_12-00-00.json")).unwrap();

    assert_eq!(loaded.id, session.id);
}

/// WHAT: A corrupted file fails with a store error
/// WHY: Bad JSON must not crash the companion
#[test]
fn given_corrupted_file_when_loading_then_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = store.load(&path);

    assert!(matches!(result, Err(AppError::StoreError { .. })));
}

/// WHAT: Loading a missing file fails with a store error
/// WHY: Typos in the open command must surface cleanly
#[test]
fn given_missing_file_when_loading_then_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());

    let result = store.load(Path::new("nope.json"));

    assert!(matches!(result, Err(AppError::StoreError { .. })));
}
