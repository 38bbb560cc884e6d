use crate::PlayFileWatcher;

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use stream_stamper_core::{PlayData, PlayWatcher, WatchKind};
use uuid::Uuid;

const POLL: Duration = Duration::from_millis(20);
const EVENT_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE: Duration = Duration::from_millis(300);

fn write_state(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Watcher over `dir` with a channel receiving every event.
fn watching(dir: &Path) -> (PlayFileWatcher, mpsc::Receiver<(WatchKind, PlayData)>) {
    let watcher = PlayFileWatcher::new(dir, POLL);
    let (tx, rx) = mpsc::channel();
    watcher.subscribe(
        Uuid::new_v4(),
        std::sync::Arc::new(move |kind, play_data| {
            let _ = tx.send((kind, play_data));
        }),
    );
    (watcher, rx)
}

/// WHAT: Entering the play screen emits a register event
/// WHY: The register is what creates the timestamp
#[test]
fn given_running_watcher_when_play_begins_then_register_emitted() {
    // Given: A menu screen with a chart selected
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), "playstate.txt", "menu");
    write_state(dir.path(), "title.txt", "spica");
    write_state(dir.path(), "level.txt", "11");

    let (watcher, rx) = watching(dir.path());
    watcher.start().unwrap();

    // When: The game enters the play screen
    write_state(dir.path(), "playstate.txt", "play");

    // Then: A register event carries the selected chart
    let (kind, play_data) = rx.recv_timeout(EVENT_TIMEOUT).unwrap();
    assert_eq!(kind, WatchKind::Register);
    assert_eq!(play_data.key, "spica#11");
    assert_eq!(play_data.title, "spica");
    assert_eq!(play_data.level, 11);
    assert!(play_data.play_result.is_none());

    watcher.stop().unwrap();
}

/// WHAT: Leaving the play screen emits a modify event from latest.json
/// WHY: Results only exist once the play is over
#[test]
fn given_play_in_progress_when_play_ends_then_modify_with_results() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), "playstate.txt", "menu");
    write_state(dir.path(), "title.txt", "spica");
    write_state(dir.path(), "level.txt", "11");

    let (watcher, rx) = watching(dir.path());
    watcher.start().unwrap();

    write_state(dir.path(), "playstate.txt", "play");
    rx.recv_timeout(EVENT_TIMEOUT).unwrap();

    // When: The result file lands and the game leaves the play screen
    write_state(
        dir.path(),
        "latest.json",
        r#"{
            "title": "spica",
            "level": 11,
            "artist": "artist",
            "bpm": "93-191",
            "dj_level": "AAA",
            "clear_lamp": "HC",
            "p_great": 512,
            "great": 42,
            "poor": 3
        }"#,
    );
    write_state(dir.path(), "playstate.txt", "result");

    // Then: The modify payload carries detail and result
    let (kind, play_data) = rx.recv_timeout(EVENT_TIMEOUT).unwrap();
    assert_eq!(kind, WatchKind::Modify);
    assert_eq!(play_data.key, "spica#11");
    let detail = play_data.chart_detail.unwrap();
    assert_eq!(detail.artist, "artist");
    assert_eq!(detail.bpm, "93-191");
    let result = play_data.play_result.unwrap();
    assert_eq!(result.ex_score(), 1066);
    assert_eq!(result.lamp.as_str(), "HARD_CLEAR");

    watcher.stop().unwrap();
}

/// WHAT: A stopped watcher emits nothing
/// WHY: Events after stop would leak into the next session
#[test]
fn given_stopped_watcher_when_play_begins_then_silence() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), "playstate.txt", "menu");
    write_state(dir.path(), "title.txt", "spica");
    write_state(dir.path(), "level.txt", "11");

    let (watcher, rx) = watching(dir.path());
    watcher.start().unwrap();
    watcher.stop().unwrap();

    write_state(dir.path(), "playstate.txt", "play");

    assert!(rx.recv_timeout(SILENCE).is_err());
}

/// WHAT: Starting twice or over a missing directory fails
/// WHY: Both are caller mistakes the watcher must reject up front
#[test]
fn given_bad_preconditions_when_starting_then_error() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), "playstate.txt", "menu");

    let (watcher, _rx) = watching(dir.path());
    watcher.start().unwrap();
    assert!(watcher.start().is_err());
    watcher.stop().unwrap();

    let missing = PlayFileWatcher::new(dir.path().join("nope"), POLL);
    assert!(missing.start().is_err());
}

/// WHAT: Unparseable state files are skipped, not fatal
/// WHY: The game writes these files without any locking
#[test]
fn given_unreadable_level_when_play_begins_then_event_skipped() {
    // Given: A level file with garbage in it
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), "playstate.txt", "menu");
    write_state(dir.path(), "title.txt", "spica");
    write_state(dir.path(), "level.txt", "eleven");

    let (watcher, rx) = watching(dir.path());
    watcher.start().unwrap();

    // When: The game enters the play screen
    write_state(dir.path(), "playstate.txt", "play");

    // Then: No event, and the watcher keeps running
    assert!(rx.recv_timeout(SILENCE).is_err());

    write_state(dir.path(), "level.txt", "11");
    write_state(dir.path(), "playstate.txt", "menu");
    // Several polls so the menu state is observed before play returns.
    std::thread::sleep(POLL * 5);
    write_state(dir.path(), "playstate.txt", "play");

    let (kind, play_data) = rx.recv_timeout(EVENT_TIMEOUT).unwrap();
    assert_eq!(kind, WatchKind::Register);
    assert_eq!(play_data.key, "spica#11");

    watcher.stop().unwrap();
}
