use crate::app::parse_start_time;

use chrono::{Local, TimeZone};

/// WHAT: A well-formed local datetime parses
/// WHY: edit-start takes the value users read off their video editor
#[test]
fn given_valid_datetime_when_parsing_start_time_then_local_instant() {
    let parsed = parse_start_time("2026-08-30 21:00:00").unwrap();

    assert_eq!(
        parsed,
        Local.with_ymd_and_hms(2026, 8, 30, 21, 0, 0).unwrap()
    );
}

/// WHAT: Malformed input parses to None
/// WHY: The command loop prints usage instead of corrupting the session
#[test]
fn given_malformed_datetime_when_parsing_start_time_then_none() {
    assert!(parse_start_time("21:00:00").is_none());
    assert!(parse_start_time("2026-08-30").is_none());
    assert!(parse_start_time("yesterday evening").is_none());
}
