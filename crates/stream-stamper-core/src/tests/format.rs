use crate::{
    ChartDetail, ClearLamp, DjLevel, FormatId, PlayData, PlayResult, StreamSession, Timestamp,
    TimestampFormatter,
};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, TimeZone};

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
}

fn started_session() -> StreamSession<PlayData> {
    let mut session = StreamSession::new();
    session.start_recording(noon()).unwrap();
    session
}

fn concluded_play() -> PlayData {
    PlayData {
        key: "spica#11".into(),
        title: "spica".into(),
        level: 11,
        chart_detail: Some(ChartDetail {
            artist: "artist".into(),
            genre: "genre".into(),
            bpm: "93-191".into(),
            difficulty: "ANOTHER".into(),
            note_count: 1200,
        }),
        play_result: Some(PlayResult {
            dj_level: DjLevel::Aaa,
            lamp: ClearLamp::HardClear,
            gauge: "HARD".into(),
            p_great: 512,
            great: 42,
            good: 3,
            bad: 0,
            poor: 3,
            fast: 10,
            slow: 5,
            combo_break: 0,
        }),
    }
}

/// WHAT: A template using every identifier renders fully with complete data
/// WHY: Rendering must never leave a known placeholder behind
#[test]
fn given_full_play_data_when_rendering_all_identifiers_then_every_field_fills() {
    // Given: A session and a concluded play one hour-ish in
    let session = started_session();
    let timestamp = Timestamp::at(noon() + Duration::seconds(3675), concluded_play());

    let template = "$timestamp|$title|$level|$artist|$genre|$bpm|$difficulty|$note_count\
                    |$dj_level|$clear_lamp|$ex_score|$miss_count|$miss_poor|$empty_poor\
                    |$p_great|$great|$good|$bad|$poor|$fast|$slow|$combo_break";
    let formatter = TimestampFormatter::new(template);

    // When: Rendering
    let rendered = formatter.format(&session, &timestamp);

    // Then: Every identifier resolved
    assert_eq!(
        rendered,
        "1:01:15|spica|11|artist|genre|93-191|ANOTHER|1200\
         |AAA|HARD_CLEAR|1066|3|0|3\
         |512|42|3|0|3|10|5|0"
    );
}

/// WHAT: Absent optional sections render as empty strings
/// WHY: An in-progress play has no results yet and must still render
#[test]
fn given_bare_registration_when_rendering_then_result_fields_empty() {
    let session = started_session();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));
    let formatter = TimestampFormatter::new("$title [$dj_level] ($artist)");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "spica [] ()");
}

/// WHAT: Configured defaults replace empty-string fallbacks
/// WHY: Users can choose what an unavailable field looks like
#[test]
fn given_configured_default_when_field_missing_then_default_used() {
    let session = started_session();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));

    let mut defaults = HashMap::new();
    defaults.insert(FormatId::DjLevel, "-".to_string());
    let formatter = TimestampFormatter::with_defaults("$title [$dj_level]", defaults);

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "spica [-]");
}

/// WHAT: Unknown identifiers are left verbatim
/// WHY: Safe substitution must not eat user text it does not understand
#[test]
fn given_unknown_identifier_when_rendering_then_left_verbatim() {
    let session = started_session();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));
    let formatter = TimestampFormatter::new("$nope ${also_nope} $title");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "$nope ${also_nope} spica");
}

/// WHAT: Dollar escaping and braced identifiers work
/// WHY: Templates must be able to contain literal dollar signs
#[test]
fn given_escapes_and_braces_when_rendering_then_substituted_correctly() {
    let session = started_session();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));
    let formatter = TimestampFormatter::new("$$${title}$");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "$spica$");
}

/// WHAT: An unterminated brace is left verbatim
/// WHY: Malformed templates must never make rendering fail
#[test]
fn given_unterminated_brace_when_rendering_then_left_verbatim() {
    let session = started_session();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));
    let formatter = TimestampFormatter::new("${title");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "${title");
}

/// WHAT: A session with no start time renders the timestamp field as empty
/// WHY: Rendering never fails, even before recording begins
#[test]
fn given_unstarted_session_when_rendering_then_timestamp_empty() {
    let session = StreamSession::new();
    let timestamp = Timestamp::at(noon(), PlayData::new("spica#11", "spica", 11));
    let formatter = TimestampFormatter::new("[$timestamp]");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "[]");
}

/// WHAT: Sub-second fractions truncate, never round
/// WHY: 5.9 seconds into the stream is still second 5
#[test]
fn given_subsecond_offset_when_rendering_then_truncated() {
    let session = started_session();
    let timestamp = Timestamp::at(
        noon() + Duration::milliseconds(5900),
        PlayData::new("spica#11", "spica", 11),
    );
    let formatter = TimestampFormatter::new("$timestamp");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "0:00:05");
}

/// WHAT: A timestamp before the (edited) start time renders negative
/// WHY: Start-time edits can push captures before the base instant
#[test]
fn given_capture_before_start_when_rendering_then_negative_offset() {
    let session = started_session();
    let timestamp = Timestamp::at(
        noon() - Duration::seconds(5),
        PlayData::new("spica#11", "spica", 11),
    );
    let formatter = TimestampFormatter::new("$timestamp");

    let rendered = formatter.format(&session, &timestamp);

    assert_eq!(rendered, "-0:00:05");
}
