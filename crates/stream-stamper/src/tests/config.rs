use crate::config::{
    Config, DEFAULT_HOST, DEFAULT_POLL_INTERVAL_MS, DEFAULT_PORT, DEFAULT_TEMPLATE,
};

use std::path::PathBuf;

/// WHAT: A minimal config file parses with defaults filled in
/// WHY: Users should only have to write the fields they change
#[test]
fn given_minimal_toml_when_parsing_then_defaults_applied() {
    // Given: Only the required watcher directory
    let toml = r#"
        [stream]
        [watcher]
        directory = "/tmp/play-state"
        [format]
    "#;

    // When: Parsing
    let config: Config = toml::from_str(toml).unwrap();

    // Then: Everything else takes its default
    assert!(config.stream.enabled);
    assert_eq!(config.stream.host, DEFAULT_HOST);
    assert_eq!(config.stream.port, DEFAULT_PORT);
    assert_eq!(config.stream.password, "");
    assert_eq!(config.watcher.directory, PathBuf::from("/tmp/play-state"));
    assert_eq!(config.watcher.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    assert_eq!(config.format.template, DEFAULT_TEMPLATE);
    assert!(config.format.defaults.is_empty());
}

/// WHAT: Explicit values survive a serialize/parse round trip
/// WHY: Saving must not silently rewrite user settings
#[test]
fn given_full_config_when_round_tripping_then_values_preserved() {
    let toml = r#"
        [stream]
        enabled = false
        host = "127.0.0.1"
        port = 4460
        password = "hunter2"

        [watcher]
        directory = "/games/infinitas/state"
        poll_interval_ms = 100

        [format]
        template = "$timestamp $title ($ex_score)"

        [format.defaults]
        dj_level = "-"
    "#;
    let config: Config = toml::from_str(toml).unwrap();

    let rendered = toml::to_string_pretty(&config).unwrap();
    let reparsed: Config = toml::from_str(&rendered).unwrap();

    assert!(!reparsed.stream.enabled);
    assert_eq!(reparsed.stream.host, "127.0.0.1");
    assert_eq!(reparsed.stream.port, 4460);
    assert_eq!(reparsed.watcher.poll_interval_ms, 100);
    assert_eq!(reparsed.format.template, "$timestamp $title ($ex_score)");
    assert_eq!(reparsed.format.defaults.len(), 1);
}

/// WHAT: gateway_settings mirrors the stream section
/// WHY: The recorder sees exactly what the user configured
#[test]
fn given_stream_config_when_building_gateway_settings_then_fields_mirror() {
    let toml = r#"
        [stream]
        host = "stream-pc.local"
        port = 4461
        password = "secret"
        [watcher]
        directory = "/tmp/play-state"
        [format]
    "#;
    let config: Config = toml::from_str(toml).unwrap();

    let settings = config.stream.gateway_settings();

    assert!(settings.enabled);
    assert_eq!(settings.host, "stream-pc.local");
    assert_eq!(settings.port, 4461);
    assert_eq!(settings.password, "secret");
}

/// WHAT: The format section builds a working formatter
/// WHY: The template and defaults must flow through to rendering
#[test]
fn given_format_config_when_building_formatter_then_template_in_effect() {
    use chrono::{Local, TimeZone};
    use stream_stamper_core::{PlayData, StreamSession, Timestamp};

    let toml = r#"
        [stream]
        [watcher]
        directory = "/tmp/play-state"
        [format]
        template = "$title / $dj_level"
        [format.defaults]
        dj_level = "?"
    "#;
    let config: Config = toml::from_str(toml).unwrap();
    let formatter = config.format.formatter();

    let noon = Local.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let mut session = StreamSession::new();
    session.start_recording(noon).unwrap();
    let timestamp = Timestamp::at(noon, PlayData::new("spica#11", "spica", 11));

    assert_eq!(formatter.format(&session, &timestamp), "spica / ?");
}
