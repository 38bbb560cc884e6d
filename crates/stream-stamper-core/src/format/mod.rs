//! Template rendering for timestamp rows.
//!
//! A user template contains `$identifier` placeholders that get
//! replaced with fields extracted from a session/timestamp pair.
//! Rendering never fails: a field that cannot be extracted falls back
//! to a per-identifier default (empty unless configured), and unknown
//! identifiers are left verbatim.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::play::PlayData;
use crate::session::{StreamSession, Timestamp};

/// Placeholder identifiers understood by [`TimestampFormatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum FormatId {
    Timestamp,
    Title,
    Level,
    Artist,
    Genre,
    Bpm,
    Difficulty,
    NoteCount,
    DjLevel,
    ClearLamp,
    ExScore,
    MissCount,
    MissPoor,
    EmptyPoor,
    PGreat,
    Great,
    Good,
    Bad,
    Poor,
    Fast,
    Slow,
    ComboBreak,
}

impl FormatId {
    /// Every known identifier, in extraction order.
    pub const ALL: [FormatId; 22] = [
        FormatId::Timestamp,
        FormatId::Title,
        FormatId::Level,
        FormatId::Artist,
        FormatId::Genre,
        FormatId::Bpm,
        FormatId::Difficulty,
        FormatId::NoteCount,
        FormatId::DjLevel,
        FormatId::ClearLamp,
        FormatId::ExScore,
        FormatId::MissCount,
        FormatId::MissPoor,
        FormatId::EmptyPoor,
        FormatId::PGreat,
        FormatId::Great,
        FormatId::Good,
        FormatId::Bad,
        FormatId::Poor,
        FormatId::Fast,
        FormatId::Slow,
        FormatId::ComboBreak,
    ];

    /// The identifier as it appears in templates (after the `$`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatId::Timestamp => "timestamp",
            FormatId::Title => "title",
            FormatId::Level => "level",
            FormatId::Artist => "artist",
            FormatId::Genre => "genre",
            FormatId::Bpm => "bpm",
            FormatId::Difficulty => "difficulty",
            FormatId::NoteCount => "note_count",
            FormatId::DjLevel => "dj_level",
            FormatId::ClearLamp => "clear_lamp",
            FormatId::ExScore => "ex_score",
            FormatId::MissCount => "miss_count",
            FormatId::MissPoor => "miss_poor",
            FormatId::EmptyPoor => "empty_poor",
            FormatId::PGreat => "p_great",
            FormatId::Great => "great",
            FormatId::Good => "good",
            FormatId::Bad => "bad",
            FormatId::Poor => "poor",
            FormatId::Fast => "fast",
            FormatId::Slow => "slow",
            FormatId::ComboBreak => "combo_break",
        }
    }
}

/// Renders one timestamp of a session into a display/export string.
///
/// Pure: given the same template, session, and timestamp, the output is
/// always the same, with no side effects.
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    template: String,
    defaults: HashMap<FormatId, String>,
}

impl TimestampFormatter {
    /// Create a formatter with empty-string fallbacks for every field.
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_defaults(template, HashMap::new())
    }

    /// Create a formatter with per-identifier fallback values.
    pub fn with_defaults(template: impl Into<String>, defaults: HashMap<FormatId, String>) -> Self {
        Self {
            template: template.into(),
            defaults,
        }
    }

    /// Render `timestamp` in the context of `session`.
    pub fn format(
        &self,
        session: &StreamSession<PlayData>,
        timestamp: &Timestamp<PlayData>,
    ) -> String {
        let mut mapping: HashMap<&'static str, String> = HashMap::new();
        for id in FormatId::ALL {
            let value = extract(id, session, timestamp)
                .unwrap_or_else(|| self.defaults.get(&id).cloned().unwrap_or_default());
            mapping.insert(id.as_str(), value);
        }
        substitute(&self.template, &mapping)
    }
}

/// Extract one field, `None` when the data to compute it is absent.
fn extract(
    id: FormatId,
    session: &StreamSession<PlayData>,
    timestamp: &Timestamp<PlayData>,
) -> Option<String> {
    let data = &timestamp.data;
    match id {
        FormatId::Timestamp => session
            .start_time
            .map(|start| format_elapsed(timestamp.elapsed_since(start))),
        FormatId::Title => Some(data.title.clone()),
        FormatId::Level => Some(data.level.to_string()),
        FormatId::Artist => data.chart_detail.as_ref().map(|c| c.artist.clone()),
        FormatId::Genre => data.chart_detail.as_ref().map(|c| c.genre.clone()),
        FormatId::Bpm => data.chart_detail.as_ref().map(|c| c.bpm.clone()),
        FormatId::Difficulty => data.chart_detail.as_ref().map(|c| c.difficulty.clone()),
        FormatId::NoteCount => data
            .chart_detail
            .as_ref()
            .map(|c| c.note_count.to_string()),
        FormatId::DjLevel => data
            .play_result
            .as_ref()
            .map(|r| r.dj_level.as_str().to_string()),
        FormatId::ClearLamp => data
            .play_result
            .as_ref()
            .map(|r| r.lamp.as_str().to_string()),
        FormatId::ExScore => data.play_result.as_ref().map(|r| r.ex_score().to_string()),
        FormatId::MissCount => data
            .play_result
            .as_ref()
            .map(|r| r.miss_count().to_string()),
        FormatId::MissPoor => data.play_result.as_ref().map(|r| r.miss_poor().to_string()),
        FormatId::EmptyPoor => data
            .play_result
            .as_ref()
            .map(|r| r.empty_poor().to_string()),
        FormatId::PGreat => data.play_result.as_ref().map(|r| r.p_great.to_string()),
        FormatId::Great => data.play_result.as_ref().map(|r| r.great.to_string()),
        FormatId::Good => data.play_result.as_ref().map(|r| r.good.to_string()),
        FormatId::Bad => data.play_result.as_ref().map(|r| r.bad.to_string()),
        FormatId::Poor => data.play_result.as_ref().map(|r| r.poor.to_string()),
        FormatId::Fast => data.play_result.as_ref().map(|r| r.fast.to_string()),
        FormatId::Slow => data.play_result.as_ref().map(|r| r.slow.to_string()),
        FormatId::ComboBreak => data
            .play_result
            .as_ref()
            .map(|r| r.combo_break.to_string()),
    }
}

/// Render a duration as `h:mm:ss`, truncated to whole seconds.
fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Safe substitution: `$name` and `${name}` are replaced when `name` is
/// a known identifier, `$$` escapes a dollar sign, and anything else
/// (unknown names, stray `$`, unterminated braces) is left verbatim.
fn substitute(template: &str, mapping: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    let name = &braced[..end];
                    match mapping.get(name) {
                        Some(value) => out.push_str(value),
                        // Unknown identifier: keep "${name}" as-is.
                        None => out.push_str(&rest[pos..pos + name.len() + 3]),
                    }
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
        } else {
            let len = identifier_len(after);
            if len == 0 {
                out.push('$');
                rest = after;
            } else {
                let name = &after[..len];
                match mapping.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                }
                rest = &after[len..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length in bytes of the leading `[A-Za-z_][A-Za-z0-9_]*` run.
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c.is_ascii_alphanumeric()
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}
