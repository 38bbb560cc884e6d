//! Rhythm-game play payloads attached to timestamps.

use serde::{Deserialize, Serialize};

use crate::session::TimestampData;

/// Letter grade awarded for a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DjLevel {
    /// AAA grade.
    #[serde(rename = "AAA")]
    Aaa,
    /// AA grade.
    #[serde(rename = "AA")]
    Aa,
    /// A grade.
    A,
    /// B grade.
    B,
    /// C grade.
    C,
    /// D grade.
    D,
    /// E grade.
    E,
    /// F grade.
    F,
}

impl DjLevel {
    /// Display name of the grade.
    pub fn as_str(&self) -> &'static str {
        match self {
            DjLevel::Aaa => "AAA",
            DjLevel::Aa => "AA",
            DjLevel::A => "A",
            DjLevel::B => "B",
            DjLevel::C => "C",
            DjLevel::D => "D",
            DjLevel::E => "E",
            DjLevel::F => "F",
        }
    }

    /// Parse the grade code the game emits (`"AAA"` through `"F"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AAA" => Some(DjLevel::Aaa),
            "AA" => Some(DjLevel::Aa),
            "A" => Some(DjLevel::A),
            "B" => Some(DjLevel::B),
            "C" => Some(DjLevel::C),
            "D" => Some(DjLevel::D),
            "E" => Some(DjLevel::E),
            "F" => Some(DjLevel::F),
            _ => None,
        }
    }
}

impl Default for DjLevel {
    fn default() -> Self {
        Self::F
    }
}

/// Clear lamp awarded for a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearLamp {
    /// Not played.
    #[serde(rename = "NP")]
    NoPlay,
    /// Failed.
    #[serde(rename = "F")]
    Failed,
    /// Assist clear.
    #[serde(rename = "AC")]
    AssistClear,
    /// Easy clear.
    #[serde(rename = "EC")]
    EasyClear,
    /// Normal clear.
    #[serde(rename = "NC")]
    Clear,
    /// Hard clear.
    #[serde(rename = "HC")]
    HardClear,
    /// Ex-hard clear.
    #[serde(rename = "EX")]
    ExHardClear,
    /// Full combo.
    #[serde(rename = "FC")]
    FullCombo,
    /// Perfect full combo.
    #[serde(rename = "PFC")]
    Perfect,
}

impl ClearLamp {
    /// Display name of the lamp.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearLamp::NoPlay => "NO_PLAY",
            ClearLamp::Failed => "FAILED",
            ClearLamp::AssistClear => "ASSIST_CLEAR",
            ClearLamp::EasyClear => "EASY_CLEAR",
            ClearLamp::Clear => "CLEAR",
            ClearLamp::HardClear => "HARD_CLEAR",
            ClearLamp::ExHardClear => "EX_HARD_CLEAR",
            ClearLamp::FullCombo => "FULL_COMBO",
            ClearLamp::Perfect => "PERFECT",
        }
    }

    /// Parse the lamp code the game emits (`"NP"`, `"HC"`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NP" => Some(ClearLamp::NoPlay),
            "F" => Some(ClearLamp::Failed),
            "AC" => Some(ClearLamp::AssistClear),
            "EC" => Some(ClearLamp::EasyClear),
            "NC" => Some(ClearLamp::Clear),
            "HC" => Some(ClearLamp::HardClear),
            "EX" => Some(ClearLamp::ExHardClear),
            "FC" => Some(ClearLamp::FullCombo),
            "PFC" => Some(ClearLamp::Perfect),
            _ => None,
        }
    }
}

impl Default for ClearLamp {
    fn default() -> Self {
        Self::NoPlay
    }
}

/// Final result metrics for a concluded play.
///
/// Counts come from the game as-is; the derived figures below reproduce
/// its arithmetic exactly and may go negative on inconsistent input
/// (no clamping).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    /// Letter grade.
    pub dj_level: DjLevel,
    /// Clear lamp.
    pub lamp: ClearLamp,
    /// Gauge option, empty when unknown.
    pub gauge: String,
    /// P-GREAT count.
    pub p_great: i32,
    /// GREAT count.
    pub great: i32,
    /// GOOD count.
    pub good: i32,
    /// BAD count.
    pub bad: i32,
    /// POOR count.
    pub poor: i32,
    /// FAST count.
    pub fast: i32,
    /// SLOW count.
    pub slow: i32,
    /// COMBO BREAK count.
    pub combo_break: i32,
}

impl PlayResult {
    /// EX score: `p_great * 2 + great`.
    pub fn ex_score(&self) -> i32 {
        self.p_great * 2 + self.great
    }

    /// Miss count (BP): `bad + poor`.
    pub fn miss_count(&self) -> i32 {
        self.bad + self.poor
    }

    /// Missed POOR: `combo_break - bad`.
    pub fn miss_poor(&self) -> i32 {
        self.combo_break - self.bad
    }

    /// Empty POOR: `miss_count - combo_break`.
    pub fn empty_poor(&self) -> i32 {
        self.miss_count() - self.combo_break
    }
}

/// Static chart metadata, available once the game exposes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDetail {
    /// Artist name.
    pub artist: String,
    /// Genre.
    pub genre: String,
    /// BPM, kept as text because the game reports ranges like `93-191`.
    pub bpm: String,
    /// Difficulty name.
    pub difficulty: String,
    /// Note count.
    pub note_count: i32,
}

/// One play of one chart.
///
/// `chart_detail` and `play_result` stay `None` until the play
/// concludes and the game publishes its metrics; the stable `key`
/// identifies the play across that enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayData {
    /// Stable key identifying the play independent of results.
    pub key: String,
    /// Track title.
    pub title: String,
    /// Chart level.
    pub level: i32,
    /// Chart metadata, absent until the play concludes.
    pub chart_detail: Option<ChartDetail>,
    /// Play result, absent until the play concludes.
    pub play_result: Option<PlayResult>,
}

impl PlayData {
    /// Create a bare play registration with no detail or result yet.
    pub fn new(key: impl Into<String>, title: impl Into<String>, level: i32) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            level,
            chart_detail: None,
            play_result: None,
        }
    }
}

impl TimestampData for PlayData {
    fn equals_without_result(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
