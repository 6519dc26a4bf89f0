//! Cue model.
//!
//! A cue is one graphic managed by the H2R Graphics server. Every cue has an
//! on-air [`CueStatus`]; timer cues additionally carry a [`RunState`] and the
//! timing fields the server maintains. Type-specific content fields are kept
//! verbatim in [`Cue::fields`] and read through [`Cue::text`].

/// Human labels, contents and time values per cue kind
pub mod describe;
/// Tag table and per-kind presentation
pub mod kind;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::timefmt::parse_duration;
use crate::types::CueId;

pub use describe::{contents, describe, extra_variables, label, remaining, CueDescription};
pub use kind::{CueKind, CueTypeDescriptor, TimerMode};

/// On-air lifecycle of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueStatus {
    /// Idle, not cued.
    #[default]
    Ready,
    /// Cued to go on with the next run.
    Cued,
    /// Animating on.
    Coming,
    /// Fully on air.
    #[serde(rename = "onair")]
    OnAir,
    /// Animating off.
    Going,
    /// Cued to go off with the next run.
    #[serde(rename = "cuedoff")]
    CuedOff,
    /// Off air.
    #[serde(rename = "offair")]
    OffAir,
}

impl CueStatus {
    /// All statuses in lifecycle order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Ready,
            Self::Cued,
            Self::Coming,
            Self::OnAir,
            Self::Going,
            Self::CuedOff,
            Self::OffAir,
        ]
    }

    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Cued => "cued",
            Self::Coming => "coming",
            Self::OnAir => "onair",
            Self::Going => "going",
            Self::CuedOff => "cuedoff",
            Self::OffAir => "offair",
        }
    }

    /// Operator-facing name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Cued => "Cue on",
            Self::Coming => "Coming on air",
            Self::OnAir => "On air",
            Self::Going => "Going off air",
            Self::CuedOff => "Cue off",
            Self::OffAir => "Off air",
        }
    }

    /// Parse a wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.as_str() == name)
    }

    /// Visible or transitioning on screen.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Coming | Self::OnAir | Self::Going)
    }
}

/// Clock lifecycle of a timer cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Counting.
    Running,
    /// Frozen at the paused value.
    Paused,
    /// Back at the starting value.
    Reset,
}

/// One graphic of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Unique id within the project.
    pub id: CueId,
    /// Raw type tag; see [`CueKind`].
    #[serde(rename = "type", default)]
    pub type_tag: String,
    /// On-air status. Unknown values read as `ready`.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: CueStatus,
    /// Run state of timer cues.
    #[serde(
        default,
        deserialize_with = "lenient::run_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<RunState>,
    /// Operator-assigned label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Mode of the multi-mode `time` and `big_time` cues.
    #[serde(rename = "timerType", default, skip_serializing_if = "Option::is_none")]
    pub timer_type: Option<String>,
    /// Configured duration in milliseconds.
    #[serde(default, deserialize_with = "lenient::millis", skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Configured duration in milliseconds (big timer).
    #[serde(
        rename = "durationMS",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<i64>,
    /// Server-maintained remaining time in milliseconds.
    #[serde(
        rename = "timeLeft",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_left: Option<i64>,
    /// Unix milliseconds at which a running countdown reaches zero.
    #[serde(
        rename = "endAt",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_at: Option<i64>,
    /// Target of a to-time-of-day timer (ISO date-time or `HH:MM[:SS]`).
    #[serde(
        rename = "endTime",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<String>,
    /// Target of a legacy to-time-of-day timer in Unix milliseconds.
    #[serde(
        rename = "endTimestamp",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_timestamp: Option<i64>,
    /// Unix milliseconds at which a count-up started.
    #[serde(
        rename = "startedAt",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<i64>,
    /// Remaining milliseconds frozen by a pause.
    #[serde(
        rename = "pausedTimeLeft",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub paused_time_left: Option<i64>,
    /// Elapsed milliseconds frozen by a pause.
    #[serde(
        rename = "pausedTimeElapsed",
        default,
        deserialize_with = "lenient::millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub paused_time_elapsed: Option<i64>,
    /// Count-up starting offset as `HH:MM[:SS]`.
    #[serde(
        rename = "startOffset",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_offset: Option<String>,
    /// Every other field, verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Cue {
    /// A cue with only an id and a type tag.
    pub fn new(id: impl Into<CueId>, type_tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_tag: type_tag.into(),
            status: CueStatus::Ready,
            state: None,
            label: None,
            timer_type: None,
            duration: None,
            duration_ms: None,
            time_left: None,
            end_at: None,
            end_time: None,
            end_timestamp: None,
            started_at: None,
            paused_time_left: None,
            paused_time_elapsed: None,
            start_offset: None,
            fields: Map::new(),
        }
    }

    /// Set a type-specific field.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// The kind this cue's tag names.
    pub fn kind(&self) -> CueKind {
        CueKind::from_tag(&self.type_tag)
    }

    /// Look up a type-specific field by dotted path (`chat.snippet.displayMessage`,
    /// `items.0.sectionTitle`).
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// A field rendered as display text; missing or null fields are empty.
    pub fn text(&self, path: &str) -> String {
        match self.field(path) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// On air, coming or going.
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The timer is counting.
    pub fn is_running(&self) -> bool {
        self.state == Some(RunState::Running)
    }

    /// The timer is frozen: paused or reset.
    pub fn is_paused_or_reset(&self) -> bool {
        matches!(self.state, Some(RunState::Paused | RunState::Reset))
    }

    /// The timer is reset.
    pub fn is_reset(&self) -> bool {
        self.state == Some(RunState::Reset)
    }

    /// Count-up start offset in milliseconds (`0` when unset or unparseable).
    pub fn start_offset_ms(&self) -> i64 {
        self.start_offset
            .as_deref()
            .and_then(parse_duration)
            .unwrap_or(0)
    }
}

/// Forgiving deserializers for fields the server sends in several shapes.
mod lenient {
    use super::{parse_duration, CueStatus, Deserialize, Deserializer, RunState, Value};

    /// Milliseconds from a number, a numeric string or `HH:MM[:SS]`.
    pub fn millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
                    .or_else(|| parse_duration(s))
            }
            _ => None,
        }))
    }

    /// Text from a string or number.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    pub fn status<'de, D>(deserializer: D) -> Result<CueStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(Value::as_str)
            .and_then(CueStatus::parse)
            .unwrap_or_default())
    }

    pub fn run_state<'de, D>(deserializer: D) -> Result<Option<RunState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .and_then(|value| RunState::deserialize(value).ok()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn parses_timer_cue_with_mixed_field_shapes() {
        let cue: Cue = serde_json::from_value(json!({
            "id": 7,
            "type": "time_countdown",
            "status": "onair",
            "state": "paused",
            "duration": "00:01:00",
            "pausedTimeLeft": 42000.4,
            "endAt": "1700000000000",
            "theme": "dark"
        }))
        .unwrap();

        assert_eq!(cue.id, CueId::new("7"));
        assert_eq!(cue.kind(), CueKind::TimeCountdown);
        assert_eq!(cue.status, CueStatus::OnAir);
        assert_eq!(cue.state, Some(RunState::Paused));
        assert_eq!(cue.duration, Some(60_000));
        assert_eq!(cue.paused_time_left, Some(42_000));
        assert_eq!(cue.end_at, Some(1_700_000_000_000));
        assert_eq!(cue.text("theme"), "dark");
        assert!(cue.is_active());
        assert!(cue.is_paused_or_reset());
        assert!(!cue.is_running());
    }

    #[test]
    fn unknown_status_and_state_are_tolerated() {
        let cue: Cue = serde_json::from_value(json!({
            "id": "a",
            "type": "message",
            "status": "teleporting",
            "state": "spinning"
        }))
        .unwrap();

        assert_eq!(cue.status, CueStatus::Ready);
        assert_eq!(cue.state, None);
    }

    #[test]
    fn reads_nested_fields_by_path() {
        let cue = Cue::new("s1", "social")
            .with_field("chat", json!({ "snippet": { "displayMessage": "hello" } }))
            .with_field("items", json!([{ "sectionTitle": "Intro" }]));

        assert_eq!(cue.text("chat.snippet.displayMessage"), "hello");
        assert_eq!(cue.text("items.0.sectionTitle"), "Intro");
        assert_eq!(cue.text("items.3.sectionTitle"), "");
        assert_eq!(cue.text("chat.authorDetails.displayName"), "");
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in CueStatus::all() {
            assert_eq!(CueStatus::parse(status.as_str()), Some(*status));
        }
        assert!(CueStatus::OnAir.is_active());
        assert!(!CueStatus::CuedOff.is_active());
    }
}
