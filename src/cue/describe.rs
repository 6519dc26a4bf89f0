//! Label, contents and time derivations per cue kind.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};

use super::kind::{CueKind, TimerMode};
use super::{Cue, RunState};
use crate::timefmt::{format_time, ms_to_string, DisplayPattern, TimeValue};
use crate::types::CueId;
use crate::variables::{timer_variables, variable_id, Variable};

/// Prefix shown in front of a frozen timer.
const PAUSED_MARK: &str = "\u{23f8}";

/// A cue as the operator sees it in dropdowns and button text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueDescription {
    /// The cue's id.
    pub id: CueId,
    /// Dropdown label, e.g. `Jane Doe, Host (Lower third - a1)`.
    pub label: String,
    /// What the graphic currently shows.
    pub contents: String,
}

/// Label and contents for a cue.
pub fn describe(
    cue: &Cue,
    now: &DateTime<FixedOffset>,
    pattern: &DisplayPattern,
) -> CueDescription {
    CueDescription {
        id: cue.id.clone(),
        label: label(cue),
        contents: contents(cue, now, pattern),
    }
}

/// Human label including the type name and id.
pub fn label(cue: &Cue) -> String {
    let kind = cue.kind();
    let type_name = kind.descriptor().type_name;
    let id = &cue.id;

    let summary = match kind {
        CueKind::LowerThird | CueKind::LowerThirdAnimated => {
            format!("{}, {}", cue.text("line_one"), cue.text("line_two"))
        }
        CueKind::Message | CueKind::IconWithMessage | CueKind::ImageWithMessage => cue.text("body"),
        CueKind::Time => match per_cue_mode(cue) {
            Some(TimerMode::TimeOfDay) => "Current time of day".to_string(),
            Some(TimerMode::ToTimeOfDay) if cue.is_active() => {
                ms_to_string(cue.time_left.unwrap_or(0).saturating_mul(1000))
            }
            Some(TimerMode::ToTimeOfDay) => cue.end_time.clone().unwrap_or_default(),
            _ if cue.is_active() => ms_to_string(cue.time_left.unwrap_or(0)),
            _ => ms_to_string(configured_duration(cue)),
        },
        CueKind::BigTime if cue.is_active() => ms_to_string(cue.time_left.unwrap_or(0)),
        CueKind::BigTime
        | CueKind::TimeCountdown
        | CueKind::TimeCountup
        | CueKind::BigTimeCountdown
        | CueKind::BigTimeCountup
        | CueKind::UtilitySpeakerTimer => ms_to_string(configured_duration(cue)),
        CueKind::TimeTod => "Time of day".to_string(),
        CueKind::TimeToTod => "To time of day".to_string(),
        CueKind::BigTimeToTod => cue.end_time.clone().unwrap_or_default(),
        CueKind::Image | CueKind::Video | CueKind::Audio => cue.text("name"),
        CueKind::Ticker | CueKind::Checklist => cue.text("title"),
        CueKind::Webpage => cue.text("url"),
        CueKind::Credits => cue.text("lead"),
        CueKind::Celebration => cue.text("celebrationType"),
        CueKind::AnimatedBackground => cue.text("animationName"),
        CueKind::NowNextThen => cue.text("items.0.sectionTitle"),
        CueKind::Qr => cue.text("message"),
        CueKind::UtilityLargeText => cue.text("text"),
        CueKind::Social
        | CueKind::Score
        | CueKind::Map
        | CueKind::UtilityTimeOfDay
        | CueKind::UtilityPattern
        | CueKind::Unknown => return format!("{type_name} - {id}"),
    };

    format!("{summary} ({type_name} - {id})")
}

/// What the graphic shows. Timer cues show their current time, marked when frozen.
pub fn contents(cue: &Cue, now: &DateTime<FixedOffset>, pattern: &DisplayPattern) -> String {
    if let Some(value) = remaining(cue, now) {
        let shown = format_time(&value, pattern).composed;
        return if cue.is_paused_or_reset() {
            format!("{PAUSED_MARK} {shown}")
        } else {
            shown
        };
    }

    match cue.kind() {
        CueKind::LowerThird | CueKind::LowerThirdAnimated => {
            format!("{}, {}", cue.text("line_one"), cue.text("line_two"))
        }
        CueKind::Message | CueKind::IconWithMessage | CueKind::ImageWithMessage => cue.text("body"),
        CueKind::Image | CueKind::Video | CueKind::Audio => cue.text("name"),
        CueKind::Ticker | CueKind::Checklist => cue.text("title"),
        CueKind::Social => cue.text("chat.snippet.displayMessage"),
        CueKind::Webpage => cue.text("url"),
        CueKind::Credits => cue.text("lead"),
        CueKind::Celebration => cue.text("celebrationType"),
        CueKind::AnimatedBackground => cue.text("animationName"),
        CueKind::NowNextThen => cue.text("items.0.sectionTitle"),
        CueKind::Qr => cue.text("message"),
        CueKind::UtilityLargeText => cue.text("text"),
        CueKind::Score => "Score".to_string(),
        CueKind::Map => "Map".to_string(),
        CueKind::UtilityPattern => "Pattern".to_string(),
        // Timer kinds always have a time value and returned above.
        _ => "Default".to_string(),
    }
}

/// The time a timer cue displays at `now`; `None` for non-timer kinds.
///
/// Countdowns report remaining time, count-ups elapsed time, to-time-of-day
/// timers the signed distance to their target (negative once passed) and
/// time-of-day cues the current instant.
pub fn remaining(cue: &Cue, now: &DateTime<FixedOffset>) -> Option<TimeValue> {
    let now_ms = now.timestamp_millis();

    let value = match cue.kind() {
        CueKind::Time => match per_cue_mode(cue) {
            Some(TimerMode::TimeOfDay) => TimeValue::Instant(*now),
            Some(TimerMode::ToTimeOfDay) => to_time_of_day(cue, now),
            _ => TimeValue::Duration(cue.time_left.unwrap_or(0)),
        },
        CueKind::BigTime => match per_cue_mode(cue) {
            Some(TimerMode::TimeOfDay) => TimeValue::Instant(*now),
            _ if cue.is_active() => TimeValue::Duration(cue.time_left.unwrap_or(0)),
            _ => TimeValue::Duration(cue.duration_ms.or(cue.duration).unwrap_or(0)),
        },
        kind => match kind.timer_mode()? {
            TimerMode::Countdown => TimeValue::Duration(countdown(cue, now_ms)),
            TimerMode::Countup => TimeValue::Duration(countup(cue, now_ms)),
            TimerMode::ToTimeOfDay => to_time_of_day(cue, now),
            TimerMode::TimeOfDay | TimerMode::PerCue => TimeValue::Instant(*now),
        },
    };

    Some(value)
}

/// Kind-specific variables beyond `_contents` and `_label`.
pub fn extra_variables(
    cue: &Cue,
    now: &DateTime<FixedOffset>,
    pattern: &DisplayPattern,
) -> Vec<Variable> {
    if let Some(value) = remaining(cue, now) {
        return timer_variables(&cue.id, &format_time(&value, pattern));
    }

    let id = &cue.id;
    match cue.kind() {
        CueKind::Social => vec![
            Variable::new(
                variable_id(id, "author"),
                format!("Social - Author ({id})"),
                cue.text("chat.authorDetails.displayName"),
            ),
            Variable::new(
                variable_id(id, "author_profile_image_url"),
                format!("Social - Author Profile Image URL ({id})"),
                cue.text("chat.authorDetails.profileImageUrl"),
            ),
            Variable::new(
                variable_id(id, "source"),
                format!("Social - Source ({id})"),
                cue.text("chat.source"),
            ),
        ],
        CueKind::LowerThirdAnimated => vec![Variable::new(
            variable_id(id, "first_line"),
            label(cue),
            cue.text("line_one"),
        )],
        _ => Vec::new(),
    }
}

fn per_cue_mode(cue: &Cue) -> Option<TimerMode> {
    cue.timer_type.as_deref().and_then(TimerMode::from_timer_type)
}

fn configured_duration(cue: &Cue) -> i64 {
    cue.duration.or(cue.duration_ms).unwrap_or(0)
}

fn countdown(cue: &Cue, now_ms: i64) -> i64 {
    match cue.state {
        Some(RunState::Paused) => cue.paused_time_left.or(cue.time_left).unwrap_or(0),
        Some(RunState::Reset) => configured_duration(cue),
        _ => cue
            .end_at
            .map_or_else(|| configured_duration(cue), |end| end.saturating_sub(now_ms)),
    }
}

fn countup(cue: &Cue, now_ms: i64) -> i64 {
    match cue.state {
        Some(RunState::Paused) => cue.paused_time_elapsed.unwrap_or(0),
        Some(RunState::Reset) => cue.start_offset_ms(),
        _ => cue
            .started_at
            .map_or_else(|| cue.start_offset_ms(), |start| now_ms.saturating_sub(start)),
    }
}

fn to_time_of_day(cue: &Cue, now: &DateTime<FixedOffset>) -> TimeValue {
    let left = target_instant(cue, now)
        .map_or(0, |target| target.timestamp_millis() - now.timestamp_millis());
    TimeValue::Duration(left)
}

/// Resolve the target of a to-time-of-day timer: a Unix timestamp, an RFC 3339
/// date-time, a local date-time, or a bare `HH:MM[:SS]` on today's date.
fn target_instant(cue: &Cue, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let offset = *now.offset();

    if let Some(ms) = cue.end_timestamp {
        return DateTime::from_timestamp_millis(ms).map(|t| t.with_timezone(&offset));
    }

    let text = cue.end_time.as_deref()?.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return naive.and_local_timezone(offset).single();
        }
    }

    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(text, format) {
            return now.date_naive().and_time(time).and_local_timezone(offset).single();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::cue::CueStatus;
    use serde_json::json;

    const NOW_MS: i64 = 1_714_572_000_000; // 2024-05-01T14:00:00Z

    fn now() -> DateTime<FixedOffset> {
        DateTime::from_timestamp_millis(NOW_MS).unwrap().fixed_offset()
    }

    /// A cue of `kind` carrying every content field any kind reads.
    fn fixture(kind: CueKind) -> Cue {
        let mut cue = Cue::new("1", kind.tag())
            .with_field("line_one", "Jane Doe")
            .with_field("line_two", "Host")
            .with_field("body", "Back soon")
            .with_field("name", "logo.png")
            .with_field("title", "Headlines")
            .with_field("url", "https://example.com")
            .with_field("lead", "Produced by")
            .with_field("celebrationType", "confetti")
            .with_field("animationName", "waves")
            .with_field("message", "Scan me")
            .with_field("text", "QUIET")
            .with_field("items", json!([{ "sectionTitle": "Section Title" }]))
            .with_field(
                "chat",
                json!({
                    "authorDetails": {
                        "displayName": "Display Name",
                        "profileImageUrl": "https://img"
                    },
                    "snippet": { "displayMessage": "display message" },
                    "source": "youtube"
                }),
            );
        cue.started_at = Some(NOW_MS - 10_000);
        cue.duration = Some(10_000);
        cue.end_at = Some(NOW_MS + 10_000);
        cue
    }

    #[test]
    fn every_kind_has_a_label_and_contents() {
        let pattern = DisplayPattern::default();
        for kind in CueKind::ALL.into_iter().chain([CueKind::Unknown]) {
            let description = describe(&fixture(kind), &now(), &pattern);
            assert!(!description.label.is_empty(), "{kind:?} label");
            assert!(!description.contents.is_empty(), "{kind:?} contents");
        }
    }

    #[test]
    fn timer_kinds_expose_complete_extra_variables() {
        let pattern = DisplayPattern::default();
        for kind in CueKind::ALL.into_iter().filter(|k| k.is_timer()) {
            let extras = extra_variables(&fixture(kind), &now(), &pattern);
            assert!(!extras.is_empty(), "{kind:?}");
            for variable in extras {
                assert!(!variable.variable_id.is_empty());
                assert!(!variable.name.is_empty());
                assert!(!variable.value.is_empty(), "{kind:?} {}", variable.variable_id);
            }
        }
    }

    #[test]
    fn missing_fields_render_as_empty_segments() {
        let cue = Cue::new("lt", "lower_third");
        assert_eq!(label(&cue), ",  (Lower third - lt)");
        assert_eq!(contents(&cue, &now(), &DisplayPattern::default()), ", ");
    }

    #[test]
    fn unknown_kind_uses_default_descriptor() {
        let cue = Cue::new("z9", "hologram");
        assert_eq!(label(&cue), "Default - z9");
        assert_eq!(contents(&cue, &now(), &DisplayPattern::default()), "Default");
        assert!(remaining(&cue, &now()).is_none());
    }

    #[test]
    fn countdown_follows_run_state() {
        let mut cue = Cue::new("c", "time_countdown");
        cue.duration = Some(60_000);
        cue.end_at = Some(NOW_MS + 42_000);
        cue.paused_time_left = Some(30_000);

        cue.state = Some(RunState::Running);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(42_000)));

        cue.state = Some(RunState::Paused);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(30_000)));
        assert_eq!(contents(&cue, &now(), &DisplayPattern::default()), "\u{23f8} 00:00:30");

        cue.state = Some(RunState::Reset);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(60_000)));
    }

    #[test]
    fn countup_follows_run_state() {
        let mut cue = Cue::new("u", "big_time_countup");
        cue.started_at = Some(NOW_MS - 5_000);
        cue.paused_time_elapsed = Some(7_000);
        cue.start_offset = Some("00:01:00".to_string());

        cue.state = Some(RunState::Running);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(5_000)));

        cue.state = Some(RunState::Paused);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(7_000)));

        cue.state = Some(RunState::Reset);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(60_000)));
    }

    #[test]
    fn extreme_server_timestamps_saturate() {
        let mut up = Cue::new("u", "time_countup");
        up.state = Some(RunState::Running);
        up.started_at = Some(i64::MIN);
        assert_eq!(remaining(&up, &now()), Some(TimeValue::Duration(i64::MAX)));

        let mut down = Cue::new("d", "time_countdown");
        down.state = Some(RunState::Running);
        down.end_at = Some(i64::MIN);
        assert_eq!(remaining(&down, &now()), Some(TimeValue::Duration(i64::MIN)));
        assert!(!contents(&down, &now(), &DisplayPattern::default()).is_empty());
    }

    #[test]
    fn to_time_of_day_goes_negative_after_the_target() {
        let mut cue = Cue::new("t", "time_to_tod");
        cue.end_time = Some("2024-05-01T13:59:00Z".to_string());
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(-60_000)));

        let parts = extra_variables(&cue, &now(), &DisplayPattern::default());
        let hh = parts.iter().find(|v| v.variable_id == "graphic_t_hh").unwrap();
        assert_eq!(hh.value, "-00");

        cue.end_time = Some("14:30".to_string());
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(30 * 60_000)));

        cue.end_time = Some("not a time".to_string());
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(0)));
    }

    #[test]
    fn time_of_day_reports_the_clock() {
        let cue = Cue::new("clock", "utility_time_of_day");
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Instant(now())));
        assert_eq!(contents(&cue, &now(), &DisplayPattern::default()), "14:00:00");
    }

    #[test]
    fn legacy_time_cue_uses_timer_type() {
        let mut cue = Cue::new("old", "time");
        cue.timer_type = Some("countdown".to_string());
        cue.time_left = Some(90_000);
        cue.duration = Some(120_000);
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Duration(90_000)));
        assert_eq!(label(&cue), "00:02:00 (Time - old)");

        cue.status = CueStatus::OnAir;
        assert_eq!(label(&cue), "00:01:30 (Time - old)");

        cue.timer_type = Some("timeOfDay".to_string());
        assert_eq!(label(&cue), "Current time of day (Time - old)");
        assert_eq!(remaining(&cue, &now()), Some(TimeValue::Instant(now())));
    }

    #[test]
    fn social_and_animated_lower_third_extras() {
        let social = fixture(CueKind::Social);
        let extras = extra_variables(&social, &now(), &DisplayPattern::default());
        let ids: Vec<_> = extras.iter().map(|v| v.variable_id.as_str()).collect();
        assert_eq!(
            ids,
            ["graphic_1_author", "graphic_1_author_profile_image_url", "graphic_1_source"]
        );
        assert_eq!(extras[0].value, "Display Name");

        let lt = fixture(CueKind::LowerThirdAnimated);
        let extras = extra_variables(&lt, &now(), &DisplayPattern::default());
        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].variable_id, "graphic_1_first_line");
        assert_eq!(extras[0].value, "Jane Doe");
    }
}
