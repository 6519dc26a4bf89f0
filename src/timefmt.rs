//! Time formatting for timer and clock variables.
//!
//! Durations render as `[-]HH:MM:SS` with hours wrapped at 24. Whole seconds
//! are truncated toward zero and the sign is only shown when at least one
//! whole second remains, so `-400ms` renders as `00:00:00`, never `-00:00:00`.
//! Absolute instants render through a Luxon-style pattern such as `HH:mm:ss`.

use chrono::{DateTime, FixedOffset};
use std::fmt::Write as _;

use crate::constants::display::DEFAULT_TIME_FORMAT;

/// A value a timer cue displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue {
    /// Signed duration in milliseconds.
    Duration(i64),
    /// An absolute instant, shown as a clock reading.
    Instant(DateTime<FixedOffset>),
}

/// Zero-padded components of a formatted time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParts {
    /// Hour component, carrying the `-` sign for negative durations.
    pub hours: String,
    /// Minute component.
    pub minutes: String,
    /// Second component.
    pub seconds: String,
    /// Full display string.
    pub composed: String,
}

impl TimeParts {
    /// `HH:MM`
    pub fn hours_minutes(&self) -> String {
        format!("{}:{}", self.hours, self.minutes)
    }
}

/// Format a duration in milliseconds.
pub fn format_duration(ms: i64) -> TimeParts {
    let total_secs = ms / 1000;
    let abs_secs = total_secs.unsigned_abs();
    let sign = if total_secs < 0 { "-" } else { "" };

    let hours = format!("{sign}{:02}", (abs_secs / 3600) % 24);
    let minutes = format!("{:02}", (abs_secs / 60) % 60);
    let seconds = format!("{:02}", abs_secs % 60);
    let composed = format!("{hours}:{minutes}:{seconds}");

    TimeParts { hours, minutes, seconds, composed }
}

/// Format an absolute instant with a display pattern.
pub fn format_instant(instant: &DateTime<FixedOffset>, pattern: &DisplayPattern) -> TimeParts {
    TimeParts {
        hours: instant.format("%H").to_string(),
        minutes: instant.format("%M").to_string(),
        seconds: instant.format("%S").to_string(),
        composed: pattern.render(instant),
    }
}

/// Format either kind of time value.
pub fn format_time(value: &TimeValue, pattern: &DisplayPattern) -> TimeParts {
    match value {
        TimeValue::Duration(ms) => format_duration(*ms),
        TimeValue::Instant(instant) => format_instant(instant, pattern),
    }
}

/// Composed `[-]HH:MM:SS` string for a duration.
pub fn ms_to_string(ms: i64) -> String {
    format_duration(ms).composed
}

/// Parse `[-]HH:MM[:SS]` into milliseconds.
///
/// Inverse of [`format_duration`] for whole-second values under 24 hours.
pub fn parse_duration(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, body) = text
        .strip_prefix('-')
        .map_or((false, text), |rest| (true, rest));

    let parts: Vec<&str> = body.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut fields = [0_i64; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part.trim().parse::<u32>().ok()?.into();
    }
    let [h, m, s] = fields;

    let ms = (h * 3600 + m * 60 + s) * 1000;
    Some(if negative { -ms } else { ms })
}

/// A Luxon-style display pattern compiled to a chrono format string.
///
/// Supported tokens: `HH H hh h mm m ss s SSS a yyyy yy MM M dd d`.
/// Text in single quotes and any other character is copied literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPattern {
    source: String,
    strftime: String,
}

impl DisplayPattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            strftime: translate(pattern),
        }
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The equivalent chrono format string.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Render an instant, falling back to `%H:%M:%S` if the pattern fails.
    pub fn render(&self, instant: &DateTime<FixedOffset>) -> String {
        let mut out = String::new();
        if write!(out, "{}", instant.format(&self.strftime)).is_ok() {
            return out;
        }
        instant.format("%H:%M:%S").to_string()
    }
}

impl Default for DisplayPattern {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let token: String = std::iter::repeat(c).take(run).collect();
        match token_spec(&token) {
            Some(spec) => out.push_str(spec),
            None => token.chars().for_each(|ch| push_literal(&mut out, ch)),
        }
        i += run;
    }

    out
}

fn token_spec(token: &str) -> Option<&'static str> {
    Some(match token {
        "HH" => "%H",
        "H" => "%-H",
        "hh" => "%I",
        "h" => "%-I",
        "mm" => "%M",
        "m" => "%-M",
        "ss" => "%S",
        "s" => "%-S",
        "SSS" => "%3f",
        "a" => "%p",
        "yyyy" => "%Y",
        "yy" => "%y",
        "MM" => "%m",
        "M" => "%-m",
        "dd" => "%d",
        "d" => "%-d",
        _ => return None,
    })
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
