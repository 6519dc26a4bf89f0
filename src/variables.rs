//! Variable projection.
//!
//! Flattens a project's cues and dynamic text into the named values the
//! panel host displays. Every cue yields `graphic_<id>_contents` and
//! `graphic_<id>_label` plus its kind's extra variables; every dynamic-text
//! key yields a variable of the same name.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use crate::constants::display::NOT_SET;
use crate::cue::{self, Cue};
use crate::project::DynamicText;
use crate::timefmt::{DisplayPattern, TimeParts};
use crate::types::CueId;

lazy_static! {
    /// A `[key]` token; non-greedy so adjacent tokens stay separate.
    static ref TOKEN: Regex = Regex::new(r"\[(.*?)\]").unwrap();
}

/// Current variable values keyed by variable id.
pub type VariableValues = BTreeMap<String, String>;

/// A variable as declared to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Id used in `$(label:id)` references.
    pub variable_id: String,
    /// Human description.
    pub name: String,
}

/// A variable with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Id used in `$(label:id)` references.
    pub variable_id: String,
    /// Human description.
    pub name: String,
    /// Current value.
    pub value: String,
}

impl Variable {
    /// Create a variable.
    pub fn new(
        variable_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            variable_id: variable_id.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// The declaration half.
    pub fn definition(&self) -> VariableDefinition {
        VariableDefinition {
            variable_id: self.variable_id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Definitions plus values for a whole project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    /// Declarations in projection order.
    pub definitions: Vec<VariableDefinition>,
    /// Values keyed by id.
    pub values: VariableValues,
}

impl VariableSet {
    fn push(&mut self, variable: Variable) {
        if !self.values.contains_key(&variable.variable_id) {
            self.definitions.push(variable.definition());
        }
        self.values.insert(variable.variable_id, variable.value);
    }
}

/// `graphic_<cue id>_<suffix>`
pub fn variable_id(cue_id: &CueId, suffix: &str) -> String {
    format!("graphic_{cue_id}_{suffix}")
}

/// Hour, minute, second and composed variables for a timer cue.
pub fn timer_variables(cue_id: &CueId, parts: &TimeParts) -> Vec<Variable> {
    vec![
        Variable::new(variable_id(cue_id, "hh"), format!("Hours ({cue_id})"), parts.hours.clone()),
        Variable::new(
            variable_id(cue_id, "mm"),
            format!("Minutes ({cue_id})"),
            parts.minutes.clone(),
        ),
        Variable::new(
            variable_id(cue_id, "ss"),
            format!("Seconds ({cue_id})"),
            parts.seconds.clone(),
        ),
        Variable::new(
            variable_id(cue_id, "hhmmss"),
            format!("Time ({cue_id})"),
            parts.composed.clone(),
        ),
        Variable::new(
            variable_id(cue_id, "hhmm"),
            format!("Time HH:MM ({cue_id})"),
            parts.hours_minutes(),
        ),
    ]
}

/// All variables for one cue.
pub fn variables_for_cue(
    cue: &Cue,
    dynamic_text: &DynamicText,
    now: &DateTime<FixedOffset>,
    pattern: &DisplayPattern,
) -> Vec<Variable> {
    let label = cue::label(cue);
    let contents = substitute(&cue::contents(cue, now, pattern), dynamic_text, false);
    let shown_label = cue
        .label
        .as_deref()
        .filter(|l| !l.is_empty())
        .map_or_else(|| cue.id.to_string(), str::to_string);

    let mut variables = vec![
        Variable::new(variable_id(&cue.id, "contents"), label.clone(), contents),
        Variable::new(variable_id(&cue.id, "label"), label, shown_label),
    ];
    variables.extend(cue::extra_variables(cue, now, pattern));
    variables
}

/// Project cues and dynamic text into variables.
///
/// Pure: the same inputs at the same `now` give the same set.
pub fn project(
    cues: &[Cue],
    dynamic_text: &DynamicText,
    now: &DateTime<FixedOffset>,
    pattern: &DisplayPattern,
) -> VariableSet {
    let mut set = VariableSet::default();

    for cue in cues {
        for variable in variables_for_cue(cue, dynamic_text, now, pattern) {
            set.push(variable);
        }
    }

    for (key, value) in dynamic_text {
        set.push(Variable::new(key.clone(), key.clone(), value.clone()));
    }

    set
}

/// Replace each `[key]` token with `dynamic_text[key]`.
///
/// Tokens are resolved one by one in order of appearance, so a key that is
/// a substring of another key never cross-matches. Unknown keys become empty,
/// or with `keep_brackets` the value stays bracketed and unknown keys read
/// `[Not set]`.
pub fn substitute(text: &str, dynamic_text: &DynamicText, keep_brackets: bool) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            let value = dynamic_text.get(&caps[1]).filter(|v| !v.is_empty());
            match (value, keep_brackets) {
                (Some(v), false) => v.clone(),
                (None, false) => String::new(),
                (Some(v), true) => format!("[{v}]"),
                (None, true) => format!("[{NOT_SET}]"),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::cue::RunState;

    fn text(pairs: &[(&str, &str)]) -> DynamicText {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn now() -> DateTime<FixedOffset> {
        DateTime::from_timestamp_millis(1_714_572_000_000).unwrap().fixed_offset()
    }

    #[test]
    fn substitutes_each_token() {
        let dt = text(&[("a", "X"), ("b", "Y")]);
        assert_eq!(substitute("[a] and [b]", &dt, false), "X and Y");
        assert_eq!(substitute("[missing]", &DynamicText::new(), false), "");
        assert_eq!(substitute("[missing]", &DynamicText::new(), true), "[Not set]");
        assert_eq!(substitute("[a]", &dt, true), "[X]");
        assert_eq!(substitute("no tokens", &dt, false), "no tokens");
    }

    #[test]
    fn substring_keys_do_not_cross_match() {
        let dt = text(&[("text.1", "one"), ("text.10", "ten"), ("text", "bare")]);
        assert_eq!(substitute("[text.10]/[text.1]/[text]", &dt, false), "ten/one/bare");
        assert_eq!(substitute("[text.1][text.1]", &dt, false), "oneone");
    }

    #[test]
    fn projects_cues_and_dynamic_text() {
        let mut message = Cue::new("m1", "message").with_field("body", "Next: [speaker]");
        message.label = Some("Intro card".to_string());
        let plain = Cue::new("p1", "map");
        let dt = text(&[("speaker", "Ada")]);

        let set = project(&[message, plain], &dt, &now(), &DisplayPattern::default());

        assert_eq!(set.values["graphic_m1_contents"], "Next: Ada");
        assert_eq!(set.values["graphic_m1_label"], "Intro card");
        assert_eq!(set.values["graphic_p1_label"], "p1");
        assert_eq!(set.values["graphic_p1_contents"], "Map");
        assert_eq!(set.values["speaker"], "Ada");
        assert_eq!(set.definitions.len(), set.values.len());
        assert_eq!(set.definitions[0].name, "Next: [speaker] (Message - m1)");
    }

    #[test]
    fn timer_cues_project_time_parts() {
        let mut cue = Cue::new("t1", "time_countdown");
        cue.state = Some(RunState::Reset);
        cue.duration = Some(3_723_000);

        let set = project(&[cue], &DynamicText::new(), &now(), &DisplayPattern::default());
        assert_eq!(set.values["graphic_t1_hh"], "01");
        assert_eq!(set.values["graphic_t1_mm"], "02");
        assert_eq!(set.values["graphic_t1_ss"], "03");
        assert_eq!(set.values["graphic_t1_hhmmss"], "01:02:03");
        assert_eq!(set.values["graphic_t1_hhmm"], "01:02");
    }

    #[test]
    fn projection_is_idempotent() {
        let cues = vec![
            Cue::new("a", "lower_third").with_field("line_one", "[name]"),
            Cue::new("b", "utility_time_of_day"),
        ];
        let dt = text(&[("name", "Grace")]);
        let pattern = DisplayPattern::default();

        let first = project(&cues, &dt, &now(), &pattern);
        let second = project(&cues, &dt, &now(), &pattern);
        assert_eq!(first, second);
    }
}
