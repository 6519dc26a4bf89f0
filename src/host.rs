//! Control-panel host seam.
//!
//! The sync engine never talks to the panel directly. It returns
//! [`HostUpdate`]s which [`apply`] hands to a [`PanelHost`] in order. The
//! definition types here describe actions, presets and feedbacks the way the
//! host registers them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::color::Rgb;
use crate::cue::{self, Cue, CueStatus};
use crate::types::{CueId, ProjectId};
use crate::variables::{VariableDefinition, VariableValues};

/// Connection state shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Connected and the configured project is present.
    Ok,
    /// Socket closed; the transport is reconnecting.
    Disconnected,
    /// The transport reported an error.
    ConnectionFailure(String),
    /// A push arrived without the configured project.
    ProjectNotFound(ProjectId),
}

impl ConnectionStatus {
    /// Whether the host should show the instance as healthy.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Disconnected => write!(f, "Disconnected"),
            Self::ConnectionFailure(reason) => write!(f, "Connection failure: {reason}"),
            Self::ProjectNotFound(id) => write!(f, "Project \"{id}\" not found."),
        }
    }
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Value sent back when chosen.
    pub id: String,
    /// Text shown in the dropdown.
    pub label: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// A graphic dropdown entry: the cue id with its readable label.
    pub fn from_cue(cue: &Cue) -> Self {
        Self::new(cue.id.as_str(), cue::label(cue))
    }

    /// Build choices from static `(id, label)` pairs.
    pub fn list(pairs: &[(&str, &str)]) -> Vec<Self> {
        pairs.iter().map(|(id, label)| Self::new(*id, *label)).collect()
    }
}

/// An option field on an action or feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputField {
    /// Pick one of a fixed set.
    Dropdown {
        /// Option key.
        id: &'static str,
        /// Field label.
        label: &'static str,
        /// Preselected choice id.
        default: String,
        /// Available choices.
        choices: Vec<Choice>,
    },
    /// Free text.
    #[serde(rename = "textinput")]
    TextInput {
        /// Option key.
        id: &'static str,
        /// Field label.
        label: &'static str,
        /// Initial text.
        default: String,
        /// Whether `$(label:var)` references are expanded before use.
        #[serde(rename = "useVariables")]
        use_variables: bool,
    },
    /// A number within an optional range.
    Number {
        /// Option key.
        id: &'static str,
        /// Field label.
        label: &'static str,
        /// Initial value.
        default: f64,
        /// Lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        /// Increment.
        step: f64,
    },
}

impl InputField {
    /// Dropdown with the first choice preselected unless `default` is given.
    pub fn dropdown(
        id: &'static str,
        label: &'static str,
        default: Option<&str>,
        choices: Vec<Choice>,
    ) -> Self {
        let default = default
            .map(str::to_string)
            .or_else(|| choices.first().map(|c| c.id.clone()))
            .unwrap_or_default();
        Self::Dropdown { id, label, default, choices }
    }

    /// Text input that expands variables.
    pub fn text(id: &'static str, label: &'static str) -> Self {
        Self::TextInput {
            id,
            label,
            default: String::new(),
            use_variables: true,
        }
    }

    /// Text input with a starting value and no variable expansion.
    pub fn text_with_default(id: &'static str, label: &'static str, default: &str) -> Self {
        Self::TextInput {
            id,
            label,
            default: default.to_string(),
            use_variables: false,
        }
    }

    /// Number input.
    pub fn number(
        id: &'static str,
        label: &'static str,
        default: f64,
        range: Option<(f64, f64)>,
        step: f64,
    ) -> Self {
        let (min, max) = match range {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        Self::Number { id, label, default, min, max, step }
    }

    /// Option key.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Dropdown { id, .. } | Self::TextInput { id, .. } | Self::Number { id, .. } => id,
        }
    }
}

/// An action the operator can bind to a button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDefinition {
    /// Stable action id.
    #[serde(rename = "actionId")]
    pub action_id: &'static str,
    /// Name shown in the action picker.
    pub name: &'static str,
    /// Option fields.
    pub options: Vec<InputField>,
}

/// Button colours (and optionally text) a feedback or preset applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonStyle {
    /// Button text; may reference variables.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Text size.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub size: String,
    /// Text colour.
    pub color: Rgb,
    /// Background colour.
    pub bgcolor: Rgb,
    /// Icon reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

/// A feedback the host evaluates to restyle buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackDefinition {
    /// Stable feedback id.
    #[serde(rename = "feedbackId")]
    pub feedback_id: &'static str,
    /// Name shown in the feedback picker.
    pub name: &'static str,
    /// Style applied while the feedback holds.
    #[serde(rename = "defaultStyle")]
    pub default_style: ButtonStyle,
    /// Option fields.
    pub options: Vec<InputField>,
}

/// A pressed-button step of a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetAction {
    /// Action to run.
    #[serde(rename = "actionId")]
    pub action_id: &'static str,
    /// Option values keyed by option id.
    pub options: BTreeMap<String, String>,
}

/// A feedback attached to a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetFeedback {
    /// Feedback to evaluate.
    #[serde(rename = "feedbackId")]
    pub feedback_id: &'static str,
    /// Graphic whose status is watched.
    #[serde(rename = "graphicId")]
    pub graphic_id: CueId,
    /// Status that triggers the style.
    pub status: CueStatus,
    /// Background while triggered.
    pub bgcolor: Rgb,
}

/// A ready-made button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetDefinition {
    /// Unique preset key.
    pub id: String,
    /// Preset group.
    pub category: &'static str,
    /// Name in the preset browser.
    pub name: String,
    /// Button look.
    pub style: ButtonStyle,
    /// Actions run on press.
    pub down: Vec<PresetAction>,
    /// Attached feedbacks.
    pub feedbacks: Vec<PresetFeedback>,
}

/// One instruction for the panel host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostUpdate {
    /// Show a connection status.
    Status(ConnectionStatus),
    /// Replace the declared variables.
    VariableDefinitions(Vec<VariableDefinition>),
    /// Set variable values (merged into the current ones).
    VariableValues(VariableValues),
    /// Replace action definitions.
    ActionDefinitions(Vec<ActionDefinition>),
    /// Replace preset definitions.
    PresetDefinitions(Vec<PresetDefinition>),
    /// Replace feedback definitions.
    FeedbackDefinitions(Vec<FeedbackDefinition>),
    /// Re-evaluate every feedback with this id.
    CheckFeedbacks(&'static str),
}

/// The control-panel host.
pub trait PanelHost {
    /// Show a connection status.
    fn update_status(&mut self, status: &ConnectionStatus);

    /// Replace the declared variables.
    fn set_variable_definitions(&mut self, definitions: Vec<VariableDefinition>);

    /// Merge variable values.
    fn set_variable_values(&mut self, values: VariableValues);

    /// Replace action definitions.
    fn set_action_definitions(&mut self, actions: Vec<ActionDefinition>);

    /// Replace preset definitions.
    fn set_preset_definitions(&mut self, presets: Vec<PresetDefinition>);

    /// Replace feedback definitions.
    fn set_feedback_definitions(&mut self, feedbacks: Vec<FeedbackDefinition>);

    /// Re-evaluate feedbacks.
    fn check_feedbacks(&mut self, feedback_id: &str);
}

/// Hand updates to the host in order.
pub fn apply<H: PanelHost + ?Sized>(host: &mut H, updates: Vec<HostUpdate>) {
    for update in updates {
        match update {
            HostUpdate::Status(status) => host.update_status(&status),
            HostUpdate::VariableDefinitions(definitions) => {
                host.set_variable_definitions(definitions);
            }
            HostUpdate::VariableValues(values) => host.set_variable_values(values),
            HostUpdate::ActionDefinitions(actions) => host.set_action_definitions(actions),
            HostUpdate::PresetDefinitions(presets) => host.set_preset_definitions(presets),
            HostUpdate::FeedbackDefinitions(feedbacks) => host.set_feedback_definitions(feedbacks),
            HostUpdate::CheckFeedbacks(id) => host.check_feedbacks(id),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PanelHost for Recorder {
        fn update_status(&mut self, status: &ConnectionStatus) {
            self.calls.push(format!("status {status}"));
        }
        fn set_variable_definitions(&mut self, definitions: Vec<VariableDefinition>) {
            self.calls.push(format!("definitions {}", definitions.len()));
        }
        fn set_variable_values(&mut self, values: VariableValues) {
            self.calls.push(format!("values {}", values.len()));
        }
        fn set_action_definitions(&mut self, actions: Vec<ActionDefinition>) {
            self.calls.push(format!("actions {}", actions.len()));
        }
        fn set_preset_definitions(&mut self, presets: Vec<PresetDefinition>) {
            self.calls.push(format!("presets {}", presets.len()));
        }
        fn set_feedback_definitions(&mut self, feedbacks: Vec<FeedbackDefinition>) {
            self.calls.push(format!("feedbacks {}", feedbacks.len()));
        }
        fn check_feedbacks(&mut self, feedback_id: &str) {
            self.calls.push(format!("check {feedback_id}"));
        }
    }

    #[test]
    fn apply_preserves_order() {
        let mut host = Recorder::default();
        apply(
            &mut host,
            vec![
                HostUpdate::Status(ConnectionStatus::ProjectNotFound(ProjectId::new("p9"))),
                HostUpdate::VariableValues(VariableValues::new()),
                HostUpdate::CheckFeedbacks("graphic_status"),
            ],
        );
        assert_eq!(
            host.calls,
            ["status Project \"p9\" not found.", "values 0", "check graphic_status"]
        );
    }

    #[test]
    fn dropdown_defaults_to_first_choice() {
        let choices = Choice::list(&[("a", "A"), ("b", "B")]);
        let field = InputField::dropdown("graphicId", "Graphic", None, choices);
        match field {
            InputField::Dropdown { default, .. } => assert_eq!(default, "a"),
            other => panic!("unexpected {other:?}"),
        }

        let empty = InputField::dropdown("graphicId", "Graphic", None, Vec::new());
        assert_eq!(empty.id(), "graphicId");
        match empty {
            InputField::Dropdown { default, .. } => assert_eq!(default, ""),
            other => panic!("unexpected {other:?}"),
        }
    }
}
