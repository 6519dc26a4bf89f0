//! Feedback evaluation.
//!
//! The only feedback is `graphic_status`: a button lights up while a chosen
//! graphic has a chosen on-air status. Unknown ids are simply inactive.

use std::collections::BTreeMap;

use crate::color::palette;
use crate::constants::feedbacks::GRAPHIC_STATUS;
use crate::cue::{Cue, CueStatus};
use crate::host::{ButtonStyle, Choice, FeedbackDefinition, InputField};
use crate::types::CueId;

/// Whether the cue `cue_id` currently has status `wanted`.
pub fn is_active(cues: &[Cue], cue_id: &CueId, wanted: CueStatus) -> bool {
    cues.iter()
        .find(|cue| &cue.id == cue_id)
        .is_some_and(|cue| cue.status == wanted)
}

/// Evaluate a `graphic_status` feedback from its raw option values
/// (`graphicId`, `status`). Missing or unreadable options are inactive.
pub fn evaluate(cues: &[Cue], options: &BTreeMap<String, String>) -> bool {
    let Some(cue_id) = options.get("graphicId").map(CueId::new) else {
        return false;
    };
    options
        .get("status")
        .map(String::as_str)
        .and_then(CueStatus::parse)
        .is_some_and(|wanted| is_active(cues, &cue_id, wanted))
}

/// Status dropdown entries in lifecycle order.
pub fn status_choices() -> Vec<Choice> {
    CueStatus::all()
        .iter()
        .map(|status| Choice::new(status.as_str(), status.label()))
        .collect()
}

/// Feedback definitions for the current cue list.
pub fn definitions(cues: &[Cue]) -> Vec<FeedbackDefinition> {
    vec![FeedbackDefinition {
        feedback_id: GRAPHIC_STATUS,
        name: "Graphic status",
        default_style: ButtonStyle {
            text: String::new(),
            size: String::new(),
            color: palette::WHITE,
            bgcolor: palette::RED,
            icon: None,
        },
        options: vec![
            InputField::dropdown(
                "status",
                "Status",
                Some(CueStatus::OnAir.as_str()),
                status_choices(),
            ),
            InputField::dropdown(
                "graphicId",
                "Graphic",
                None,
                cues.iter().map(Choice::from_cue).collect(),
            ),
        ],
    }]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn on_air(id: &str) -> Cue {
        let mut cue = Cue::new(id, "message");
        cue.status = CueStatus::OnAir;
        cue
    }

    #[test]
    fn matches_status_of_known_cue() {
        let cues = [on_air("x")];
        assert!(is_active(&cues, &CueId::new("x"), CueStatus::OnAir));
        assert!(!is_active(&cues, &CueId::new("x"), CueStatus::Going));
    }

    #[test]
    fn unknown_cue_is_inactive() {
        assert!(!is_active(&[], &CueId::new("x"), CueStatus::OnAir));
        assert!(!is_active(&[on_air("y")], &CueId::new("x"), CueStatus::OnAir));
    }

    #[test]
    fn evaluates_raw_options() {
        let cues = [on_air("x")];
        let mut options = BTreeMap::new();
        options.insert("graphicId".to_string(), "x".to_string());
        options.insert("status".to_string(), "onair".to_string());
        assert!(evaluate(&cues, &options));

        options.insert("status".to_string(), "sideways".to_string());
        assert!(!evaluate(&cues, &options));

        options.remove("graphicId");
        assert!(!evaluate(&cues, &options));
    }

    #[test]
    fn definition_lists_statuses_and_graphics() {
        let defs = definitions(&[on_air("x")]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].feedback_id, "graphic_status");

        match &defs[0].options[0] {
            InputField::Dropdown { default, choices, .. } => {
                assert_eq!(default, "onair");
                assert_eq!(choices.len(), 7);
                assert_eq!(choices[1].label, "Cue on");
            }
            other => panic!("unexpected {other:?}"),
        }
        match &defs[0].options[1] {
            InputField::Dropdown { default, choices, .. } => {
                assert_eq!(default, "x");
                assert_eq!(choices[0].label, " (Message - x)");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
