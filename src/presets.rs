//! Ready-made panel buttons.
//!
//! Two basic buttons (run, hide all) plus one show/hide toggle per graphic.
//! Graphic buttons show the graphic's live variable as text and turn red
//! while it is on air.

use std::collections::BTreeMap;

use crate::actions::ids;
use crate::color::{palette, Rgb};
use crate::config::{Config, LabelSource};
use crate::constants::display::DEFAULT_PRESET_TEXT_SIZE;
use crate::constants::feedbacks::GRAPHIC_STATUS;
use crate::cue::{self, Cue, CueKind, CueStatus};
use crate::h2r::commands::StatusChange;
use crate::host::{ButtonStyle, PresetAction, PresetDefinition, PresetFeedback};
use crate::project::Project;
use crate::variables::{substitute, variable_id};

/// Category of the run and hide-all buttons.
pub const BASIC_CATEGORY: &str = "Basic actions";
/// Category of per-graphic buttons.
pub const SHOW_HIDE_CATEGORY: &str = "Show/Hide";

/// Structural cue type that never gets a button.
const SECTION_TAG: &str = "section";

/// Background per status while a graphic transitions or is on air.
const STATUS_COLORS: [(CueStatus, Rgb); 3] = [
    (CueStatus::Coming, palette::DARK_RED),
    (CueStatus::OnAir, palette::RED),
    (CueStatus::Going, palette::DARK_RED),
];

fn basic(id: &str, name: &str, text: &str, action_id: &'static str) -> PresetDefinition {
    PresetDefinition {
        id: id.to_string(),
        category: BASIC_CATEGORY,
        name: name.to_string(),
        style: ButtonStyle {
            text: text.to_string(),
            size: DEFAULT_PRESET_TEXT_SIZE.to_string(),
            color: palette::WHITE,
            bgcolor: palette::BLACK,
            icon: None,
        },
        down: vec![PresetAction {
            action_id,
            options: BTreeMap::new(),
        }],
        feedbacks: Vec::new(),
    }
}

/// Variable suffix a graphic's button shows.
fn label_source(cue: &Cue, config: &Config) -> LabelSource {
    match cue.kind() {
        CueKind::LowerThird | CueKind::LowerThirdAnimated => config.lower_third_label_source,
        _ => LabelSource::Contents,
    }
}

/// Show/hide toggle for one graphic.
pub fn show_hide(cue: &Cue, project: &Project, config: &Config) -> PresetDefinition {
    let descriptor = cue.kind().descriptor();
    let text_variable = variable_id(&cue.id, label_source(cue, config).suffix());

    let mut options = BTreeMap::new();
    options.insert("graphicId".to_string(), cue.id.to_string());
    options.insert("status".to_string(), StatusChange::Toggle.as_str().to_string());

    PresetDefinition {
        id: cue.id.to_string(),
        category: SHOW_HIDE_CATEGORY,
        name: substitute(&cue::label(cue), &project.dynamic_text, false),
        style: ButtonStyle {
            text: format!("$({}:{})", config.instance_label, text_variable),
            size: config.preset_text_size.clone(),
            color: palette::WHITE,
            bgcolor: descriptor.bg_color,
            icon: Some(descriptor.icon),
        },
        down: vec![PresetAction {
            action_id: ids::SHOW_HIDE,
            options,
        }],
        feedbacks: STATUS_COLORS
            .iter()
            .map(|(status, bgcolor)| PresetFeedback {
                feedback_id: GRAPHIC_STATUS,
                graphic_id: cue.id.clone(),
                status: *status,
                bgcolor: *bgcolor,
            })
            .collect(),
    }
}

/// All presets for `project`.
pub fn definitions(project: &Project, config: &Config) -> Vec<PresetDefinition> {
    let mut presets = vec![
        basic("Run", "Run", "Run", ids::RUN),
        basic("Hide", "Hide all graphics", "Hide all", ids::CLEAR),
    ];

    presets.extend(
        project
            .cues
            .iter()
            .filter(|cue| cue.type_tag != SECTION_TAG)
            .map(|cue| show_hide(cue, project, config)),
    );

    presets
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn project() -> Project {
        let mut project = Project {
            cues: vec![
                Cue::new("lt", "lower_third")
                    .with_field("line_one", "[host]")
                    .with_field("line_two", "Host"),
                Cue::new("sec", "section"),
                Cue::new("img", "image").with_field("name", "Logo"),
            ],
            ..Project::default()
        };
        project.dynamic_text.insert("host".to_string(), "Ada".to_string());
        project
    }

    #[test]
    fn basic_buttons_then_one_per_graphic() {
        let presets = definitions(&project(), &Config::default());
        let keys: Vec<_> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(keys, ["Run", "Hide", "lt", "img"]);
        assert_eq!(presets[1].down[0].action_id, "clear");
    }

    #[test]
    fn graphic_button_toggles_and_tracks_status() {
        let presets = definitions(&project(), &Config::default());
        let lt = &presets[2];

        assert_eq!(lt.name, "Ada, Host (Lower third - lt)");
        assert_eq!(lt.style.text, "$(h2r-graphics:graphic_lt_contents)");
        assert_eq!(lt.style.bgcolor, CueKind::LowerThird.descriptor().bg_color);
        assert_eq!(lt.down[0].options["status"], "toggle");

        let statuses: Vec<_> = lt.feedbacks.iter().map(|f| (f.status, f.bgcolor)).collect();
        assert_eq!(
            statuses,
            [
                (CueStatus::Coming, palette::DARK_RED),
                (CueStatus::OnAir, palette::RED),
                (CueStatus::Going, palette::DARK_RED),
            ]
        );
    }

    #[test]
    fn lower_thirds_can_show_their_label() {
        let mut config = Config::default();
        config.lower_third_label_source = LabelSource::Label;
        config.instance_label = "gfx".to_string();
        let presets = definitions(&project(), &config);
        assert_eq!(presets[2].style.text, "$(gfx:graphic_lt_label)");
        assert_eq!(presets[3].style.text, "$(gfx:graphic_img_contents)");
    }
}
