//! Panel actions.
//!
//! [`definitions`] lists every action with option fields built from the
//! current project (graphic, media and theme dropdowns).
//! [`ActionInvocation::to_command`] turns a pressed action back into the
//! [`Command`] to send. Text options arrive with host variables already
//! expanded.

use std::collections::BTreeMap;

use crate::cue::{Cue, CueKind, TimerMode};
use crate::error::{Error, Result};
use crate::h2r::commands::{Command, GraphicUpdate, RowSelection, ScoreChange, StatusChange};
use crate::host::{ActionDefinition, Choice, InputField};
use crate::project::Project;
use crate::timefmt::parse_duration;
use crate::types::CueId;

/// Action ids.
pub mod ids {
    #![allow(missing_docs)]

    pub const RUN: &str = "run";
    pub const CLEAR: &str = "clear";
    pub const SHOW_HIDE: &str = "showHide";
    pub const SHOW_HIDE_BY_TEXT: &str = "showHideGraphicWithVariable";
    pub const LOWER_THIRD: &str = "updateContentLowerThird";
    pub const LOWER_THIRD_ANIMATED: &str = "updateContentLowerThirdAnimated";
    pub const MESSAGE: &str = "updateContentMessage";
    pub const TIME: &str = "updateContentTime";
    pub const BIG_TIMER: &str = "updateContentBigTimer";
    pub const IMAGE: &str = "updateContentImage";
    pub const TICKER: &str = "updateContentTicker";
    pub const WEBPAGE: &str = "updateContentWebpage";
    pub const LARGE_TEXT: &str = "updateContentUtilityLargeText";
    pub const TIMER_RUN: &str = "speakerTimerRun";
    pub const TIMER_RESET: &str = "speakerTimerReset";
    pub const TIMER_PAUSE: &str = "speakerTimerPause";
    pub const TIMER_JUMP: &str = "speakerTimerJump";
    pub const TIMER_DURATION: &str = "speakerTimerDuration";
    pub const SPEAKER_MESSAGE: &str = "speakerTimerSetMessage";
    pub const SPEAKER_MESSAGE_VISIBLE: &str = "speakerTimerToggleMessage";
    pub const SCORE: &str = "updateContentScoreTotal";
    pub const POSITION: &str = "updateGraphicPosition";
    pub const OFFSET_X: &str = "updateGraphicX";
    pub const OFFSET_Y: &str = "updateGraphicY";
    pub const OFFSET_XY: &str = "updateGraphicXY";
    pub const SCALE: &str = "updateGraphicScale";
    pub const THEME: &str = "updateGraphicTheme";
    pub const TEXT_VARIABLE: &str = "setTextVariable";
    pub const LIST_ADD_ROW: &str = "addVariableListItem";
    pub const LIST_SELECT_ROW: &str = "addVariableSelectRow";
    pub const TRANSITION: &str = "setTransitionOverride";
    pub const CUSTOM: &str = "sendCustomHTTP";
}

const POSITIONS: &[(&str, &str)] = &[
    ("tl", "Top Left"),
    ("tc", "Top Middle"),
    ("tr", "Top Right"),
    ("ml", "Middle Left"),
    ("mc", "Middle"),
    ("mr", "Middle Right"),
    ("bl", "Bottom Left"),
    ("bc", "Bottom Middle"),
    ("br", "Bottom Right"),
];

const TRANSITIONS: &[(&str, &str)] = &[
    ("use-theme", "Use theme transition (default)"),
    ("none", "None"),
    ("fade", "Fade"),
    ("slide", "Slide"),
    ("slide_fade", "Slide & Fade"),
    ("scale", "Scale"),
    ("scale_fade", "Scale & Fade"),
    ("blur_fade", "Blur & Fade"),
];

const TEXT_VARIABLES: &[(&str, &str)] = &[
    ("text.1", "[text.1]"),
    ("text.2", "[text.2]"),
    ("text.3", "[text.3]"),
    ("text.4", "[text.4]"),
    ("text.5", "[text.5]"),
    ("text.6", "[text.6]"),
];

const RUNNABLE: &[CueKind] = &[
    CueKind::UtilitySpeakerTimer,
    CueKind::TimeCountdown,
    CueKind::TimeCountup,
    CueKind::BigTimeCountdown,
    CueKind::BigTimeCountup,
];

/// Graphic dropdown entries for cues of the given kinds; every cue when
/// `kinds` is empty.
pub fn graphic_choices(cues: &[Cue], kinds: &[CueKind]) -> Vec<Choice> {
    cues.iter()
        .filter(|cue| kinds.is_empty() || kinds.contains(&cue.kind()))
        .map(Choice::from_cue)
        .collect()
}

fn graphic_dropdown(cues: &[Cue], kinds: &[CueKind]) -> InputField {
    InputField::dropdown("graphicId", "Graphic", None, graphic_choices(cues, kinds))
}

fn status_dropdown() -> InputField {
    let choices = StatusChange::ALL
        .iter()
        .map(|change| Choice::new(change.as_str(), change.label()))
        .collect();
    InputField::dropdown("status", "Show/Hide", Some(StatusChange::Show.as_str()), choices)
}

fn offset_field(id: &'static str, label: &'static str) -> InputField {
    InputField::number(id, label, 0.0, Some((-100.0, 100.0)), 0.5)
}

fn action(
    action_id: &'static str,
    name: &'static str,
    options: Vec<InputField>,
) -> ActionDefinition {
    ActionDefinition { action_id, name, options }
}

/// Every action, with dropdowns filled from `project`.
pub fn definitions(project: &Project) -> Vec<ActionDefinition> {
    let cues = project.cues.as_slice();
    let media: Vec<Choice> = project
        .media
        .iter()
        .map(|m| Choice::new(m.filename.as_str(), m.originalname.as_str()))
        .collect();
    let themes: Vec<Choice> = project
        .themes
        .iter()
        .map(|(id, theme)| Choice::new(id.as_str(), theme.name.as_str()))
        .collect();

    vec![
        action(ids::RUN, "Run", Vec::new()),
        action(ids::CLEAR, "Hide all", Vec::new()),
        action(
            ids::SHOW_HIDE,
            "Show/Hide graphic",
            vec![status_dropdown(), graphic_dropdown(cues, &[])],
        ),
        action(
            ids::SHOW_HIDE_BY_TEXT,
            "Show/Hide graphic (using Text or Variable)",
            vec![status_dropdown(), InputField::text("graphicId", "Graphic")],
        ),
        action(
            ids::LOWER_THIRD,
            "Update content - Lower third",
            vec![
                graphic_dropdown(cues, &[CueKind::LowerThird]),
                InputField::text("line_one", "Line one"),
                InputField::text("line_two", "Line two"),
            ],
        ),
        action(
            ids::LOWER_THIRD_ANIMATED,
            "Update content - Lower Third Animated",
            vec![
                graphic_dropdown(cues, &[CueKind::LowerThirdAnimated]),
                InputField::dropdown(
                    "animationName",
                    "Animation",
                    None,
                    Choice::list(&[
                        ("reveal", "Reveal"),
                        ("unfold", "Unfold"),
                        ("slide-out", "Slide out"),
                    ]),
                ),
                InputField::text("line_one", "Line one"),
                InputField::text("line_two", "Line two"),
            ],
        ),
        action(
            ids::MESSAGE,
            "Update content - Message",
            vec![
                graphic_dropdown(cues, &[CueKind::Message]),
                InputField::text("body", "Message body"),
            ],
        ),
        action(
            ids::TIME,
            "Update content - Time",
            vec![
                graphic_dropdown(cues, &[CueKind::Time]),
                InputField::dropdown(
                    "type",
                    "Type",
                    None,
                    vec![
                        Choice::new(TimerMode::TimeOfDay.timer_type(), "Current time of day"),
                        Choice::new(TimerMode::ToTimeOfDay.timer_type(), "To time of day"),
                        Choice::new(TimerMode::Countdown.timer_type(), "Count down"),
                        Choice::new(TimerMode::Countup.timer_type(), "Count up"),
                    ],
                ),
                InputField::text_with_default("time", "Time (HH:MM:SS)", "00:01:00"),
            ],
        ),
        action(
            ids::BIG_TIMER,
            "Update content - Big Timer",
            vec![
                graphic_dropdown(cues, &[CueKind::BigTime]),
                InputField::dropdown(
                    "shape",
                    "Shape",
                    None,
                    Choice::list(&[("circle", "Circle"), ("line", "Line"), ("mask", "Mask")]),
                ),
                InputField::dropdown(
                    "type",
                    "Type",
                    None,
                    vec![
                        Choice::new(TimerMode::Countdown.timer_type(), "Count down"),
                        Choice::new(TimerMode::Countup.timer_type(), "Count up"),
                    ],
                ),
                InputField::text_with_default("time", "Time (HH:MM:SS)", "00:01:00"),
            ],
        ),
        action(
            ids::IMAGE,
            "Update content - Image",
            vec![
                graphic_dropdown(cues, &[CueKind::Image]),
                InputField::text("imageName", "Name"),
                InputField::dropdown("imageFilename", "Image", None, media),
            ],
        ),
        action(
            ids::TICKER,
            "Update content - Ticker",
            vec![
                graphic_dropdown(cues, &[CueKind::Ticker]),
                InputField::text("title", "Title"),
                InputField::text("items", "Items (Use | to split items)"),
            ],
        ),
        action(
            ids::WEBPAGE,
            "Update content - Webpage",
            vec![
                graphic_dropdown(cues, &[CueKind::Webpage]),
                InputField::text("name", "Name"),
                InputField::text("url", "URL"),
            ],
        ),
        action(
            ids::LARGE_TEXT,
            "Update content - Large Text (Utility)",
            vec![
                graphic_dropdown(cues, &[CueKind::UtilityLargeText]),
                InputField::text("text", "Text"),
            ],
        ),
        action(ids::TIMER_RUN, "Run/Resume - Timer", vec![graphic_dropdown(cues, RUNNABLE)]),
        action(ids::TIMER_RESET, "Reset - Timer", vec![graphic_dropdown(cues, RUNNABLE)]),
        action(ids::TIMER_PAUSE, "Pause - Timer", vec![graphic_dropdown(cues, RUNNABLE)]),
        action(
            ids::TIMER_JUMP,
            "Add/Remove time - Timer",
            vec![
                graphic_dropdown(cues, RUNNABLE),
                InputField::number("amount", "Amount in seconds (+/-)", 10.0, None, 1.0),
            ],
        ),
        action(
            ids::TIMER_DURATION,
            "Set duration - Timer",
            vec![
                graphic_dropdown(
                    cues,
                    &[CueKind::UtilitySpeakerTimer, CueKind::TimeCountdown, CueKind::TimeCountup],
                ),
                InputField::text_with_default("time", "Time (HH:MM:SS)", "00:01:00"),
            ],
        ),
        action(
            ids::SPEAKER_MESSAGE,
            "Speaker Timer - Set Message to speaker",
            vec![
                graphic_dropdown(cues, &[CueKind::UtilitySpeakerTimer]),
                InputField::text("body", "Message"),
            ],
        ),
        action(
            ids::SPEAKER_MESSAGE_VISIBLE,
            "Speaker Timer - Show/Hide message to speaker",
            vec![
                graphic_dropdown(cues, &[CueKind::UtilitySpeakerTimer]),
                InputField::dropdown(
                    "status",
                    "Show/Hide",
                    None,
                    Choice::list(&[("true", "Show"), ("false", "Hide")]),
                ),
            ],
        ),
        action(
            ids::SCORE,
            "Update content - Score - Total",
            vec![
                graphic_dropdown(cues, &[CueKind::Score]),
                InputField::dropdown(
                    "team",
                    "Team number",
                    None,
                    Choice::list(&[("1", "1"), ("2", "2")]),
                ),
                InputField::dropdown(
                    "level",
                    "Level number",
                    None,
                    Choice::list(&[
                        ("1", "1"),
                        ("2", "2"),
                        ("3", "3"),
                        ("4", "4"),
                        ("5", "5"),
                        ("6", "6"),
                    ]),
                ),
                InputField::dropdown(
                    "type",
                    "Type",
                    None,
                    Choice::list(&[
                        ("set", "Set score"),
                        ("up", "Increment up"),
                        ("down", "Decrement down"),
                    ]),
                ),
                InputField::number("amount", "Amount", 1.0, Some((-1000.0, 1000.0)), 1.0),
            ],
        ),
        action(
            ids::POSITION,
            "Update graphic position",
            vec![
                graphic_dropdown(cues, &[]),
                InputField::dropdown("position", "Position", Some("mc"), Choice::list(POSITIONS)),
            ],
        ),
        action(
            ids::OFFSET_X,
            "Update graphic offset X",
            vec![graphic_dropdown(cues, &[]), offset_field("x", "X (-100 to 100)")],
        ),
        action(
            ids::OFFSET_Y,
            "Update graphic offset Y",
            vec![graphic_dropdown(cues, &[]), offset_field("y", "Y (-100 to 100)")],
        ),
        action(
            ids::OFFSET_XY,
            "Update graphic offset X & Y",
            vec![
                graphic_dropdown(cues, &[]),
                offset_field("x", "X (-100 to 100)"),
                offset_field("y", "Y (-100 to 100)"),
            ],
        ),
        action(
            ids::SCALE,
            "Update graphic scale",
            vec![
                graphic_dropdown(cues, &[]),
                InputField::number("scale", "Scale (1 to 500)", 100.0, Some((1.0, 500.0)), 0.5),
            ],
        ),
        action(
            ids::THEME,
            "Update graphic theme",
            vec![graphic_dropdown(cues, &[]), InputField::dropdown("theme", "Theme", None, themes)],
        ),
        action(
            ids::TEXT_VARIABLE,
            "Set text variable",
            vec![
                InputField::dropdown(
                    "variable",
                    "Text variable",
                    None,
                    Choice::list(TEXT_VARIABLES),
                ),
                InputField::text("text", "Text"),
            ],
        ),
        action(
            ids::LIST_ADD_ROW,
            "Variable List - Add item",
            vec![
                InputField::number("listId", "List", 1.0, Some((1.0, 100.0)), 1.0),
                InputField::text("colOne", "Column 1"),
                InputField::text("colTwo", "Column 2"),
                InputField::text("colThree", "Column 3"),
            ],
        ),
        action(
            ids::LIST_SELECT_ROW,
            "Variable List - Select row",
            vec![
                InputField::number("listId", "List", 1.0, Some((1.0, 100.0)), 1.0),
                InputField::dropdown(
                    "nextPreviousNumber",
                    "Next/Previous/Number",
                    None,
                    Choice::list(&[
                        ("next", "Next"),
                        ("previous", "Previous"),
                        ("number", "Number"),
                    ]),
                ),
                InputField::number("number", "Row number", 1.0, Some((1.0, 1000.0)), 1.0),
            ],
        ),
        action(
            ids::TRANSITION,
            "Set Transition Override",
            vec![
                graphic_dropdown(cues, &[]),
                InputField::dropdown("override", "Transition", None, Choice::list(TRANSITIONS)),
            ],
        ),
        action(ids::CUSTOM, "Send custom HTTP", vec![InputField::text("uri", "URI")]),
    ]
}

/// An action pressed on the panel, with its option values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInvocation {
    /// Which action.
    pub action_id: String,
    /// Option values keyed by option id.
    pub options: BTreeMap<String, String>,
}

impl ActionInvocation {
    /// Create an invocation from `(option, value)` pairs.
    pub fn new(action_id: impl Into<String>, options: &[(&str, &str)]) -> Self {
        Self {
            action_id: action_id.into(),
            options: options
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Parse `actionId option=value ...` words, as typed on a command line.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let action_id = args
            .next()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::parse("missing action id", "action"))?;

        let mut options = BTreeMap::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Error::parse(format!("expected option=value, got '{arg}'"), "action")
            })?;
            options.insert(key.to_string(), value.to_string());
        }

        Ok(Self { action_id, options })
    }

    fn text(&self, key: &str) -> String {
        self.options.get(key).cloned().unwrap_or_default()
    }

    fn required(&self, key: &str) -> Option<String> {
        self.options
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.required(key)?.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.number(key).map(|n| n.round() as i64)
    }

    fn graphic(&self) -> Option<CueId> {
        self.required("graphicId").map(CueId::new)
    }

    fn update(&self, update: GraphicUpdate) -> Option<Command> {
        Some(Command::Update {
            graphic: self.graphic()?,
            update,
        })
    }

    /// The command this invocation sends. `None` for unknown actions or
    /// when a required option is missing or unreadable.
    pub fn to_command(&self) -> Option<Command> {
        match self.action_id.as_str() {
            ids::RUN => Some(Command::Run),
            ids::CLEAR => Some(Command::Clear),
            ids::SHOW_HIDE | ids::SHOW_HIDE_BY_TEXT => {
                let change = StatusChange::parse(&self.required("status")?)?;
                self.update(GraphicUpdate::Status(change))
            }
            ids::LOWER_THIRD => self.update(GraphicUpdate::LowerThird {
                line_one: self.text("line_one"),
                line_two: self.text("line_two"),
            }),
            ids::LOWER_THIRD_ANIMATED => self.update(GraphicUpdate::LowerThirdAnimated {
                animation: self.required("animationName")?,
                line_one: self.text("line_one"),
                line_two: self.text("line_two"),
            }),
            ids::MESSAGE => self.update(GraphicUpdate::Message(self.text("body"))),
            ids::TIME => self.update(GraphicUpdate::Time {
                mode: TimerMode::from_timer_type(&self.required("type")?)?,
                time: self.text("time"),
            }),
            ids::BIG_TIMER => {
                let mode = TimerMode::from_timer_type(&self.required("type")?)?;
                if !matches!(mode, TimerMode::Countdown | TimerMode::Countup) {
                    return None;
                }
                self.update(GraphicUpdate::BigTimer {
                    shape: self.required("shape")?,
                    mode,
                    time: self.text("time"),
                })
            }
            ids::IMAGE => self.update(GraphicUpdate::Image {
                name: self.text("imageName"),
                filename: self.required("imageFilename")?,
            }),
            ids::TICKER => self.update(GraphicUpdate::Ticker {
                title: self.text("title"),
                items: self.text("items"),
            }),
            ids::WEBPAGE => self.update(GraphicUpdate::Webpage {
                name: self.text("name"),
                url: self.text("url"),
            }),
            ids::LARGE_TEXT => self.update(GraphicUpdate::LargeText(self.text("text"))),
            ids::TIMER_RUN => Some(Command::TimerRun(self.graphic()?)),
            ids::TIMER_RESET => Some(Command::TimerReset(self.graphic()?)),
            ids::TIMER_PAUSE => Some(Command::TimerPause(self.graphic()?)),
            ids::TIMER_JUMP => Some(Command::TimerJump {
                graphic: self.graphic()?,
                seconds: self.integer("amount")?,
            }),
            ids::TIMER_DURATION => Some(Command::TimerDuration {
                graphic: self.graphic()?,
                seconds: parse_duration(&self.required("time")?)? / 1000,
            }),
            ids::SPEAKER_MESSAGE => self.update(GraphicUpdate::SpeakerMessage(self.text("body"))),
            ids::SPEAKER_MESSAGE_VISIBLE => {
                let show = self.required("status")?.parse::<bool>().ok()?;
                self.update(GraphicUpdate::ShowSpeakerMessage(show))
            }
            ids::SCORE => Some(Command::Score {
                graphic: self.graphic()?,
                team: self.required("team")?.parse().ok()?,
                level: self.required("level")?.parse().ok()?,
                change: ScoreChange::parse(&self.required("type")?)?,
                amount: self.integer("amount")?,
            }),
            ids::POSITION => self.update(GraphicUpdate::Position(self.required("position")?)),
            ids::OFFSET_X => self.update(GraphicUpdate::Offset {
                x: Some(self.number("x")?),
                y: None,
            }),
            ids::OFFSET_Y => self.update(GraphicUpdate::Offset {
                x: None,
                y: Some(self.number("y")?),
            }),
            ids::OFFSET_XY => self.update(GraphicUpdate::Offset {
                x: Some(self.number("x")?),
                y: Some(self.number("y")?),
            }),
            ids::SCALE => self.update(GraphicUpdate::Scale(self.number("scale")?)),
            ids::THEME => self.update(GraphicUpdate::Theme(self.required("theme")?)),
            ids::TEXT_VARIABLE => Some(Command::VariableText {
                variable: self.required("variable")?,
                text: self.text("text"),
            }),
            ids::LIST_ADD_ROW => Some(Command::VariableListAddRow {
                list: u32::try_from(self.integer("listId")?).ok()?,
                columns: [self.text("colOne"), self.text("colTwo"), self.text("colThree")],
            }),
            ids::LIST_SELECT_ROW => {
                let row = match self.required("nextPreviousNumber")?.as_str() {
                    "next" => RowSelection::Next,
                    "previous" => RowSelection::Previous,
                    "number" => RowSelection::Number(u32::try_from(self.integer("number")?).ok()?),
                    _ => return None,
                };
                Some(Command::VariableListSelectRow {
                    list: u32::try_from(self.integer("listId")?).ok()?,
                    row,
                })
            }
            ids::TRANSITION => self.update(GraphicUpdate::Transition(self.required("override")?)),
            ids::CUSTOM => Some(Command::Custom(self.required("uri")?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::project::{Media, Theme};
    use serde_json::json;

    fn project() -> Project {
        let mut project = Project {
            cues: vec![
                Cue::new("lt1", "lower_third").with_field("line_one", "Ada"),
                Cue::new("sp1", "utility_speaker_timer"),
                Cue::new("msg", "message"),
            ],
            ..Project::default()
        };
        project.media.push(Media {
            filename: "f1.png".to_string(),
            originalname: "logo.png".to_string(),
        });
        project.themes.insert("th1".to_string(), Theme { name: "Dark".to_string() });
        project
    }

    fn dropdown<'a>(defs: &'a [ActionDefinition], action: &str, option: &str) -> &'a [Choice] {
        let def = defs.iter().find(|d| d.action_id == action).unwrap();
        match def.options.iter().find(|o| o.id() == option).unwrap() {
            InputField::Dropdown { choices, .. } => choices,
            other => panic!("{option} is not a dropdown: {other:?}"),
        }
    }

    #[test]
    fn action_ids_are_unique() {
        let defs = definitions(&project());
        let mut seen: Vec<_> = defs.iter().map(|d| d.action_id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), defs.len());
    }

    #[test]
    fn graphic_dropdowns_filter_by_kind() {
        let defs = definitions(&project());
        let choice_ids =
            |choices: &[Choice]| choices.iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        assert_eq!(choice_ids(dropdown(&defs, ids::LOWER_THIRD, "graphicId")), ["lt1"]);
        assert_eq!(choice_ids(dropdown(&defs, ids::TIMER_RUN, "graphicId")), ["sp1"]);
        assert_eq!(dropdown(&defs, ids::SHOW_HIDE, "graphicId").len(), 3);
        assert_eq!(dropdown(&defs, ids::IMAGE, "imageFilename")[0].label, "logo.png");
        assert_eq!(dropdown(&defs, ids::THEME, "theme")[0], Choice::new("th1", "Dark"));
    }

    #[test]
    fn show_hide_translates_to_status_update() {
        let invocation =
            ActionInvocation::new(ids::SHOW_HIDE, &[("graphicId", "lt1"), ("status", "going")]);
        let command = invocation.to_command().unwrap();
        assert_eq!(command.path(), "graphic/lt1/update");
        assert_eq!(command.body(), json!({ "status": "going" }));
    }

    #[test]
    fn missing_or_bad_options_yield_nothing() {
        assert!(ActionInvocation::new(ids::SHOW_HIDE, &[("status", "going")])
            .to_command()
            .is_none());
        assert!(ActionInvocation::new(ids::SHOW_HIDE, &[("graphicId", "x"), ("status", "up")])
            .to_command()
            .is_none());
        assert!(ActionInvocation::new(ids::TIMER_JUMP, &[("graphicId", "x"), ("amount", "lots")])
            .to_command()
            .is_none());
        assert!(ActionInvocation::new("teleport", &[]).to_command().is_none());
    }

    #[test]
    fn timer_actions_build_timer_paths() {
        let jump =
            ActionInvocation::new(ids::TIMER_JUMP, &[("graphicId", "sp1"), ("amount", "-15")]);
        assert_eq!(jump.to_command().unwrap().path(), "graphic/sp1/timer/jump/-15");

        let duration = ActionInvocation::new(
            ids::TIMER_DURATION,
            &[("graphicId", "sp1"), ("time", "00:02:30")],
        );
        assert_eq!(duration.to_command().unwrap().path(), "graphic/sp1/timer/duration/150");
    }

    #[test]
    fn variable_list_selection() {
        let next = ActionInvocation::new(
            ids::LIST_SELECT_ROW,
            &[("listId", "2"), ("nextPreviousNumber", "next")],
        );
        assert_eq!(next.to_command().unwrap().path(), "updateVariableList/2/selectRow/next");

        let numbered = ActionInvocation::new(
            ids::LIST_SELECT_ROW,
            &[("listId", "2"), ("nextPreviousNumber", "number"), ("number", "5")],
        );
        assert_eq!(numbered.to_command().unwrap().path(), "updateVariableList/2/selectRow/5");
    }

    #[test]
    fn speaker_message_visibility_parses_bool() {
        let show = ActionInvocation::new(
            ids::SPEAKER_MESSAGE_VISIBLE,
            &[("graphicId", "sp1"), ("status", "true")],
        );
        assert_eq!(show.to_command().unwrap().body(), json!({ "showSpeakerMessage": true }));
    }

    #[test]
    fn parses_command_line_words() {
        let words = "showHide graphicId=abc status=toggle".split_whitespace();
        let invocation = ActionInvocation::from_args(words).unwrap();
        assert_eq!(
            invocation,
            ActionInvocation::new(ids::SHOW_HIDE, &[("graphicId", "abc"), ("status", "toggle")])
        );
        assert_eq!(invocation.to_command().unwrap().path(), "graphic/abc/update");

        let with_equals = ActionInvocation::from_args(["sendCustomHTTP", "uri=run?x=1"]).unwrap();
        assert_eq!(with_equals.options["uri"], "run?x=1");

        assert!(ActionInvocation::from_args(Vec::<String>::new()).is_err());
        assert!(ActionInvocation::from_args(["showHide", "graphicId"]).is_err());
    }
}
