//! Commands accepted by the graphics server HTTP API.
//!
//! Each command is a path under `/api/<project id>/` plus a JSON body. Most
//! edits to a single graphic go through `graphic/<id>/update` with a partial
//! cue object as the body.

use serde_json::{json, Map, Value};
use std::fmt;

use crate::cue::TimerMode;
use crate::timefmt::parse_duration;
use crate::types::CueId;

/// Requested on-air transition for one graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Take on air (`coming`).
    Show,
    /// Take off air (`going`).
    Hide,
    /// Show if hidden, hide if shown.
    Toggle,
    /// Cue to go on with the next run.
    CueOn,
    /// Cue to go off with the next run.
    CueOff,
}

impl StatusChange {
    /// Every change, in dropdown order.
    pub const ALL: [Self; 5] = [Self::Show, Self::Hide, Self::Toggle, Self::CueOn, Self::CueOff];

    /// Wire value of the `status` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "coming",
            Self::Hide => "going",
            Self::Toggle => "toggle",
            Self::CueOn => "cued",
            Self::CueOff => "cuedoff",
        }
    }

    /// Operator-facing name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Show => "Show",
            Self::Hide => "Hide",
            Self::Toggle => "Toggle",
            Self::CueOn => "Cue on",
            Self::CueOff => "Cue off",
        }
    }

    /// Parse a wire value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|change| change.as_str() == value)
    }
}

/// How a score update changes the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// Replace.
    Set,
    /// Add.
    Up,
    /// Subtract.
    Down,
}

impl ScoreChange {
    /// Path segment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parse a path segment.
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Set, Self::Up, Self::Down]
            .into_iter()
            .find(|change| change.as_str() == value)
    }
}

/// Which row of a variable list to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    /// The row after the current one.
    Next,
    /// The row before the current one.
    Previous,
    /// A row by 1-based number.
    Number(u32),
}

impl fmt::Display for RowSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Content written to a single graphic.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicUpdate {
    /// On-air transition.
    Status(StatusChange),
    /// Lower third lines.
    LowerThird {
        /// First line.
        line_one: String,
        /// Second line.
        line_two: String,
    },
    /// Animated lower third lines and animation.
    LowerThirdAnimated {
        /// `reveal`, `unfold` or `slide-out`.
        animation: String,
        /// First line.
        line_one: String,
        /// Second line.
        line_two: String,
    },
    /// Message body.
    Message(String),
    /// Legacy time cue mode and time (`HH:MM:SS`).
    Time {
        /// Timer mode.
        mode: TimerMode,
        /// Duration or target time.
        time: String,
    },
    /// Big timer shape, mode and duration.
    BigTimer {
        /// `circle`, `line` or `mask`.
        shape: String,
        /// Count down or up.
        mode: TimerMode,
        /// Duration as `HH:MM:SS`.
        time: String,
    },
    /// Image name and media file.
    Image {
        /// Display name.
        name: String,
        /// Stored media file name.
        filename: String,
    },
    /// Ticker title and `|`-separated items.
    Ticker {
        /// Title.
        title: String,
        /// Items separated by `|`.
        items: String,
    },
    /// Webpage name and address.
    Webpage {
        /// Display name.
        name: String,
        /// Address.
        url: String,
    },
    /// Large-text utility text.
    LargeText(String),
    /// Message shown to the speaker on a speaker timer.
    SpeakerMessage(String),
    /// Show or hide the speaker message.
    ShowSpeakerMessage(bool),
    /// Anchor position (`tl`, `mc`, `br`, ...).
    Position(String),
    /// Offset in percent of the frame; `None` leaves an axis unchanged.
    Offset {
        /// Horizontal offset.
        x: Option<f64>,
        /// Vertical offset.
        y: Option<f64>,
    },
    /// Scale in percent.
    Scale(f64),
    /// Theme id.
    Theme(String),
    /// Transition override.
    Transition(String),
}

impl GraphicUpdate {
    fn body(&self) -> Value {
        match self {
            Self::Status(change) => json!({ "status": change.as_str() }),
            Self::LowerThird { line_one, line_two } => {
                json!({ "line_one": line_one, "line_two": line_two })
            }
            Self::LowerThirdAnimated { animation, line_one, line_two } => json!({
                "animationName": animation,
                "line_one": line_one,
                "line_two": line_two,
            }),
            Self::Message(body) => json!({ "body": body }),
            Self::Time { mode, time } => timer_body(*mode, time),
            Self::BigTimer { shape, mode, time } => {
                let mut body = timer_body(*mode, time);
                if let Value::Object(map) = &mut body {
                    map.insert("shape".to_string(), Value::String(shape.clone()));
                }
                body
            }
            Self::Image { name, filename } => json!({ "name": name, "filename": filename }),
            Self::Ticker { title, items } => {
                let items: Vec<Value> = items
                    .split('|')
                    .enumerate()
                    .map(|(i, item)| json!({ "title": format!("Item {}", i + 1), "body": item }))
                    .collect();
                json!({ "title": title, "items": items })
            }
            Self::Webpage { name, url } => json!({ "name": name, "url": url }),
            Self::LargeText(text) => json!({ "text": text }),
            Self::SpeakerMessage(body) => json!({ "speakerMessage": body }),
            Self::ShowSpeakerMessage(show) => json!({ "showSpeakerMessage": show }),
            Self::Position(position) => json!({ "position": position }),
            Self::Offset { x, y } => {
                let mut map = Map::new();
                if let Some(x) = x {
                    map.insert("offsetX".to_string(), json!(x));
                }
                if let Some(y) = y {
                    map.insert("offsetY".to_string(), json!(y));
                }
                Value::Object(map)
            }
            Self::Scale(scale) => json!({ "scale": scale }),
            Self::Theme(theme) => json!({ "theme": theme }),
            Self::Transition(transition) => json!({ "transition": transition }),
        }
    }
}

/// Body for a timer content update. Unparseable times count as zero.
fn timer_body(mode: TimerMode, time: &str) -> Value {
    let ms = parse_duration(time).unwrap_or(0);
    match mode {
        TimerMode::TimeOfDay | TimerMode::PerCue => json!({ "timerType": mode.timer_type() }),
        TimerMode::ToTimeOfDay => json!({
            "timerType": mode.timer_type(),
            "endTime": time,
            "timeLeft": ms,
        }),
        TimerMode::Countdown => json!({
            "timerType": mode.timer_type(),
            "duration": time,
            "durationMS": ms,
            "timeLeft": ms,
        }),
        TimerMode::Countup => json!({
            "timerType": mode.timer_type(),
            "duration": time,
            "durationMS": ms,
            "timeLeft": 0,
        }),
    }
}

/// One request to the graphics server.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run every cued graphic.
    Run,
    /// Take every graphic off air.
    Clear,
    /// Edit one graphic.
    Update {
        /// Target graphic.
        graphic: CueId,
        /// What to change.
        update: GraphicUpdate,
    },
    /// Start or resume a timer.
    TimerRun(CueId),
    /// Pause a timer.
    TimerPause(CueId),
    /// Reset a timer.
    TimerReset(CueId),
    /// Add (or with a negative value remove) seconds.
    TimerJump {
        /// Target timer.
        graphic: CueId,
        /// Seconds to add.
        seconds: i64,
    },
    /// Set a timer's duration in seconds.
    TimerDuration {
        /// Target timer.
        graphic: CueId,
        /// New duration.
        seconds: i64,
    },
    /// Change a score graphic.
    Score {
        /// Target score graphic.
        graphic: CueId,
        /// Team number.
        team: u8,
        /// Level number.
        level: u8,
        /// Set, up or down.
        change: ScoreChange,
        /// Amount.
        amount: i64,
    },
    /// Set a dynamic text value (`text.1` .. `text.6`).
    VariableText {
        /// Dynamic text key.
        variable: String,
        /// New value.
        text: String,
    },
    /// Append a row to a variable list.
    VariableListAddRow {
        /// List number.
        list: u32,
        /// Three column values.
        columns: [String; 3],
    },
    /// Select a row of a variable list.
    VariableListSelectRow {
        /// List number.
        list: u32,
        /// Row to select.
        row: RowSelection,
    },
    /// Arbitrary path with an empty body.
    Custom(String),
}

impl Command {
    /// Shorthand for a graphic update.
    pub fn update(graphic: impl Into<CueId>, update: GraphicUpdate) -> Self {
        Self::Update {
            graphic: graphic.into(),
            update,
        }
    }

    /// Path relative to `/api/<project id>/`.
    pub fn path(&self) -> String {
        match self {
            Self::Run => "run".to_string(),
            Self::Clear => "clear".to_string(),
            Self::Update { graphic, .. } => format!("graphic/{graphic}/update"),
            Self::TimerRun(graphic) => format!("graphic/{graphic}/timer/run"),
            Self::TimerPause(graphic) => format!("graphic/{graphic}/timer/pause"),
            Self::TimerReset(graphic) => format!("graphic/{graphic}/timer/reset"),
            Self::TimerJump { graphic, seconds } => {
                format!("graphic/{graphic}/timer/jump/{seconds}")
            }
            Self::TimerDuration { graphic, seconds } => {
                format!("graphic/{graphic}/timer/duration/{seconds}")
            }
            Self::Score { graphic, team, level, change, amount } => format!(
                "graphic/{graphic}/updateScore/{team}/{level}/{}/{amount}",
                change.as_str()
            ),
            Self::VariableText { variable, .. } => format!("updateVariableText/{variable}"),
            Self::VariableListAddRow { list, .. } => format!("updateVariableList/{list}/addRow"),
            Self::VariableListSelectRow { list, row } => {
                format!("updateVariableList/{list}/selectRow/{row}")
            }
            Self::Custom(path) => path.trim_start_matches('/').to_string(),
        }
    }

    /// JSON body; an empty object when the command carries no data.
    pub fn body(&self) -> Value {
        match self {
            Self::Update { update, .. } => update.body(),
            Self::VariableText { text, .. } => json!({ "text": text }),
            Self::VariableListAddRow { columns, .. } => json!({
                "row": columns.iter().map(|value| json!({ "value": value })).collect::<Vec<_>>(),
            }),
            _ => Value::Object(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn status_changes_use_server_names() {
        let command = Command::update("g1", GraphicUpdate::Status(StatusChange::Toggle));
        assert_eq!(command.path(), "graphic/g1/update");
        assert_eq!(command.body(), json!({ "status": "toggle" }));
        assert_eq!(StatusChange::parse("coming"), Some(StatusChange::Show));
        assert_eq!(StatusChange::parse("onair"), None);
    }

    #[test]
    fn timer_paths() {
        let id = CueId::new("t");
        assert_eq!(Command::TimerRun(id.clone()).path(), "graphic/t/timer/run");
        let jump = Command::TimerJump { graphic: id.clone(), seconds: -30 };
        assert_eq!(jump.path(), "graphic/t/timer/jump/-30");
        let duration = Command::TimerDuration { graphic: id, seconds: 90 };
        assert_eq!(duration.path(), "graphic/t/timer/duration/90");
        assert_eq!(Command::Run.body(), json!({}));
    }

    #[test]
    fn countdown_body_carries_duration_in_ms() {
        let command = Command::update(
            "t",
            GraphicUpdate::BigTimer {
                shape: "circle".to_string(),
                mode: TimerMode::Countdown,
                time: "00:01:30".to_string(),
            },
        );
        assert_eq!(
            command.body(),
            json!({
                "shape": "circle",
                "timerType": "countdown",
                "duration": "00:01:30",
                "durationMS": 90_000,
                "timeLeft": 90_000,
            })
        );
    }

    #[test]
    fn ticker_items_split_on_pipe() {
        let command = Command::update(
            "tk",
            GraphicUpdate::Ticker {
                title: "News".to_string(),
                items: "one|two".to_string(),
            },
        );
        assert_eq!(
            command.body(),
            json!({
                "title": "News",
                "items": [
                    { "title": "Item 1", "body": "one" },
                    { "title": "Item 2", "body": "two" },
                ],
            })
        );
    }

    #[test]
    fn offset_only_sends_given_axes() {
        let command = Command::update("g", GraphicUpdate::Offset { x: Some(12.5), y: None });
        assert_eq!(command.body(), json!({ "offsetX": 12.5 }));
    }

    #[test]
    fn score_and_variable_list_paths() {
        let score = Command::Score {
            graphic: CueId::new("s"),
            team: 2,
            level: 1,
            change: ScoreChange::Up,
            amount: 3,
        };
        assert_eq!(score.path(), "graphic/s/updateScore/2/1/up/3");

        let select = Command::VariableListSelectRow { list: 4, row: RowSelection::Number(7) };
        assert_eq!(select.path(), "updateVariableList/4/selectRow/7");

        let add = Command::VariableListAddRow {
            list: 1,
            columns: ["a".to_string(), "b".to_string(), String::new()],
        };
        assert_eq!(
            add.body(),
            json!({ "row": [{ "value": "a" }, { "value": "b" }, { "value": "" }] })
        );
    }

    #[test]
    fn custom_path_is_relative() {
        assert_eq!(Command::Custom("/graphic/x/update".to_string()).path(), "graphic/x/update");
    }
}
