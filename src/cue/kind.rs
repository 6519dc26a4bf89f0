//! Cue kinds and their presentation.
//!
//! Every tag the server sends maps to exactly one [`CueKind`]; tags this
//! crate does not know map to [`CueKind::Unknown`], which still produces a
//! generic label and contents.

use crate::color::{palette, Rgb};

/// How a timer-bearing cue derives its displayed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Remaining time until `endAt`.
    Countdown,
    /// Elapsed time since `startedAt`.
    Countup,
    /// Signed time until a target wall-clock time.
    ToTimeOfDay,
    /// The current wall-clock time.
    TimeOfDay,
    /// Mode chosen per cue by its `timerType` field.
    PerCue,
}

impl TimerMode {
    /// Parse a `timerType` value (`countdown`, `count_up`, `timeOfDay`, ...).
    pub fn from_timer_type(timer_type: &str) -> Option<Self> {
        let normalized: String = timer_type
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "countdown" => Some(Self::Countdown),
            "countup" => Some(Self::Countup),
            "totimeofday" | "totod" => Some(Self::ToTimeOfDay),
            "timeofday" | "tod" => Some(Self::TimeOfDay),
            _ => None,
        }
    }

    /// Wire value sent as `timerType`.
    pub const fn timer_type(self) -> &'static str {
        match self {
            Self::Countdown => "countdown",
            Self::Countup => "countup",
            Self::ToTimeOfDay => "toTimeOfDay",
            Self::TimeOfDay | Self::PerCue => "timeOfDay",
        }
    }
}

/// Presentation bundle for one cue kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueTypeDescriptor {
    /// The kind described.
    pub kind: CueKind,
    /// Icon reference shown on preset buttons.
    pub icon: &'static str,
    /// Preset button background.
    pub bg_color: Rgb,
    /// Type name used inside labels, e.g. `Lower third`.
    pub type_name: &'static str,
}

/// Known cue types, plus the explicit fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// `lower_third`
    LowerThird,
    /// `lower_third_animated`
    LowerThirdAnimated,
    /// `message`
    Message,
    /// `icon_with_message`
    IconWithMessage,
    /// `image_with_message`
    ImageWithMessage,
    /// `time`, legacy timer whose mode comes from `timerType`
    Time,
    /// `time_countdown`
    TimeCountdown,
    /// `time_countup`
    TimeCountup,
    /// `time_tod`
    TimeTod,
    /// `time_to_tod`
    TimeToTod,
    /// `big_time`, legacy big timer whose mode comes from `timerType`
    BigTime,
    /// `big_time_countdown`
    BigTimeCountdown,
    /// `big_time_countup`
    BigTimeCountup,
    /// `big_time_to_tod`
    BigTimeToTod,
    /// `image`
    Image,
    /// `ticker`
    Ticker,
    /// `social`, a chat or social post
    Social,
    /// `webpage`
    Webpage,
    /// `score`
    Score,
    /// `credits`
    Credits,
    /// `video`
    Video,
    /// `celebration`
    Celebration,
    /// `animated_background`
    AnimatedBackground,
    /// `now_next_then`
    NowNextThen,
    /// `checklist`
    Checklist,
    /// `qr`
    Qr,
    /// `map`
    Map,
    /// `audio`
    Audio,
    /// `utility_large_text`
    UtilityLargeText,
    /// `utility_time_of_day`
    UtilityTimeOfDay,
    /// `utility_pattern`
    UtilityPattern,
    /// `utility_speaker_timer`
    UtilitySpeakerTimer,
    /// Any tag not listed above.
    Unknown,
}

impl CueKind {
    /// Every known kind (the fallback excluded).
    pub const ALL: [Self; 32] = [
        Self::LowerThird,
        Self::LowerThirdAnimated,
        Self::Message,
        Self::IconWithMessage,
        Self::ImageWithMessage,
        Self::Time,
        Self::TimeCountdown,
        Self::TimeCountup,
        Self::TimeTod,
        Self::TimeToTod,
        Self::BigTime,
        Self::BigTimeCountdown,
        Self::BigTimeCountup,
        Self::BigTimeToTod,
        Self::Image,
        Self::Ticker,
        Self::Social,
        Self::Webpage,
        Self::Score,
        Self::Credits,
        Self::Video,
        Self::Celebration,
        Self::AnimatedBackground,
        Self::NowNextThen,
        Self::Checklist,
        Self::Qr,
        Self::Map,
        Self::Audio,
        Self::UtilityLargeText,
        Self::UtilityTimeOfDay,
        Self::UtilityPattern,
        Self::UtilitySpeakerTimer,
    ];

    /// Wire tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::LowerThird => "lower_third",
            Self::LowerThirdAnimated => "lower_third_animated",
            Self::Message => "message",
            Self::IconWithMessage => "icon_with_message",
            Self::ImageWithMessage => "image_with_message",
            Self::Time => "time",
            Self::TimeCountdown => "time_countdown",
            Self::TimeCountup => "time_countup",
            Self::TimeTod => "time_tod",
            Self::TimeToTod => "time_to_tod",
            Self::BigTime => "big_time",
            Self::BigTimeCountdown => "big_time_countdown",
            Self::BigTimeCountup => "big_time_countup",
            Self::BigTimeToTod => "big_time_to_tod",
            Self::Image => "image",
            Self::Ticker => "ticker",
            Self::Social => "social",
            Self::Webpage => "webpage",
            Self::Score => "score",
            Self::Credits => "credits",
            Self::Video => "video",
            Self::Celebration => "celebration",
            Self::AnimatedBackground => "animated_background",
            Self::NowNextThen => "now_next_then",
            Self::Checklist => "checklist",
            Self::Qr => "qr",
            Self::Map => "map",
            Self::Audio => "audio",
            Self::UtilityLargeText => "utility_large_text",
            Self::UtilityTimeOfDay => "utility_time_of_day",
            Self::UtilityPattern => "utility_pattern",
            Self::UtilitySpeakerTimer => "utility_speaker_timer",
            Self::Unknown => "default",
        }
    }

    /// Look up a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
            .unwrap_or(Self::Unknown)
    }

    /// How this kind derives its time, if it has one.
    pub const fn timer_mode(self) -> Option<TimerMode> {
        match self {
            Self::TimeCountdown | Self::BigTimeCountdown | Self::UtilitySpeakerTimer => {
                Some(TimerMode::Countdown)
            }
            Self::TimeCountup | Self::BigTimeCountup => Some(TimerMode::Countup),
            Self::TimeToTod | Self::BigTimeToTod => Some(TimerMode::ToTimeOfDay),
            Self::TimeTod | Self::UtilityTimeOfDay => Some(TimerMode::TimeOfDay),
            Self::Time | Self::BigTime => Some(TimerMode::PerCue),
            _ => None,
        }
    }

    /// Kinds whose variables are refreshed by the timer scheduler.
    pub const fn is_timer(self) -> bool {
        self.timer_mode().is_some()
    }

    /// Kinds that accept run/pause/reset/jump commands.
    pub const fn is_runnable(self) -> bool {
        matches!(
            self,
            Self::UtilitySpeakerTimer
                | Self::TimeCountdown
                | Self::TimeCountup
                | Self::BigTimeCountdown
                | Self::BigTimeCountup
        )
    }

    /// Icon, colour and type name.
    pub const fn descriptor(self) -> CueTypeDescriptor {
        let (icon, bg_color, type_name) = match self {
            Self::LowerThird => ("lower-third", palette::ORANGE, "Lower third"),
            Self::LowerThirdAnimated => ("lower-third-animated", palette::YELLOW, "LT Animated"),
            Self::Message => ("message", palette::ORANGE_2, "Message"),
            Self::IconWithMessage => ("icon-with-message", palette::ORANGE_2, "Message"),
            Self::ImageWithMessage => ("image-with-message", palette::BROWN, "Image with Message"),
            Self::Time => ("time", palette::SALMON, "Time"),
            Self::TimeCountdown => ("time", palette::SALMON, "Countdown timer"),
            Self::TimeCountup => ("time", palette::SALMON, "Countup timer"),
            Self::TimeTod => ("time", palette::SALMON, "Time of Day"),
            Self::TimeToTod => ("time", palette::SALMON, "To time of Day"),
            Self::BigTime => ("big-timer", palette::SALMON, "Big timer"),
            Self::BigTimeCountdown => ("big-timer", palette::BLACK, "Countdown timer"),
            Self::BigTimeCountup => ("big-timer", palette::BLACK, "Count up timer"),
            Self::BigTimeToTod => ("big-timer", palette::BLACK, "Time to time of day"),
            Self::Image => ("image", palette::BLUE, "Image"),
            Self::Ticker => ("ticker", palette::BLUE_2, "Ticker"),
            Self::Social => ("social", palette::PURPLE, "Social"),
            Self::Webpage => ("webpage", palette::PURPLE_2, "Webpage"),
            Self::Score => ("score", palette::GREEN, "Score"),
            Self::Credits => ("credits", palette::GREEN, "Credits"),
            Self::Video => ("video", palette::PURPLE_3, "Video"),
            Self::Celebration => ("celebration", palette::PURPLE_4, "Celebration"),
            Self::AnimatedBackground => {
                ("animated-background", palette::BLUE_3, "Animated Background")
            }
            Self::NowNextThen => ("now-next-then", palette::GREEN_2, "Now next then"),
            Self::Checklist => ("checklist", palette::PURPLE_5, "Checklist"),
            Self::Qr => ("qr", palette::GREEN_3, "QR code"),
            Self::Map => ("map", palette::BLUE_4, "Map"),
            Self::Audio => ("empty", palette::BLACK, "Audio"),
            Self::UtilityLargeText => ("empty", palette::BLACK, "Large Text"),
            Self::UtilityTimeOfDay => ("empty", palette::BLACK, "Time of day"),
            Self::UtilityPattern => ("empty", palette::BLACK, "Pattern"),
            Self::UtilitySpeakerTimer => ("empty", palette::BLACK, "Speaker timer"),
            Self::Unknown => ("empty", palette::BLACK, "Default"),
        };
        CueTypeDescriptor {
            kind: self,
            icon,
            bg_color,
            type_name,
        }
    }
}
