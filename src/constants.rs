//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Timer scheduling constants.
pub mod timers {
    /// Period of the recurring refresh for a running timer cue, in milliseconds.
    pub const TICK_PERIOD_MS: i64 = 1000;
}

/// Time display constants.
pub mod display {
    /// Default pattern used to render absolute (time-of-day) values.
    pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";

    /// Placeholder rendered for an unset `[token]` when brackets are kept.
    pub const NOT_SET: &str = "Not set";

    /// Default preset button text size.
    pub const DEFAULT_PRESET_TEXT_SIZE: &str = "18";
}

/// Graphics server connection constants.
pub mod server {
    /// Default HTTP/socket port of the H2R Graphics v2 server.
    pub const DEFAULT_PORT: u16 = 4001;

    /// Timeout for outbound HTTP commands, in seconds.
    pub const HTTP_TIMEOUT_SECS: u64 = 10;

    /// Delay before the snapshot socket reconnects, in seconds.
    pub const RECONNECT_DELAY_SECS: u64 = 5;

    /// Socket.IO event carrying the full project snapshot.
    pub const FRONTEND_UPDATE_EVENT: &str = "updateFrontend";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for transport to engine communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

/// Feedback identifiers shared by presets and the feedback evaluator.
pub mod feedbacks {
    /// Boolean feedback reporting a cue's on-air status.
    pub const GRAPHIC_STATUS: &str = "graphic_status";
}
