//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Graphics server answered with a non-success status
    #[error("H2R Graphics server error: {message}")]
    Server {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Payload parsing error
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed (frame, snapshot, option).
        context: &'static str,
        /// Description of the parse failure.
        message: String,
    },

    /// Snapshot socket error
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a server error with HTTP status
    pub fn server_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            404 => Some("Check H2R_PROJECT_ID and the graphic id used by the command"),
            500..=599 => Some("H2R Graphics server error - check the server log"),
            _ => None,
        };
        Self::Server {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with context
    pub fn parse(message: impl Into<String>, context: &'static str) -> Self {
        Self::Parse { context, message: message.into() }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(e.to_string(), "json")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn server_status_provides_hints() {
        let err = Error::server_status("Not found", 404);
        match err {
            Error::Server { hint: Some(h), .. } => {
                assert!(h.contains("H2R_PROJECT_ID"));
            }
            _ => panic!("Expected Server error with hint"),
        }
    }

    #[test]
    fn config_error_displays_hint() {
        let err = Error::config("No host", "Set H2R_HOST");
        assert_eq!(err.to_string(), "Configuration error: No host. Set H2R_HOST");
    }
}
