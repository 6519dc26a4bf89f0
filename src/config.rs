//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;

use crate::constants::{display, server};
use crate::error::{Error, Result};
use crate::types::ProjectId;

/// Which cue variable lower-third presets show as button text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelSource {
    /// `graphic_<id>_contents`
    #[default]
    Contents,
    /// `graphic_<id>_label`
    Label,
}

impl LabelSource {
    /// Variable suffix for this source.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Contents => "contents",
            Self::Label => "label",
        }
    }
}

/// Configuration for the bridge.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Graphics server host name or address
    pub host: String,
    /// Graphics server port
    pub port: u16,
    /// Project whose cues are mirrored and commanded
    pub project_id: ProjectId,
    /// Instance label used when presets reference variables, `$(label:var)`
    pub instance_label: String,
    /// Display pattern for time-of-day values
    pub time_format: String,
    /// Preset button text size
    pub preset_text_size: String,
    /// Button text source for lower-third presets
    pub lower_third_label_source: LabelSource,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            host: String::new(),
            port: server::DEFAULT_PORT,
            project_id: ProjectId::new(""),
            instance_label: "h2r-graphics".to_string(),
            time_format: display::DEFAULT_TIME_FORMAT.to_string(),
            preset_text_size: display::DEFAULT_PRESET_TEXT_SIZE.to_string(),
            lower_third_label_source: LabelSource::Contents,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("H2R_HOST") {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("H2R_PORT") {
            config.port = port.trim().parse::<u16>().map_err(|_| {
                Error::config(
                    format!("Invalid H2R_PORT value '{port}'"),
                    "Use a port number between 1 and 65535",
                )
            })?;
        }

        if let Some(project) = lookup("H2R_PROJECT_ID") {
            config.project_id = ProjectId::new(project.trim());
        }

        if let Some(label) = lookup("H2R_INSTANCE_LABEL").filter(|l| !l.trim().is_empty()) {
            config.instance_label = label.trim().to_string();
        }

        if let Some(format) = lookup("H2R_TIME_FORMAT").filter(|f| !f.is_empty()) {
            config.time_format = format;
        }

        if let Some(size) = lookup("H2R_PRESET_TEXT_SIZE").filter(|s| !s.trim().is_empty()) {
            config.preset_text_size = size.trim().to_string();
        }

        if let Some(source) = lookup("H2R_LOWER_THIRD_LABEL_SOURCE") {
            config.lower_third_label_source = match source.trim() {
                "label" => LabelSource::Label,
                "contents" | "" => LabelSource::Contents,
                other => {
                    return Err(Error::config(
                        format!("Unknown lower third label source '{other}'"),
                        "Use 'contents' or 'label'",
                    ))
                }
            };
        }

        Ok(config)
    }

    /// Check if a graphics server host is configured
    pub fn has_server(&self) -> bool {
        !self.host.is_empty()
    }

    /// Fail with guidance when the server or project is not configured.
    pub fn require_server(&self) -> Result<()> {
        if !self.has_server() {
            return Err(Error::config(
                "No H2R Graphics host configured",
                "Set H2R_HOST (and optionally H2R_PORT)",
            ));
        }
        if self.project_id.as_str().is_empty() {
            return Err(Error::config(
                "No H2R Graphics project configured",
                "Set H2R_PROJECT_ID to the project id shown in H2R Graphics",
            ));
        }
        Ok(())
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// `http://{host}:{port}/api/{projectId}/{path}`
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url(),
            self.project_id,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(!config.has_server());
        assert_eq!(config.port, 4001);
        assert_eq!(config.time_format, "HH:mm:ss");
        assert!(config.require_server().is_err());
    }

    #[test]
    fn builds_api_urls() {
        let config = Config::from_lookup(lookup(&[
            ("H2R_HOST", "10.0.0.5"),
            ("H2R_PORT", "4100"),
            ("H2R_PROJECT_ID", "abc123"),
        ]))
        .unwrap();

        assert!(config.require_server().is_ok());
        assert_eq!(
            config.api_url("graphic/x1/update"),
            "http://10.0.0.5:4100/api/abc123/graphic/x1/update"
        );
    }

    #[test]
    fn rejects_bad_port_and_label_source() {
        assert!(Config::from_lookup(lookup(&[("H2R_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("H2R_LOWER_THIRD_LABEL_SOURCE", "both")])).is_err());

        let config =
            Config::from_lookup(lookup(&[("H2R_LOWER_THIRD_LABEL_SOURCE", "label")])).unwrap();
        assert_eq!(config.lower_third_label_source, LabelSource::Label);
    }
}
