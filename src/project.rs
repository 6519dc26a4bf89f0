//! Project snapshot model.
//!
//! The graphics server pushes the state of every project in one
//! `updateFrontend` event. Only the configured project is decoded; it
//! replaces the previous snapshot wholesale.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::cue::Cue;
use crate::error::{Error, Result};
use crate::types::{CueId, ProjectId};

/// Dynamic text: `[key]` substitution source, also exposed as variables.
pub type DynamicText = BTreeMap<String, String>;

/// Payload of one `updateFrontend` push.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontendUpdate {
    /// Raw project objects keyed by project id.
    #[serde(default)]
    pub projects: Map<String, Value>,
}

impl FrontendUpdate {
    /// Parse an event payload.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::parse(e.to_string(), "updateFrontend payload"))
    }

    /// Decode one project. `None` when the push does not contain it.
    pub fn project(&self, id: &ProjectId) -> Option<Result<Project>> {
        self.projects.get(id.as_str()).map(|raw| {
            Project::deserialize(raw).map_err(|e| Error::parse(e.to_string(), "project snapshot"))
        })
    }
}

/// Media library entry (images, videos).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Stored file name on the server.
    #[serde(default)]
    pub filename: String,
    /// Name of the file as uploaded.
    #[serde(default)]
    pub originalname: String,
}

/// Graphic theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// State of one project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    /// Cues in running order. Entries that fail to parse are skipped.
    #[serde(default, deserialize_with = "cues_lenient")]
    pub cues: Vec<Cue>,
    /// Media library.
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<Media>,
    /// Themes keyed by theme id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub themes: BTreeMap<String, Theme>,
    /// Dynamic text values.
    #[serde(rename = "dynamicText", default, deserialize_with = "dynamic_text_lenient")]
    pub dynamic_text: DynamicText,
}

impl Project {
    /// Find a cue by id.
    pub fn cue(&self, id: &CueId) -> Option<&Cue> {
        self.cues.iter().find(|cue| &cue.id == id)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn cues_lenient<'de, D>(deserializer: D) -> std::result::Result<Vec<Cue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match Cue::deserialize(&value) {
            Ok(cue) => Some(cue),
            Err(e) => {
                tracing::warn!("Skipping unreadable cue: {}", e);
                None
            }
        })
        .collect())
}

fn dynamic_text_lenient<'de, D>(deserializer: D) -> std::result::Result<DynamicText, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
