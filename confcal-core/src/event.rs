//! Event types.
//!
//! `EventInput` is the loose, all-optional shape handed over by whatever
//! discovered the event (a scraper, a JSON file, the config). The generator
//! resolves it against `EventDefaults` into an `EventRecord`, which is what
//! actually gets formatted.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfCalError, ConfCalResult};

/// A fully resolved event, ready to be formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub url: String,
    pub organizer: String,
    /// Comma-separated, e.g. "CONFERENCE,TECHNOLOGY,AI"
    pub categories: String,
}

impl EventRecord {
    /// Build a record with empty optional fields.
    /// Fails when `end` is before `start`.
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: impl Into<String>,
    ) -> ConfCalResult<Self> {
        if end < start {
            return Err(ConfCalError::InvalidRange { start, end });
        }

        Ok(EventRecord {
            title: title.into(),
            start,
            end,
            location: location.into(),
            description: String::new(),
            url: String::new(),
            organizer: String::new(),
            categories: String::new(),
        })
    }
}

/// Event fields as discovered, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    pub title: Option<String>,
    #[serde(alias = "start_date", alias = "date")]
    pub start: Option<String>,
    #[serde(alias = "end_date")]
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub organizer: Option<String>,
    pub categories: Option<String>,
}

impl EventInput {
    /// The featured conference shipped as the default `event` in config.
    pub fn ai_engineer_summit() -> Self {
        EventInput {
            title: Some("AI Engineer Summit 2025".into()),
            start: Some("2025-11-19T09:00:00".into()),
            end: Some("2025-11-22T17:00:00".into()),
            location: Some("New York, New York".into()),
            description: Some(
                "The premier technical AI summit for AI Engineers & AI Leaders who ship. \
                 Invite-only, curated for top AI Engineers.\n\n\
                 Website: https://apply.ai.engineer/\n\
                 Application Deadline: September 15, 2025"
                    .into(),
            ),
            url: Some("https://apply.ai.engineer/".into()),
            organizer: Some("AI Engineer Summit".into()),
            categories: Some("CONFERENCE,TECHNOLOGY,AI".into()),
        }
    }
}

/// Values substituted for fields an `EventInput` leaves out.
///
/// `start` and `end` are used when an input has no usable start. An input
/// with a start but no usable end gets one derived from the start: the next
/// day for a bare date, otherwise `start + duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDefaults {
    pub title: String,
    pub start: String,
    pub end: String,
    /// Length of a timed event whose end is missing, e.g. "1h" or "90m"
    pub duration: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub organizer: String,
    pub categories: String,
}

impl Default for EventDefaults {
    fn default() -> Self {
        EventDefaults {
            title: "Untitled Event".into(),
            start: "2025-11-19T09:00:00".into(),
            end: "2025-11-22T17:00:00".into(),
            duration: "1h".into(),
            location: "Location TBD".into(),
            description: String::new(),
            url: String::new(),
            organizer: String::new(),
            categories: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct EventFile {
    #[serde(default)]
    events: Vec<EventInput>,
}

/// Read event inputs from a `.json` file (an array of objects) or a `.toml`
/// file (an `[[events]]` array of tables).
pub fn load_inputs(path: &Path) -> ConfCalResult<Vec<EventInput>> {
    let content = std::fs::read_to_string(path)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str::<EventFile>(&content)
            .map(|file| file.events)
            .map_err(|e| ConfCalError::Serialization(e.to_string())),
        _ => serde_json::from_str(&content).map_err(|e| ConfCalError::Serialization(e.to_string())),
    }
}
