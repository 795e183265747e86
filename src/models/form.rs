//! HubSpot form record
//!
//! Only the fields the proxy orders and filters on are typed. Everything else
//! the upstream API sends is kept in `extra` and serialized back untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == Form ==
/// A marketing form as listed by the upstream forms API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Stable opaque identifier
    pub id: String,
    /// Display label, not guaranteed unique
    pub name: String,
    /// Creation time as sent upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAt>,
    /// Archived flag, absent on older payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<Archived>,
    /// Pass-through fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Form {
    /// Creates a form with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            archived: None,
            extra: Map::new(),
        }
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<CreatedAt>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Sets the archived flag.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(Archived::Flag(archived));
        self
    }

    /// Creation time in Unix milliseconds.
    ///
    /// `None` when the field is missing or cannot be interpreted as a time.
    pub fn created_millis(&self) -> Option<i64> {
        self.created_at.as_ref().and_then(CreatedAt::timestamp_millis)
    }

    /// True when the form is flagged archived.
    ///
    /// A missing or non-boolean flag counts as live.
    pub fn is_archived(&self) -> bool {
        matches!(self.archived, Some(Archived::Flag(true)))
    }
}

// == Created At ==
/// Creation timestamp in whichever encoding the upstream used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    /// Unix epoch milliseconds
    Millis(i64),
    /// ISO-8601 text (or a numeric string)
    Text(String),
    /// Anything else; kept so one odd record does not fail its page
    Other(Value),
}

impl CreatedAt {
    /// Interprets the value as Unix milliseconds.
    ///
    /// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC),
    /// bare `YYYY-MM-DD` dates, and numeric strings holding epoch millis.
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            CreatedAt::Millis(ms) => Some(*ms),
            CreatedAt::Text(text) => parse_text_timestamp(text.trim()),
            CreatedAt::Other(value) => value.as_f64().map(|ms| ms as i64),
        }
    }
}

// == Archived ==
/// Archived flag as sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Archived {
    Flag(bool),
    /// Non-boolean value, passed through and treated as not archived
    Other(Value),
}

impl From<i64> for CreatedAt {
    fn from(ms: i64) -> Self {
        CreatedAt::Millis(ms)
    }
}

impl From<&str> for CreatedAt {
    fn from(text: &str) -> Self {
        CreatedAt::Text(text.to_string())
    }
}

impl From<String> for CreatedAt {
    fn from(text: String) -> Self {
        CreatedAt::Text(text)
    }
}

fn parse_text_timestamp(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().timestamp_millis());
    }
    text.parse::<i64>().ok()
}
