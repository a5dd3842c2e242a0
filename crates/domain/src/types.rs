//! Domain types shared by the four application integrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A date extracted from bridge output.
///
/// The bridge serializes dates as text; when that text cannot be interpreted
/// the original string is kept instead of being discarded, and ordering logic
/// falls back to a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    /// Successfully interpreted absolute timestamp.
    Timestamp(DateTime<Utc>),
    /// Original text that did not parse as a date.
    Raw(String),
}

impl DateField {
    /// The parsed timestamp, if this field holds one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Raw(_) => None,
        }
    }

    /// Epoch seconds for ordering; `None` when the text never parsed.
    pub fn epoch(&self) -> Option<i64> {
        self.timestamp().map(|ts| ts.timestamp())
    }
}

/// Email message captured from the Mail integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub sender: String,
    /// Absolute send time; `None` when the bridge value was unparsable.
    pub date_sent: Option<DateTime<Utc>>,
    pub content: String,
    pub is_read: bool,
    pub mailbox: String,
}

/// Note captured from the Notes integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub content: String,
    pub folder_name: Option<String>,
    pub id: Option<String>,
    pub creation_date: Option<DateField>,
    pub modification_date: Option<DateField>,
}

/// Calendar event captured from the Calendar integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Bridge-assigned identifier; empty when the bridge omitted it.
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub start_date: Option<DateField>,
    pub end_date: Option<DateField>,
    pub calendar_name: String,
    pub is_all_day: bool,
    pub url: Option<String>,
}

/// Reminder captured from the Reminders integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub name: String,
    pub id: String,
    pub body: String,
    pub completed: bool,
    pub due_date: Option<DateField>,
    pub list_name: String,
    pub completion_date: Option<DateField>,
    pub creation_date: Option<DateField>,
    pub modification_date: Option<DateField>,
    pub remind_me_date: Option<DateField>,
    /// Numeric priority as reported by the bridge; absent is not zero.
    pub priority: Option<f64>,
}
