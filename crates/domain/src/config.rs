//! Mapper configuration
//!
//! Limits and fallback strings are an explicit structure passed into every
//! mapper rather than hidden constants, so callers and tests can vary them
//! freely.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Fallback strings substituted when a field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFallbacks {
    pub subject: String,
    pub sender: String,
    pub note_name: String,
    pub event_title: String,
    pub reminder_name: String,
    pub calendar_name: String,
    pub list_name: String,
}

impl Default for FieldFallbacks {
    fn default() -> Self {
        Self {
            subject: constants::FALLBACK_SUBJECT.to_string(),
            sender: constants::FALLBACK_SENDER.to_string(),
            note_name: constants::FALLBACK_NOTE_NAME.to_string(),
            event_title: constants::FALLBACK_EVENT_TITLE.to_string(),
            reminder_name: constants::FALLBACK_REMINDER_NAME.to_string(),
            calendar_name: constants::FALLBACK_CALENDAR_NAME.to_string(),
            list_name: constants::FALLBACK_LIST_NAME.to_string(),
        }
    }
}

/// Configuration passed into every domain mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Maximum content/body length in Unicode code points before truncation.
    pub preview_len: usize,
    /// Cap on the final ordered sequence; `None` means unbounded.
    pub max_results: Option<usize>,
    /// Per-field fallback strings.
    pub fallbacks: FieldFallbacks,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            preview_len: constants::DEFAULT_PREVIEW_LEN,
            max_results: None,
            fallbacks: FieldFallbacks::default(),
        }
    }
}
