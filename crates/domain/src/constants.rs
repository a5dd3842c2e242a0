//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! workspace. Mapper defaults live here so `MapperConfig::default()` and
//! tests agree on one source of truth.

// Content preview configuration
pub const DEFAULT_PREVIEW_LEN: usize = 200;
pub const TRUNCATE_SUFFIX: &str = "...";

// Field fallbacks substituted for missing or malformed values
pub const FALLBACK_SUBJECT: &str = "(No subject)";
pub const FALLBACK_SENDER: &str = "Unknown sender";
pub const FALLBACK_NOTE_NAME: &str = "Untitled Note";
pub const FALLBACK_EVENT_TITLE: &str = "Untitled Event";
pub const FALLBACK_REMINDER_NAME: &str = "Untitled Reminder";
pub const FALLBACK_CALENDAR_NAME: &str = "Unknown Calendar";
pub const FALLBACK_LIST_NAME: &str = "Reminders";
