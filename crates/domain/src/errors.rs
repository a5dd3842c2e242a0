//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_wire_token_conversions;

/// Main error type for osabridge
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OsaBridgeError {
    /// Bridge output violated the serialization grammar.
    #[error("parse error at offset {offset}: {message}")]
    Parse {
        /// Byte offset into the (prefix-stripped) input where parsing stopped.
        offset: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// The upstream operation reported an explicit failure envelope.
    #[error("{0}")]
    UpstreamStatus(StatusFailure),

    /// Automation permission is unavailable for the target application.
    ///
    /// Produced by the access-check collaborator, never by the core itself;
    /// defined here so the whole workspace shares one error enum.
    #[error("access denied: {0}")]
    AccessDenied(String),
}

/// Result type alias for osabridge operations
pub type Result<T> = std::result::Result<T, OsaBridgeError>;

/// Failure kinds an upstream script can report through the status envelope.
///
/// The wire token is the value of the envelope's `reason` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFailureKind {
    MailboxNotFound,
    FolderNotFound,
    CalendarNotFound,
    ListNotFound,
    /// Any reason token the core does not recognize.
    Other,
}

impl_wire_token_conversions!(StatusFailureKind {
    MailboxNotFound => "mailbox_not_found",
    FolderNotFound => "folder_not_found",
    CalendarNotFound => "calendar_not_found",
    ListNotFound => "list_not_found",
    Other => "other",
});

impl StatusFailureKind {
    /// Caller-facing message for this failure kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::MailboxNotFound => "The requested mailbox was not found",
            Self::FolderNotFound => "The requested notes folder was not found",
            Self::CalendarNotFound => "The requested calendar was not found",
            Self::ListNotFound => "The requested reminders list was not found",
            Self::Other => "The upstream operation reported an error",
        }
    }
}

/// An explicit failure reported by an upstream script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFailure {
    pub kind: StatusFailureKind,
    /// Raw `reason` value from the envelope, if present.
    pub detail: Option<String>,
}

impl StatusFailure {
    /// Build a failure from the envelope's optional `reason` value.
    ///
    /// Unrecognized reasons are preserved verbatim under [`StatusFailureKind::Other`].
    pub fn from_reason(reason: Option<&str>) -> Self {
        match reason {
            None => Self { kind: StatusFailureKind::Other, detail: None },
            Some(raw) => {
                let kind = raw.parse::<StatusFailureKind>().unwrap_or(StatusFailureKind::Other);
                Self { kind, detail: Some(raw.to_string()) }
            }
        }
    }
}

impl std::fmt::Display for StatusFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, self.detail.as_deref()) {
            (StatusFailureKind::Other, Some(detail)) => {
                write!(f, "{}: {detail}", self.kind.message())
            }
            (kind, _) => write!(f, "{}", kind.message()),
        }
    }
}
