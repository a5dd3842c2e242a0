//! # Osabridge Core
//!
//! Pure parsing and normalization layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The generic value model for bridge output ([`OsaValue`])
//! - The recursive-descent parser for the bridge serialization grammar
//! - Total scalar coercions with documented fallbacks
//! - The four domain mappers (Mail, Notes, Calendar, Reminders)
//! - The status envelope interpreter
//!
//! ## Architecture Principles
//! - Only depends on `osabridge-domain`
//! - No I/O, no platform code, no shared mutable state
//! - Every consumption path runs through the parser and the envelope
//!   interpreter before any entity mapping

pub mod coerce;
pub mod envelope;
pub mod mappers;
pub mod parser;
pub mod pipeline;
pub mod value;

// Re-export specific items to keep call sites short
pub use envelope::inspect;
pub use mappers::{map_emails, map_events, map_notes, map_reminders};
pub use parser::parse;
pub use pipeline::{decode, decode_emails, decode_events, decode_notes, decode_reminders, Payload};
pub use value::OsaValue;
