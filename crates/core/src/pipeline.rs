//! Decode pipeline: parse, envelope check, entity mapping
//!
//! The contractual boundary of the core: callers hand over whatever the
//! bridge returned (raw text or an already-structured value) and get back
//! either a typed error or an ordered entity sequence. Every path runs the
//! envelope check before mapping.

use osabridge_domain::{Email, Event, MapperConfig, Note, Reminder, Result};

use crate::value::OsaValue;
use crate::{envelope, mappers, parser};

/// Raw bridge output, in either of the two forms collaborators supply.
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// Raw text conforming to the serialization grammar.
    Text(&'a str),
    /// An already-structured value; skips the parser.
    Value(OsaValue),
}

impl Payload<'_> {
    fn into_value(self) -> Result<OsaValue> {
        match self {
            Payload::Text(text) => parser::parse(text),
            Payload::Value(value) => Ok(value),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl From<OsaValue> for Payload<'_> {
    fn from(value: OsaValue) -> Self {
        Payload::Value(value)
    }
}

/// Parse (if needed) and run the status envelope check.
///
/// # Errors
///
/// Propagates parse errors from text payloads and upstream status failures
/// from error envelopes.
pub fn decode(payload: Payload<'_>) -> Result<OsaValue> {
    envelope::inspect(payload.into_value()?)
}

/// Decode a Mail payload into emails.
///
/// # Errors
///
/// See [`decode`]; mapping itself never fails.
pub fn decode_emails(payload: Payload<'_>, config: &MapperConfig) -> Result<Vec<Email>> {
    Ok(mappers::map_emails(&decode(payload)?, config))
}

/// Decode a Notes payload into notes.
///
/// # Errors
///
/// See [`decode`]; mapping itself never fails.
pub fn decode_notes(payload: Payload<'_>, config: &MapperConfig) -> Result<Vec<Note>> {
    Ok(mappers::map_notes(&decode(payload)?, config))
}

/// Decode a Calendar payload into events.
///
/// # Errors
///
/// See [`decode`]; mapping itself never fails.
pub fn decode_events(payload: Payload<'_>, config: &MapperConfig) -> Result<Vec<Event>> {
    Ok(mappers::map_events(&decode(payload)?, config))
}

/// Decode a Reminders payload into reminders.
///
/// # Errors
///
/// See [`decode`]; mapping itself never fails.
pub fn decode_reminders(payload: Payload<'_>, config: &MapperConfig) -> Result<Vec<Reminder>> {
    Ok(mappers::map_reminders(&decode(payload)?, config))
}
