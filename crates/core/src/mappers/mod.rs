//! Domain mappers: bridge values to typed entity sequences
//!
//! One generic tolerant-field-extractor does the work for all four
//! integrations. Each entity module supplies a field-spec table (key,
//! coercion kind, fallback) and a thin assembly step; extraction, the
//! stray-record drop rule, preview truncation, and batch capping are
//! shared here. No mapper performs ad hoc parsing: every scalar goes
//! through [`crate::coerce`].

mod email;
mod event;
mod note;
mod reminder;

use chrono::{DateTime, Utc};
pub use email::map_emails;
pub use event::map_events;
pub use note::map_notes;
use osabridge_domain::constants::TRUNCATE_SUFFIX;
use osabridge_domain::{DateField, MapperConfig};
pub use reminder::map_reminders;

use crate::coerce;
use crate::value::OsaValue;

/// How one field is pulled out of a record.
pub(crate) enum CoerceKind {
    /// Text with a fallback for missing/malformed values.
    Text(String),
    /// Optional text; empty or missing becomes `None`.
    TextOpt,
    /// Boolean with a fallback.
    Flag(bool),
    /// Pre-converted epoch seconds.
    EpochDate,
    /// Free-text date; unparsable text is kept raw.
    FreeDate,
    /// Optional number; absent is not zero.
    NumberOpt,
}

/// One row of a per-entity field-spec table.
pub(crate) struct FieldSpec {
    key: &'static str,
    kind: CoerceKind,
}

impl FieldSpec {
    pub(crate) fn text(key: &'static str, fallback: &str) -> Self {
        Self { key, kind: CoerceKind::Text(fallback.to_string()) }
    }

    pub(crate) fn text_opt(key: &'static str) -> Self {
        Self { key, kind: CoerceKind::TextOpt }
    }

    pub(crate) fn flag(key: &'static str, fallback: bool) -> Self {
        Self { key, kind: CoerceKind::Flag(fallback) }
    }

    pub(crate) fn epoch_date(key: &'static str) -> Self {
        Self { key, kind: CoerceKind::EpochDate }
    }

    pub(crate) fn free_date(key: &'static str) -> Self {
        Self { key, kind: CoerceKind::FreeDate }
    }

    pub(crate) fn number(key: &'static str) -> Self {
        Self { key, kind: CoerceKind::NumberOpt }
    }
}

/// A coerced field value.
pub(crate) enum Extracted {
    Text(String),
    TextOpt(Option<String>),
    Flag(bool),
    Epoch(Option<DateTime<Utc>>),
    Date(Option<DateField>),
    Number(Option<f64>),
}

/// Coerced fields of one record, keyed by spec-table key.
///
/// Accessors are total: a missing or differently-typed entry yields the
/// zero value for the accessor, keeping entity assembly panic-free.
pub(crate) struct FieldBag {
    fields: Vec<(&'static str, Extracted)>,
}

impl FieldBag {
    fn find(&self, key: &str) -> Option<&Extracted> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub(crate) fn text(&self, key: &str) -> String {
        match self.find(key) {
            Some(Extracted::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub(crate) fn text_opt(&self, key: &str) -> Option<String> {
        match self.find(key) {
            Some(Extracted::TextOpt(v)) => v.clone(),
            _ => None,
        }
    }

    pub(crate) fn flag(&self, key: &str) -> bool {
        match self.find(key) {
            Some(Extracted::Flag(b)) => *b,
            _ => false,
        }
    }

    pub(crate) fn epoch(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.find(key) {
            Some(Extracted::Epoch(ts)) => *ts,
            _ => None,
        }
    }

    pub(crate) fn date(&self, key: &str) -> Option<DateField> {
        match self.find(key) {
            Some(Extracted::Date(d)) => d.clone(),
            _ => None,
        }
    }

    pub(crate) fn number(&self, key: &str) -> Option<f64> {
        match self.find(key) {
            Some(Extracted::Number(n)) => *n,
            _ => None,
        }
    }
}

/// Run a field-spec table against one record.
pub(crate) fn extract(record: &OsaValue, specs: &[FieldSpec]) -> FieldBag {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        let value = record.get(spec.key);
        let extracted = match &spec.kind {
            CoerceKind::Text(fallback) => Extracted::Text(coerce::coerce_string(value, fallback)),
            CoerceKind::TextOpt => {
                let text = coerce::coerce_string(value, "");
                let opt = if text.trim().is_empty() { None } else { Some(text) };
                Extracted::TextOpt(opt)
            }
            CoerceKind::Flag(fallback) => Extracted::Flag(coerce::coerce_bool(value, *fallback)),
            CoerceKind::EpochDate => Extracted::Epoch(coerce::date_from_epoch(value)),
            CoerceKind::FreeDate => Extracted::Date(coerce::date_from_free_text(value)),
            CoerceKind::NumberOpt => Extracted::Number(coerce::coerce_number(value)),
        };
        fields.push((spec.key, extracted));
    }
    FieldBag { fields }
}

/// Candidate records of a payload: list elements that are records, or the
/// payload itself when it is a single record. Anything else maps to empty.
pub(crate) fn records_of<'a>(value: &'a OsaValue, entity: &'static str) -> Vec<&'a OsaValue> {
    match value {
        OsaValue::List(items) => items
            .iter()
            .filter(|item| {
                let keep = item.is_record();
                if !keep {
                    tracing::debug!(entity, "skipping non-record batch element");
                }
                keep
            })
            .collect(),
        OsaValue::Record(_) => vec![value],
        _ => {
            tracing::debug!(entity, "payload is neither list nor record; mapping to empty");
            Vec::new()
        }
    }
}

/// Stray-artifact drop rule: both identity-bearing fields empty on the raw
/// record, checked before fallback substitution.
pub(crate) fn is_stray(record: &OsaValue, identity_keys: (&str, &str)) -> bool {
    coerce::coerce_string(record.get(identity_keys.0), "").trim().is_empty()
        && coerce::coerce_string(record.get(identity_keys.1), "").trim().is_empty()
}

/// Cut content to the configured preview length (Unicode code points) and
/// append the ellipsis marker. Not word-aware.
pub(crate) fn truncate_preview(text: String, config: &MapperConfig) -> String {
    if text.chars().count() <= config.preview_len {
        return text;
    }
    tracing::trace!(preview_len = config.preview_len, "truncating content preview");
    let mut cut: String = text.chars().take(config.preview_len).collect();
    cut.push_str(TRUNCATE_SUFFIX);
    cut
}

/// Apply the configured batch cap to a final, ordered sequence.
pub(crate) fn apply_cap<T>(mut entities: Vec<T>, config: &MapperConfig) -> Vec<T> {
    if let Some(cap) = config.max_results {
        if entities.len() > cap {
            tracing::debug!(cap, dropped = entities.len() - cap, "capping mapped batch");
            entities.truncate(cap);
        }
    }
    entities
}
