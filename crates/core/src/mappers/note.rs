//! Notes integration mapper

use std::cmp::Reverse;

use osabridge_domain::{DateField, MapperConfig, Note};

use super::{apply_cap, extract, is_stray, records_of, truncate_preview, FieldSpec};
use crate::value::OsaValue;

/// Identity-bearing fields for the stray-record drop rule.
const IDENTITY_KEYS: (&str, &str) = ("name", "content");

fn field_specs(config: &MapperConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("name", &config.fallbacks.note_name),
        FieldSpec::text("content", ""),
        FieldSpec::text_opt("folderName"),
        FieldSpec::text_opt("id"),
        FieldSpec::free_date("creationDate"),
        FieldSpec::free_date("modificationDate"),
    ]
}

/// Effective recency: modification time, else creation time, else zero.
fn recency(note: &Note) -> i64 {
    note.modification_date
        .as_ref()
        .and_then(DateField::epoch)
        .or_else(|| note.creation_date.as_ref().and_then(DateField::epoch))
        .unwrap_or(0)
}

/// Map a bridge payload to notes, most recently touched first.
pub fn map_notes(value: &OsaValue, config: &MapperConfig) -> Vec<Note> {
    let specs = field_specs(config);
    let mut notes = Vec::new();

    for record in records_of(value, "note") {
        if is_stray(record, IDENTITY_KEYS) {
            tracing::debug!("dropping note record with empty name and content");
            continue;
        }
        let bag = extract(record, &specs);
        notes.push(Note {
            name: bag.text("name"),
            content: truncate_preview(bag.text("content"), config),
            folder_name: bag.text_opt("folderName"),
            id: bag.text_opt("id"),
            creation_date: bag.date("creationDate"),
            modification_date: bag.date("modificationDate"),
        });
    }

    notes.sort_by_key(|note| Reverse(recency(note)));
    apply_cap(notes, config)
}
