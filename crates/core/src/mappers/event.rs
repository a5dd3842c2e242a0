//! Calendar integration mapper

use std::collections::HashMap;

use osabridge_domain::{DateField, Event, MapperConfig};

use super::{apply_cap, extract, is_stray, records_of, FieldSpec};
use crate::value::OsaValue;

/// Identity-bearing fields for the stray-record drop rule.
const IDENTITY_KEYS: (&str, &str) = ("id", "title");

/// Sort sentinel: records with unparsable or missing times go last.
const TIME_SENTINEL: i64 = i64::MAX;

fn field_specs(config: &MapperConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("id", ""),
        FieldSpec::text("title", &config.fallbacks.event_title),
        FieldSpec::text_opt("location"),
        FieldSpec::text_opt("notes"),
        FieldSpec::free_date("startDate"),
        FieldSpec::free_date("endDate"),
        FieldSpec::text("calendarName", &config.fallbacks.calendar_name),
        FieldSpec::flag("isAllDay", false),
        FieldSpec::text_opt("url"),
    ]
}

fn time_key(date: Option<&DateField>) -> i64 {
    date.and_then(DateField::epoch).unwrap_or(TIME_SENTINEL)
}

/// Map a bridge payload to events, deduplicated by id and sorted by start
/// time.
///
/// Event identity is the `id` field when non-empty; a repeated id keeps the
/// later record (last write wins). Id-less records are appended after the
/// deduplicated ones in encountered order, and the final sequence is stably
/// sorted ascending by effective start time, then end time, with a
/// last-place sentinel for unparsable times.
pub fn map_events(value: &OsaValue, config: &MapperConfig) -> Vec<Event> {
    let specs = field_specs(config);
    let mut deduped: Vec<Event> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut anonymous: Vec<Event> = Vec::new();

    for record in records_of(value, "event") {
        if is_stray(record, IDENTITY_KEYS) {
            tracing::debug!("dropping event record with empty id and title");
            continue;
        }
        let bag = extract(record, &specs);
        let event = Event {
            id: bag.text("id"),
            title: bag.text("title"),
            location: bag.text_opt("location"),
            notes: bag.text_opt("notes"),
            start_date: bag.date("startDate"),
            end_date: bag.date("endDate"),
            calendar_name: bag.text("calendarName"),
            is_all_day: bag.flag("isAllDay"),
            url: bag.text_opt("url"),
        };

        if event.id.is_empty() {
            anonymous.push(event);
        } else if let Some(&slot) = index_by_id.get(&event.id) {
            tracing::debug!(id = %event.id, "replacing duplicate event id");
            deduped[slot] = event;
        } else {
            index_by_id.insert(event.id.clone(), deduped.len());
            deduped.push(event);
        }
    }

    deduped.extend(anonymous);
    deduped.sort_by_key(|event| {
        (time_key(event.start_date.as_ref()), time_key(event.end_date.as_ref()))
    });
    apply_cap(deduped, config)
}
