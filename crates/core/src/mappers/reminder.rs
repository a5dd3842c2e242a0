//! Reminders integration mapper

use osabridge_domain::{MapperConfig, Reminder};

use super::{apply_cap, extract, is_stray, records_of, truncate_preview, FieldSpec};
use crate::value::OsaValue;

/// Identity-bearing fields for the stray-record drop rule.
const IDENTITY_KEYS: (&str, &str) = ("id", "name");

fn field_specs(config: &MapperConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("name", &config.fallbacks.reminder_name),
        FieldSpec::text("id", ""),
        FieldSpec::text("body", ""),
        FieldSpec::flag("completed", false),
        FieldSpec::free_date("dueDate"),
        FieldSpec::text("listName", &config.fallbacks.list_name),
        FieldSpec::free_date("completionDate"),
        FieldSpec::free_date("creationDate"),
        FieldSpec::free_date("modificationDate"),
        FieldSpec::free_date("remindMeDate"),
        FieldSpec::number("priority"),
    ]
}

/// Map a bridge payload to reminders in encountered order.
pub fn map_reminders(value: &OsaValue, config: &MapperConfig) -> Vec<Reminder> {
    let specs = field_specs(config);
    let mut reminders = Vec::new();

    for record in records_of(value, "reminder") {
        if is_stray(record, IDENTITY_KEYS) {
            tracing::debug!("dropping reminder record with empty id and name");
            continue;
        }
        let bag = extract(record, &specs);
        reminders.push(Reminder {
            name: bag.text("name"),
            id: bag.text("id"),
            body: truncate_preview(bag.text("body"), config),
            completed: bag.flag("completed"),
            due_date: bag.date("dueDate"),
            list_name: bag.text("listName"),
            completion_date: bag.date("completionDate"),
            creation_date: bag.date("creationDate"),
            modification_date: bag.date("modificationDate"),
            remind_me_date: bag.date("remindMeDate"),
            priority: bag.number("priority"),
        });
    }

    apply_cap(reminders, config)
}
