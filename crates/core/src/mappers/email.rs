//! Mail integration mapper

use osabridge_domain::{Email, MapperConfig};

use super::{apply_cap, extract, is_stray, records_of, truncate_preview, FieldSpec};
use crate::value::OsaValue;

/// Identity-bearing fields for the stray-record drop rule.
const IDENTITY_KEYS: (&str, &str) = ("subject", "sender");

fn field_specs(config: &MapperConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("subject", &config.fallbacks.subject),
        FieldSpec::text("sender", &config.fallbacks.sender),
        FieldSpec::epoch_date("dateSent"),
        FieldSpec::text("content", ""),
        FieldSpec::flag("isRead", false),
        FieldSpec::text("mailbox", ""),
    ]
}

/// Map a bridge payload to an ordered sequence of emails.
///
/// Total over malformed input: garbled fields degrade to the configured
/// fallbacks, and only stray records (empty subject AND sender) are dropped.
pub fn map_emails(value: &OsaValue, config: &MapperConfig) -> Vec<Email> {
    let specs = field_specs(config);
    let mut emails = Vec::new();

    for record in records_of(value, "email") {
        if is_stray(record, IDENTITY_KEYS) {
            tracing::debug!("dropping email record with empty subject and sender");
            continue;
        }
        let bag = extract(record, &specs);
        emails.push(Email {
            subject: bag.text("subject"),
            sender: bag.text("sender"),
            date_sent: bag.epoch("dateSent"),
            content: truncate_preview(bag.text("content"), config),
            is_read: bag.flag("isRead"),
            mailbox: bag.text("mailbox"),
        });
    }

    apply_cap(emails, config)
}
