//! Total scalar coercions with documented fallbacks
//!
//! Every function in this module is total: malformed input degrades to a
//! documented fallback instead of failing, so one garbled field never aborts
//! an otherwise-valid batch of records. All mapper field extraction routes
//! through here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use osabridge_domain::DateField;

use crate::value::{number_to_string, OsaValue};

/// Coerce a value to text.
///
/// Null/absent yields the fallback; scalars yield their canonical text form;
/// containers yield the fallback (never a structural dump).
pub fn coerce_string(value: Option<&OsaValue>, fallback: &str) -> String {
    match value {
        Some(OsaValue::String(s)) => s.clone(),
        Some(OsaValue::Bool(b)) => b.to_string(),
        Some(OsaValue::Number(n)) => number_to_string(*n),
        Some(OsaValue::Null | OsaValue::List(_) | OsaValue::Record(_)) | None => {
            fallback.to_string()
        }
    }
}

/// Coerce a value to a boolean.
///
/// Native bools pass through; `"true"`/`"yes"` and `"false"`/`"no"` parse
/// case-insensitively; numbers are true when non-zero; anything else yields
/// the fallback.
pub fn coerce_bool(value: Option<&OsaValue>, fallback: bool) -> bool {
    match value {
        Some(OsaValue::Bool(b)) => *b,
        Some(OsaValue::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => true,
            "false" | "no" => false,
            _ => fallback,
        },
        Some(OsaValue::Number(n)) => *n != 0.0,
        _ => fallback,
    }
}

/// Coerce a value to a finite number.
///
/// Returns `None` (absent) rather than a fallback value: callers must not
/// treat absent as zero.
pub fn coerce_number(value: Option<&OsaValue>) -> Option<f64> {
    match value {
        Some(OsaValue::Number(n)) if n.is_finite() => Some(*n),
        Some(OsaValue::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Interpret a pre-converted epoch value as an absolute timestamp.
///
/// The producing scripts convert the AppleScript clock delta into absolute
/// Unix seconds before returning it; this parses that numeric value.
/// Unparsable or out-of-range input reports unavailable (`None`).
pub fn date_from_epoch(value: Option<&OsaValue>) -> Option<DateTime<Utc>> {
    let secs = coerce_number(value)?;
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}

/// Date-and-time texts the bridge is known to emit, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%A, %B %d, %Y at %I:%M:%S %p",
    "%A, %d %B %Y at %H:%M:%S",
    "%B %d, %Y at %I:%M:%S %p",
    "%B %d, %Y %I:%M:%S %p",
    "%d %B %Y at %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only texts; parsed as midnight UTC.
const DATE_FORMATS: &[&str] =
    &["%Y-%m-%d", "%A, %B %d, %Y", "%B %d, %Y", "%d %B %Y", "%m/%d/%Y"];

/// Attempt calendar/time parsing of arbitrary text.
///
/// On success returns [`DateField::Timestamp`]; on failure returns
/// [`DateField::Raw`] with the original text unchanged so no information is
/// lost. Absent, null, or empty input yields `None`. Numeric input is
/// treated as pre-converted epoch seconds.
pub fn date_from_free_text(value: Option<&OsaValue>) -> Option<DateField> {
    let text = match value {
        Some(OsaValue::String(s)) => s.trim(),
        Some(OsaValue::Number(_)) => {
            return date_from_epoch(value).map(DateField::Timestamp);
        }
        _ => return None,
    };

    if text.is_empty() || text == "missing value" {
        return None;
    }

    match parse_date_text(text) {
        Some(ts) => Some(DateField::Timestamp(ts)),
        None => Some(DateField::Raw(text.to_string())),
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(text) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn string_coercion_canonical_forms() {
        assert_eq!(coerce_string(Some(&OsaValue::String("hi".into())), "x"), "hi");
        assert_eq!(coerce_string(Some(&OsaValue::Bool(true)), "x"), "true");
        assert_eq!(coerce_string(Some(&OsaValue::Number(3.0)), "x"), "3");
        assert_eq!(coerce_string(Some(&OsaValue::Number(3.5)), "x"), "3.5");
    }

    #[test]
    fn string_coercion_fallbacks() {
        assert_eq!(coerce_string(None, "x"), "x");
        assert_eq!(coerce_string(Some(&OsaValue::Null), "x"), "x");
        // Containers never stringify structurally
        assert_eq!(coerce_string(Some(&OsaValue::List(vec![])), "x"), "x");
        assert_eq!(coerce_string(Some(&OsaValue::Record(vec![])), "x"), "x");
    }

    #[test]
    fn bool_coercion_forms() {
        assert!(coerce_bool(Some(&OsaValue::Bool(true)), false));
        assert!(coerce_bool(Some(&OsaValue::String("YES".into())), false));
        assert!(coerce_bool(Some(&OsaValue::String("True".into())), false));
        assert!(!coerce_bool(Some(&OsaValue::String("no".into())), true));
        assert!(!coerce_bool(Some(&OsaValue::String("FALSE".into())), true));
        assert!(coerce_bool(Some(&OsaValue::Number(2.0)), false));
        assert!(!coerce_bool(Some(&OsaValue::Number(0.0)), true));
    }

    #[test]
    fn bool_coercion_fallbacks() {
        assert!(!coerce_bool(None, false));
        assert!(!coerce_bool(Some(&OsaValue::Null), false));
        assert!(coerce_bool(Some(&OsaValue::String("maybe".into())), true));
        assert!(coerce_bool(Some(&OsaValue::List(vec![])), true));
    }

    #[test]
    fn number_coercion_absent_is_not_zero() {
        assert_eq!(coerce_number(Some(&OsaValue::Number(2.5))), Some(2.5));
        assert_eq!(coerce_number(Some(&OsaValue::String("42".into()))), Some(42.0));
        assert_eq!(coerce_number(Some(&OsaValue::String(" -1.5 ".into()))), Some(-1.5));
        assert_eq!(coerce_number(Some(&OsaValue::String("n/a".into()))), None);
        assert_eq!(coerce_number(Some(&OsaValue::Null)), None);
        assert_eq!(coerce_number(None), None);
        assert_eq!(coerce_number(Some(&OsaValue::Number(f64::NAN))), None);
    }

    #[test]
    fn epoch_dates_parse() {
        let ts = date_from_epoch(Some(&OsaValue::Number(1_704_067_200.0)));
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single());

        let from_text = date_from_epoch(Some(&OsaValue::String("1704067200".into())));
        assert_eq!(from_text, ts);
    }

    #[test]
    fn epoch_dates_report_unavailable() {
        assert_eq!(date_from_epoch(Some(&OsaValue::String("soon".into()))), None);
        assert_eq!(date_from_epoch(Some(&OsaValue::Null)), None);
        assert_eq!(date_from_epoch(None), None);
    }

    #[test]
    fn free_text_dates_parse_known_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 8, 2, 13, 30, 0).single().map(DateField::Timestamp);

        assert_eq!(
            date_from_free_text(Some(&OsaValue::String("2024-08-02 13:30:00".into()))),
            expected
        );
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String(
                "Friday, August 2, 2024 at 1:30:00 PM".into()
            ))),
            expected
        );
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String(
                "Friday, 2 August 2024 at 13:30:00".into()
            ))),
            expected
        );
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String("2024-08-02T13:30:00Z".into()))),
            expected
        );
    }

    #[test]
    fn free_text_date_only_is_midnight() {
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String("August 2, 2024".into()))),
            Utc.with_ymd_and_hms(2024, 8, 2, 0, 0, 0).single().map(DateField::Timestamp)
        );
    }

    #[test]
    fn free_text_failure_keeps_original_text() {
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String("sometime next week".into()))),
            Some(DateField::Raw("sometime next week".to_string()))
        );
    }

    #[test]
    fn free_text_absent_and_empty_are_none() {
        assert_eq!(date_from_free_text(None), None);
        assert_eq!(date_from_free_text(Some(&OsaValue::Null)), None);
        assert_eq!(date_from_free_text(Some(&OsaValue::String("  ".into()))), None);
        assert_eq!(
            date_from_free_text(Some(&OsaValue::String("missing value".into()))),
            None
        );
    }

    #[test]
    fn free_text_numeric_is_epoch_seconds() {
        assert_eq!(
            date_from_free_text(Some(&OsaValue::Number(1_704_067_200.0))),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().map(DateField::Timestamp)
        );
    }
}
