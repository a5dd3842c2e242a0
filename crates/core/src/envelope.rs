//! Status envelope interpreter
//!
//! Upstream scripts report failures in-band: a record with a reserved
//! `status` key set to `"error"` arrives where data otherwise would. This
//! check must run before any mapper; a record-shaped error response would
//! otherwise map to zero entities and be misreported as "no results found".

use osabridge_domain::{OsaBridgeError, Result, StatusFailure};

use crate::value::OsaValue;

/// Reserved key marking an envelope.
const STATUS_KEY: &str = "status";
/// Reserved key carrying the failure reason.
const REASON_KEY: &str = "reason";
/// The one status value this layer interprets.
const STATUS_ERROR: &str = "error";

/// Detect an out-of-band tagged failure in a data payload.
///
/// A top-level `Record` (never a `List`) with key `status` equal to the
/// string `"error"` is converted into
/// [`OsaBridgeError::UpstreamStatus`], with the failure kind read from the
/// `reason` key. Any other `status` value (e.g. `"success"`) passes the
/// value through unchanged; interpreting those tags is the caller's
/// responsibility.
///
/// # Errors
///
/// Returns [`OsaBridgeError::UpstreamStatus`] when the value is an error
/// envelope.
pub fn inspect(value: OsaValue) -> Result<OsaValue> {
    let status = value.get(STATUS_KEY).and_then(OsaValue::as_str);
    if status == Some(STATUS_ERROR) {
        let reason = value.get(REASON_KEY).and_then(OsaValue::as_str);
        let failure = StatusFailure::from_reason(reason);
        tracing::warn!(
            kind = %failure.kind,
            reason = reason.unwrap_or("<none>"),
            "upstream reported an error envelope"
        );
        return Err(OsaBridgeError::UpstreamStatus(failure));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use osabridge_domain::StatusFailureKind;

    use super::*;
    use crate::parser::parse;

    fn parsed(text: &str) -> OsaValue {
        match parse(text) {
            Ok(value) => value,
            Err(err) => panic!("test payload must parse: {err}"),
        }
    }

    #[test]
    fn error_envelope_is_detected() {
        let payload = parsed(r#"{status:"error", reason:"folder_not_found"}"#);
        match inspect(payload) {
            Err(OsaBridgeError::UpstreamStatus(failure)) => {
                assert_eq!(failure.kind, StatusFailureKind::FolderNotFound);
                assert_eq!(failure.detail.as_deref(), Some("folder_not_found"));
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[test]
    fn error_envelope_without_reason() {
        let payload = parsed(r#"{status:"error"}"#);
        match inspect(payload) {
            Err(OsaBridgeError::UpstreamStatus(failure)) => {
                assert_eq!(failure.kind, StatusFailureKind::Other);
                assert_eq!(failure.detail, None);
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[test]
    fn arbitrary_reason_is_preserved() {
        let payload = parsed(r#"{status:"error", reason:"Mail quit unexpectedly"}"#);
        match inspect(payload) {
            Err(OsaBridgeError::UpstreamStatus(failure)) => {
                assert_eq!(failure.kind, StatusFailureKind::Other);
                assert!(failure.to_string().contains("Mail quit unexpectedly"));
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[test]
    fn success_status_passes_through_unchanged() {
        let payload = parsed(r#"{status:"success", noteRecord:{name:"n"}}"#);
        let inspected = inspect(payload.clone());
        assert_eq!(inspected, Ok(payload));
    }

    #[test]
    fn lists_are_never_envelopes() {
        // A list whose first record looks like an envelope is still data
        let payload = parsed(r#"{{status:"error", reason:"x"}}"#);
        assert!(inspect(payload).is_ok());
    }

    #[test]
    fn non_string_status_is_not_an_envelope() {
        let payload = parsed("{status:1}");
        assert!(inspect(payload).is_ok());
    }
}
