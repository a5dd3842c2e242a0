//! Generic value model for bridge output
//!
//! The bridge serializes every result into one textual grammar; [`OsaValue`]
//! is the parsed, tagged form of that grammar. Values are transient: built
//! per parse call, consumed by the envelope interpreter and the mappers,
//! never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tagged value produced by parsing the bridge's serialization grammar.
///
/// Records preserve insertion order and keep keys unique: writing a key that
/// already exists replaces the value at its original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OsaValue {
    /// The bridge's `missing value` sentinel.
    Null,
    Bool(bool),
    /// Decimal, signed; the grammar has no exponent form.
    Number(f64),
    String(String),
    List(Vec<OsaValue>),
    /// Keyed record; insertion order preserved, keys unique.
    Record(Vec<(String, OsaValue)>),
}

impl OsaValue {
    /// Look up a record field by key. `None` for non-records.
    pub fn get(&self, key: &str) -> Option<&OsaValue> {
        match self {
            Self::Record(fields) => {
                fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Whether this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Insert into a record body with last-write-wins semantics.
    ///
    /// A duplicate key replaces the existing value in place, so key order
    /// stays the order keys first appeared.
    pub(crate) fn record_insert(
        fields: &mut Vec<(String, OsaValue)>,
        key: String,
        value: OsaValue,
    ) {
        if let Some(slot) = fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            fields.push((key, value));
        }
    }
}

/// Canonical text form of a grammar number.
///
/// Whole values print without a fractional part so `3.0` re-serializes as
/// `3`. Rust's `f64` Display never emits an exponent, which matches the
/// grammar.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            other => write!(f, "{other}")?,
        }
    }
    write!(f, "\"")
}

/// Re-emits the bridge grammar, so `parse(value.to_string())` round-trips.
impl fmt::Display for OsaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "missing value"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", number_to_string(*n)),
            Self::String(s) => write_escaped(f, s),
            Self::List(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if is_bare_key(key) {
                        write!(f, "{key}:{value}")?;
                    } else {
                        write_escaped(f, key)?;
                        write!(f, ":{value}")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}
