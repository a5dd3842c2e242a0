//! Recursive-descent parser for the bridge serialization grammar
//!
//! The bridge serializes lists and records with the same brace delimiter,
//! so collection shape is inferred by lookahead (see [`classify`]) before
//! contents are parsed. Everything else is a straightforward single-pass
//! descent over the input bytes.
//!
//! Grammar accepted:
//! - `"..."` strings with `\"`, `\\`, `\n`, `\r`, `\t` escapes; unknown
//!   escapes pass the literal character through
//! - signed decimal numbers without exponent form
//! - `true` / `false`
//! - the `missing value` null sentinel
//! - barewords, captured up to the next comma, closing brace, or whitespace
//! - brace-delimited lists and records
//!
//! Whitespace between tokens is insignificant. Trailing non-whitespace
//! after the top-level value is an error. A leading `"=> "` diagnostic
//! prefix (osascript echo form) is stripped before parsing.

mod classify;

pub(crate) use classify::{classify, CollectionShape};
use osabridge_domain::{OsaBridgeError, Result};

use crate::value::OsaValue;

/// Diagnostic prefix emitted by interactive osascript sessions.
const RESULT_PREFIX: &str = "=> ";

/// Parse one top-level value out of raw bridge output.
///
/// # Errors
///
/// Returns [`OsaBridgeError::Parse`] on any grammar violation: unterminated
/// strings, record keys not followed by `:`, malformed numbers, or trailing
/// content after the top-level value. Offsets refer to the input after
/// prefix stripping.
pub fn parse(text: &str) -> Result<OsaValue> {
    let input = text.trim_start();
    let input = input.strip_prefix(RESULT_PREFIX).unwrap_or(input);

    tracing::trace!(input_len = input.len(), "parsing bridge output");

    let mut cursor = Cursor::new(input);
    cursor.skip_ws();
    let value = cursor.parse_value()?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(cursor.error("trailing content after top-level value"));
    }
    Ok(value)
}

/// Byte cursor over the input text.
///
/// Cloning is cheap; the classifier runs its lookahead on a clone so the
/// real parse never loses its position.
#[derive(Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advance one byte. Only call after peeking an ASCII byte; multi-byte
    /// characters go through [`Cursor::next_char`].
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.input[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: &str) -> OsaBridgeError {
        OsaBridgeError::Parse { offset: self.pos, message: message.to_string() }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Result<OsaValue> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'"') => self.parse_string().map(OsaValue::String),
            Some(b'{') => self.parse_collection(),
            Some(_) => self.parse_token(),
        }
    }

    /// Parse a double-quoted string literal, decoding escapes.
    fn parse_string(&mut self) -> Result<String> {
        if !self.eat(b'"') {
            return Err(self.error("expected string literal"));
        }
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string literal")),
                Some(b'"') => {
                    self.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.bump();
                    let escaped = self
                        .next_char()
                        .ok_or_else(|| self.error("unterminated escape sequence"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        // Unknown escapes pass the literal character through
                        other => out.push(other),
                    }
                }
                Some(_) => {
                    let run_start = self.pos;
                    while let Some(b) = self.peek() {
                        if b == b'"' || b == b'\\' {
                            break;
                        }
                        self.bump();
                    }
                    out.push_str(&self.input[run_start..self.pos]);
                }
            }
        }
    }

    /// Lex an unquoted token and interpret it as bool, null, number, or
    /// bareword string.
    fn parse_token(&mut self) -> Result<OsaValue> {
        let token = self.lex_bareword();
        if token.is_empty() {
            return Err(self.error("expected value"));
        }

        match token {
            "true" => Ok(OsaValue::Bool(true)),
            "false" => Ok(OsaValue::Bool(false)),
            // The null sentinel spans two words
            "missing" => {
                let mut ahead = self.clone();
                ahead.skip_ws();
                if ahead.lex_bareword() == "value" {
                    *self = ahead;
                    Ok(OsaValue::Null)
                } else {
                    Ok(OsaValue::String(token.to_string()))
                }
            }
            _ if is_number_token(token) => token
                .parse::<f64>()
                .map(OsaValue::Number)
                .map_err(|_| self.error("invalid number literal")),
            _ => Ok(OsaValue::String(token.to_string())),
        }
    }

    /// Capture a bareword: everything up to the next comma, closing brace,
    /// or whitespace.
    fn lex_bareword(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b',' || b == b'}' || b.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn parse_collection(&mut self) -> Result<OsaValue> {
        if !self.eat(b'{') {
            return Err(self.error("expected '{'"));
        }
        self.skip_ws();
        // {} is immediately an empty list; the classifier never runs
        if self.eat(b'}') {
            return Ok(OsaValue::List(Vec::new()));
        }
        match classify(self) {
            CollectionShape::Record => self.parse_record_body(),
            CollectionShape::List => self.parse_list_body(),
        }
    }

    fn parse_list_body(&mut self) -> Result<OsaValue> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_value()?);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                return Ok(OsaValue::List(items));
            }
            return Err(self.error("expected ',' or '}' in list"));
        }
    }

    fn parse_record_body(&mut self) -> Result<OsaValue> {
        let mut fields = Vec::new();
        loop {
            self.skip_ws();
            let key = self.parse_record_key()?;
            self.skip_ws();
            if !self.eat(b':') {
                return Err(self.error("record key not followed by ':'"));
            }
            let value = self.parse_value()?;
            OsaValue::record_insert(&mut fields, key, value);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                return Ok(OsaValue::Record(fields));
            }
            return Err(self.error("expected ',' or '}' in record"));
        }
    }

    /// A record key is a quoted string or a contiguous alphanumeric /
    /// underscore run.
    fn parse_record_key(&mut self) -> Result<String> {
        if self.peek() == Some(b'"') {
            return self.parse_string();
        }
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected record key"));
        }
        Ok(self.input[start..self.pos].to_string())
    }
}

fn is_number_token(token: &str) -> bool {
    let rest = token.strip_prefix('-').unwrap_or(token);
    if rest.is_empty() {
        return false;
    }
    match rest.split_once('.') {
        None => rest.bytes().all(|b| b.is_ascii_digit()),
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(text: &str) -> OsaValue {
        match parse(text) {
            Ok(value) => value,
            Err(err) => panic!("expected parse of {text:?} to succeed: {err}"),
        }
    }

    fn parse_err(text: &str) -> OsaBridgeError {
        match parse(text) {
            Ok(value) => panic!("expected parse of {text:?} to fail, got {value:?}"),
            Err(err) => err,
        }
    }

    #[test]
    fn scalars_parse() {
        assert_eq!(parse_ok("true"), OsaValue::Bool(true));
        assert_eq!(parse_ok("false"), OsaValue::Bool(false));
        assert_eq!(parse_ok("missing value"), OsaValue::Null);
        assert_eq!(parse_ok("42"), OsaValue::Number(42.0));
        assert_eq!(parse_ok("-3.25"), OsaValue::Number(-3.25));
        assert_eq!(parse_ok("\"hello\""), OsaValue::String("hello".to_string()));
    }

    #[test]
    fn bareword_falls_back_to_string() {
        assert_eq!(parse_ok("beep"), OsaValue::String("beep".to_string()));
        // "missing" alone is a bareword, not the null sentinel
        assert_eq!(parse_ok("missing"), OsaValue::String("missing".to_string()));
        // version-like tokens are not valid numbers
        assert_eq!(parse_ok("1.2.3"), OsaValue::String("1.2.3".to_string()));
    }

    #[test]
    fn result_prefix_is_stripped() {
        assert_eq!(parse_ok("=> {1, 2}"), parse_ok("{1, 2}"));
    }

    #[test]
    fn string_escapes_decode() {
        assert_eq!(
            parse_ok(r#""line1\nline2""#),
            OsaValue::String("line1\nline2".to_string())
        );
        assert_eq!(
            parse_ok(r#""She said \"hi\"""#),
            OsaValue::String("She said \"hi\"".to_string())
        );
        assert_eq!(parse_ok(r#""tab\there""#), OsaValue::String("tab\there".to_string()));
        // Unknown escape passes the literal character through
        assert_eq!(parse_ok(r#""\q""#), OsaValue::String("q".to_string()));
    }

    #[test]
    fn empty_braces_are_an_empty_list() {
        assert_eq!(parse_ok("{}"), OsaValue::List(Vec::new()));
        assert_eq!(parse_ok("{  }"), OsaValue::List(Vec::new()));
    }

    #[test]
    fn list_parses_in_order() {
        assert_eq!(
            parse_ok("{1, 2, 3}"),
            OsaValue::List(vec![
                OsaValue::Number(1.0),
                OsaValue::Number(2.0),
                OsaValue::Number(3.0),
            ])
        );
    }

    #[test]
    fn record_parses_with_key_order() {
        assert_eq!(
            parse_ok("{a:1, b:2}"),
            OsaValue::Record(vec![
                ("a".to_string(), OsaValue::Number(1.0)),
                ("b".to_string(), OsaValue::Number(2.0)),
            ])
        );
    }

    #[test]
    fn record_duplicate_key_last_write_wins() {
        assert_eq!(
            parse_ok("{a:1, b:2, a:9}"),
            OsaValue::Record(vec![
                ("a".to_string(), OsaValue::Number(9.0)),
                ("b".to_string(), OsaValue::Number(2.0)),
            ])
        );
    }

    #[test]
    fn quoted_record_keys_parse() {
        assert_eq!(
            parse_ok(r#"{"a key":1}"#),
            OsaValue::Record(vec![("a key".to_string(), OsaValue::Number(1.0))])
        );
    }

    #[test]
    fn nested_collections_parse() {
        let parsed = parse_ok(r#"{name:"x", tags:{1, {inner:true}}}"#);
        let tags = parsed.get("tags");
        assert!(matches!(tags, Some(OsaValue::List(items)) if items.len() == 2));
    }

    #[test]
    fn embedded_delimiters_in_strings_do_not_confuse_parsing() {
        let parsed = parse_ok(r#"{note:"a, b: c {d}", n:1}"#);
        assert_eq!(
            parsed.get("note").and_then(OsaValue::as_str),
            Some("a, b: c {d}")
        );
        assert_eq!(parsed.get("n"), Some(&OsaValue::Number(1.0)));
    }

    #[test]
    fn null_sentinel_inside_record() {
        let parsed = parse_ok("{folder:missing value, id:3}");
        assert_eq!(parsed.get("folder"), Some(&OsaValue::Null));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let err = parse_err("{1, 2} extra");
        assert!(err.to_string().contains("trailing content"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = parse_err("\"never ends");
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn key_without_colon_is_an_error() {
        let err = parse_err("{a:1, b}");
        assert!(err.to_string().contains("not followed by ':'"));
    }

    #[test]
    fn errors_carry_offsets() {
        match parse_err("{a:1} x") {
            OsaBridgeError::Parse { offset, .. } => assert_eq!(offset, 6),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant() {
        assert_eq!(parse_ok("{ a : 1 ,\n\tb : 2 }"), parse_ok("{a:1,b:2}"));
    }
}
