//! Shape lookahead for brace-delimited collections
//!
//! The bridge serializes lists and records with the same delimiter, so shape
//! must be inferred from content. The classifier scans a clone of the cursor
//! positioned just after the opening brace and consumes nothing; the real
//! content parse runs afterwards with the shape known.

use super::Cursor;

/// The two shapes a non-empty brace collection can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectionShape {
    List,
    Record,
}

/// Decide whether the collection body ahead is a list or a record.
///
/// Scans forward tracking nesting depth, skipping whole string literals
/// (respecting backslash escapes, so an embedded brace, colon, or comma
/// inside a string never affects classification) and nested brace groups.
/// At depth 0 the first decisive byte wins: `:` means record, `,` or the
/// matching `}` means list.
///
/// An unterminated body classifies as a list; the content parse reports the
/// precise error.
pub(crate) fn classify(cursor: &Cursor<'_>) -> CollectionShape {
    let mut scan = cursor.clone();
    let mut depth = 0usize;

    while let Some(b) = scan.peek() {
        match b {
            b'"' => {
                scan.bump();
                skip_string_literal(&mut scan);
            }
            b'{' => {
                depth += 1;
                scan.bump();
            }
            b'}' if depth == 0 => return CollectionShape::List,
            b'}' => {
                depth -= 1;
                scan.bump();
            }
            b':' if depth == 0 => return CollectionShape::Record,
            b',' if depth == 0 => return CollectionShape::List,
            _ => scan.bump(),
        }
    }

    CollectionShape::List
}

/// Advance past the remainder of a string literal, honoring escapes.
fn skip_string_literal(scan: &mut Cursor<'_>) {
    while let Some(b) = scan.peek() {
        match b {
            b'\\' => {
                scan.bump();
                // Skip the escaped byte; multi-byte continuation bytes are
                // never quote or backslash, so byte-wise advance is safe
                if scan.peek().is_some() {
                    scan.bump();
                }
            }
            b'"' => {
                scan.bump();
                return;
            }
            _ => scan.bump(),
        }
    }
}
