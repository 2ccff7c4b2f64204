//! Field splitter: one row span into its column values.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::ops::Deref;

use crate::errors::ParseError;
use crate::escape::{EscapePolicy, unescape};
use crate::scanner::{Boundary, QUOTE, segments};

/// One column value of a row, as written in the SQL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue<'a> {
    /// A single-quoted literal, quotes removed and escape sequences kept.
    StringLiteral(&'a str),
    /// The bare `NULL` keyword.
    NullLiteral,
    /// Any other unquoted token (numbers, hex literals, expressions), trimmed.
    BareToken(&'a str),
}

impl<'a> FieldValue<'a> {
    /// Classify the raw text of one field.
    ///
    /// The text is trimmed first. Only the exact, case-sensitive keyword
    /// `NULL` is a null; a quoted `'NULL'` stays a string.
    #[must_use]
    pub fn from_raw(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed == "NULL" {
            return Self::NullLiteral;
        }
        let bytes = trimmed.as_bytes();
        if bytes.len() >= 2 && bytes[0] == QUOTE && bytes[bytes.len() - 1] == QUOTE {
            return Self::StringLiteral(&trimmed[1..trimmed.len() - 1]);
        }
        Self::BareToken(trimmed)
    }

    /// Whether this is the `NULL` keyword.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::NullLiteral)
    }

    /// The source text of the value, `None` for `NULL`.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::StringLiteral(text) | Self::BareToken(text) => Some(text),
            Self::NullLiteral => None,
        }
    }

    /// The value text with string literal escapes decoded per `policy`.
    ///
    /// Bare tokens are returned as written.
    #[must_use]
    pub fn text(&self, policy: EscapePolicy) -> Option<Cow<'a, str>> {
        match self {
            Self::StringLiteral(text) => Some(unescape(text, policy)),
            Self::BareToken(text) => Some(Cow::Borrowed(text)),
            Self::NullLiteral => None,
        }
    }

    /// Parse a bare token as an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::BareToken(text) => text.parse().ok(),
            _ => None,
        }
    }
}

impl Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::StringLiteral(text) => write!(f, "'{text}'"),
            FieldValue::NullLiteral => write!(f, "NULL"),
            FieldValue::BareToken(text) => write!(f, "{text}"),
        }
    }
}

/// An ordered sequence of field values, one per column position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row<'a>(Vec<FieldValue<'a>>);

impl<'a> Row<'a> {
    /// Consume the row, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<FieldValue<'a>> {
        self.0
    }
}

impl<'a> Deref for Row<'a> {
    type Target = [FieldValue<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> From<Vec<FieldValue<'a>>> for Row<'a> {
    fn from(values: Vec<FieldValue<'a>>) -> Self {
        Self(values)
    }
}

impl<'a> IntoIterator for Row<'a> {
    type Item = FieldValue<'a>;
    type IntoIter = alloc::vec::IntoIter<FieldValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'r, 'a> IntoIterator for &'r Row<'a> {
    type Item = &'r FieldValue<'a>;
    type IntoIter = core::slice::Iter<'r, FieldValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Split the text of one row into its field values.
///
/// Commas split fields only outside string literals and nested parentheses;
/// the last field needs no trailing comma. A blank span is an empty row.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] when a string literal or a nested
/// parenthesis is left open, or a parenthesis closes at depth zero. Positions
/// are relative to `row_span`.
pub fn split_fields(row_span: &str) -> Result<Row<'_>, ParseError> {
    if row_span.trim().is_empty() {
        return Ok(Row::default());
    }
    Ok(segments(row_span, Boundary::Comma)?
        .into_iter()
        .map(|range| FieldValue::from_raw(&row_span[range]))
        .collect::<Vec<_>>()
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_split_simple_row() {
        let row = split_fields("1, 'Alice', NULL, 3.5").unwrap();
        assert_eq!(
            &row[..],
            &[
                FieldValue::BareToken("1"),
                FieldValue::StringLiteral("Alice"),
                FieldValue::NullLiteral,
                FieldValue::BareToken("3.5"),
            ]
        );
    }

    #[test]
    fn test_quoted_null_is_a_string() {
        let row = split_fields("NULL,'NULL', null").unwrap();
        assert_eq!(row[0], FieldValue::NullLiteral);
        assert_eq!(row[1], FieldValue::StringLiteral("NULL"));
        assert_eq!(row[2], FieldValue::BareToken("null"));
    }

    #[test]
    fn test_escaped_quote_is_one_field() {
        let row = split_fields(r"1,'it\'s ok',2").unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], FieldValue::StringLiteral(r"it\'s ok"));
    }

    #[test]
    fn test_nested_parentheses_are_kept() {
        let row = split_fields("1, POINT(1, 2), '(see note)'").unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], FieldValue::BareToken("POINT(1, 2)"));
        assert_eq!(row[2], FieldValue::StringLiteral("(see note)"));
    }

    #[test]
    fn test_blank_span_is_empty_row() {
        assert!(split_fields("").unwrap().is_empty());
        assert!(split_fields("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_empty_fields_are_empty_tokens() {
        let row = split_fields("1,,2,").unwrap();
        assert_eq!(
            row.into_values(),
            vec![
                FieldValue::BareToken("1"),
                FieldValue::BareToken(""),
                FieldValue::BareToken("2"),
                FieldValue::BareToken(""),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_fails() {
        let err = split_fields("1, 'abc").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn test_display_round_trip() {
        let source = r"42, 'it\'s', NULL, 'a,b', f(1, 2)";
        let row = split_fields(source).unwrap();
        let rendered = row.to_string();
        assert_eq!(rendered, source);
        assert_eq!(split_fields(&rendered).unwrap(), row);
    }

    #[test]
    fn test_text_policies() {
        let value = FieldValue::StringLiteral(r"C:\\dir");
        assert_eq!(value.text(EscapePolicy::Preserve).unwrap(), r"C:\\dir");
        assert_eq!(value.text(EscapePolicy::MySql).unwrap(), r"C:\dir");
        assert_eq!(FieldValue::NullLiteral.text(EscapePolicy::MySql), None);
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(FieldValue::BareToken("-17").as_i64(), Some(-17));
        assert_eq!(FieldValue::StringLiteral("17").as_i64(), None);
    }

    #[test]
    fn test_single_quote_character_is_not_a_literal() {
        // A lone quote cannot survive splitting, but classification of raw
        // text must not slice it into an empty literal.
        assert_eq!(FieldValue::from_raw("'"), FieldValue::BareToken("'"));
        assert_eq!(FieldValue::from_raw("''"), FieldValue::StringLiteral(""));
    }
}
