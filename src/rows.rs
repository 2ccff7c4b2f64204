//! Tuple splitter: the `VALUES` text of an INSERT into one span per row.

use alloc::vec::Vec;

use crate::errors::ParseError;
use crate::fields::{Row, split_fields};
use crate::scanner::{Boundary, segments};

/// The text inside one top-level parenthesis pair of a tuple list.
///
/// Quotes and parentheses inside the span are balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowSpan<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> RowSpan<'a> {
    /// The row text, without the enclosing parentheses.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of [`Self::text`] in the scanned values text.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Split this row into its field values.
    ///
    /// # Errors
    ///
    /// Same as [`split_fields`], with positions relative to the values text
    /// this span was cut from.
    pub fn fields(&self) -> Result<Row<'a>, ParseError> {
        split_fields(self.text).map_err(|err| err.offset_by(self.offset))
    }
}

/// Split the text following `VALUES` into row spans, in source order.
///
/// Text between rows (separating commas, whitespace, a trailing `;`) is
/// ignored. Empty input yields no rows.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] when the input ends inside a string
/// literal or with a parenthesis still open, or when a parenthesis closes at
/// depth zero.
pub fn split_rows(values_text: &str) -> Result<Vec<RowSpan<'_>>, ParseError> {
    let rows: Vec<RowSpan<'_>> = segments(values_text, Boundary::Tuple)?
        .into_iter()
        .map(|range| RowSpan {
            offset: range.start,
            text: &values_text[range],
        })
        .collect();
    tracing::trace!(rows = rows.len(), bytes = values_text.len(), "split tuple list");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Malformation;
    use crate::fields::FieldValue;

    #[test]
    fn test_two_rows_in_order() {
        let rows = split_rows("(1, 'a'), (2, 'b')").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), "1, 'a'");
        assert_eq!(rows[1].text(), "2, 'b'");
        assert_eq!(rows[0].offset(), 1);
        assert_eq!(rows[1].offset(), 11);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_rows("").unwrap().is_empty());
        assert!(split_rows("  ;").unwrap().is_empty());
    }

    #[test]
    fn test_parenthesis_inside_string() {
        let rows = split_rows("(1, '(see note)'), (2, 'x) (y')").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), "1, '(see note)'");
        assert_eq!(rows[1].text(), "2, 'x) (y'");
    }

    #[test]
    fn test_escaped_quote_before_closing_parenthesis() {
        let rows = split_rows(r"(1, 'it\'s'), (2, 'a\\')").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), r"1, 'it\'s'");
        assert_eq!(rows[1].text(), r"2, 'a\\'");
    }

    #[test]
    fn test_nested_parentheses_are_row_content() {
        let rows = split_rows("(1, POINT(0, 0)), (2, NULL)").unwrap();
        assert_eq!(rows[0].text(), "1, POINT(0, 0)");
    }

    #[test]
    fn test_truncated_input_fails() {
        let err = split_rows("(1, 'unterminated").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedInput {
                reason: Malformation::UnterminatedString,
                pos: 4,
            }
        );
    }

    #[test]
    fn test_missing_close_fails() {
        let err = split_rows("(1, 2), (3, 4").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedInput {
                reason: Malformation::UnclosedParenthesis,
                pos: 8,
            }
        );
    }

    #[test]
    fn test_row_fields() {
        let rows = split_rows("(7, 'x', NULL)").unwrap();
        let row = rows[0].fields().unwrap();
        assert_eq!(
            &row[..],
            &[
                FieldValue::BareToken("7"),
                FieldValue::StringLiteral("x"),
                FieldValue::NullLiteral,
            ]
        );
    }

    #[test]
    fn test_row_field_errors_are_rebased() {
        // The span itself is balanced; the stray parenthesis only shows up
        // when the row is split into fields.
        let span = RowSpan {
            text: "1, 2)",
            offset: 20,
        };
        assert_eq!(span.fields().unwrap_err().position(), Some(24));
    }
}
