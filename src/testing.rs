//! Testing utilities for round-trip and robustness checks of the splitters.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`FuzzValue`]: an arbitrary column value with a known SQL rendering
//! - [`format_tuple_list`]: render rows of [`FuzzValue`] as a MySQL tuple list
//! - [`test_split_roundtrip`]: split a rendered tuple list and check every value comes back
//! - [`test_arbitrary_input`]: feed arbitrary text through every entry point without panicking

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::escape::{EscapePolicy, escape_mysql};
use crate::fields::{FieldValue, split_fields};
use crate::rows::split_rows;
use crate::statement::locate_inserts;

/// A column value with a known MySQL rendering.
#[derive(Debug, Clone, PartialEq, Eq, arbitrary::Arbitrary)]
pub enum FuzzValue {
    /// The `NULL` keyword.
    Null,
    /// An integer literal.
    Integer(i64),
    /// A string literal, escaped with [`escape_mysql`].
    Text(String),
    /// A function call with nested parentheses, `POINT(x, y)`.
    Point(i32, i32),
}

impl FuzzValue {
    /// Render the value as MySQL source text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            FuzzValue::Null => "NULL".into(),
            FuzzValue::Integer(v) => v.to_string(),
            FuzzValue::Text(text) => format!("'{}'", escape_mysql(text)),
            FuzzValue::Point(x, y) => format!("POINT({x}, {y})"),
        }
    }

    /// Whether `field` is what splitting [`Self::to_sql`] should yield.
    #[must_use]
    pub fn matches(&self, field: &FieldValue<'_>) -> bool {
        match (self, field) {
            (FuzzValue::Null, FieldValue::NullLiteral) => true,
            (FuzzValue::Integer(v), FieldValue::BareToken(_)) => field.as_i64() == Some(*v),
            (FuzzValue::Text(text), FieldValue::StringLiteral(_)) => {
                field.text(EscapePolicy::MySql).as_deref() == Some(text.as_str())
            }
            (FuzzValue::Point(..), FieldValue::BareToken(token)) => *token == self.to_sql(),
            _ => false,
        }
    }
}

/// Render rows as a tuple list, one parenthesized row per entry.
#[must_use]
pub fn format_tuple_list(rows: &[Vec<FuzzValue>]) -> String {
    rows.iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(FuzzValue::to_sql).collect();
            format!("({})", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Split the rendering of `rows` and check that every value comes back in order.
///
/// # Panics
///
/// Panics if splitting fails, a count differs, a value does not match, or a
/// row does not survive re-serialization.
pub fn test_split_roundtrip(rows: &[Vec<FuzzValue>]) {
    let text = format_tuple_list(rows);
    let spans = split_rows(&text)
        .unwrap_or_else(|err| panic!("Failed to split rows: {err}\nInput:\n{text}"));
    assert_eq!(spans.len(), rows.len(), "Row count mismatch\nInput:\n{text}");

    for (expected, span) in rows.iter().zip(&spans) {
        let row = span
            .fields()
            .unwrap_or_else(|err| panic!("Failed to split fields: {err}\nRow: {}", span.text()));
        assert_eq!(
            row.len(),
            expected.len(),
            "Field count mismatch\nRow: {}",
            span.text()
        );
        for (value, field) in expected.iter().zip(row.iter()) {
            assert!(
                value.matches(field),
                "Value mismatch: expected {value:?}, got {field:?}\nRow: {}",
                span.text()
            );
        }

        let rendered = row.to_string();
        let reparsed = split_fields(&rendered)
            .unwrap_or_else(|err| panic!("Failed to re-split {rendered}: {err}"));
        assert_eq!(reparsed, row, "Row changed after re-serialization");
    }
}

/// Feed arbitrary text through the splitters and the statement locator.
///
/// Errors are expected; panics and inconsistent spans are not.
///
/// # Panics
///
/// Panics if a span or a located statement does not point back into `input`.
pub fn test_arbitrary_input(input: &str) {
    if let Ok(spans) = split_rows(input) {
        for span in spans {
            let end = span.offset() + span.text().len();
            assert_eq!(&input[span.offset()..end], span.text());
            if let Some(pos) = span.fields().err().and_then(|err| err.position()) {
                assert!((span.offset()..=end).contains(&pos));
            }
        }
    }

    let _ = split_fields(input);

    for statement in locate_inserts(input) {
        let Ok(statement) = statement else {
            continue;
        };
        let start = statement.values_offset();
        assert_eq!(
            &input[start..start + statement.values().len()],
            statement.values()
        );
    }
}
