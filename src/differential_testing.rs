//! Differential testing: compare our splitters against SQLite's own parser.
//!
//! This module provides [`run_differential_test`], which:
//! 1. Renders rows of [`FuzzValue`] as a tuple list SQLite also accepts
//! 2. Executes `INSERT INTO t VALUES ...` in an in-memory rusqlite database
//! 3. Reads the table back in rowid order
//! 4. Splits the same tuple list with [`split_rows`] and [`split_fields`](crate::split_fields)
//! 5. Compares every decoded value with what SQLite stored
//!
//! SQLite treats backslashes literally while the splitter treats them as
//! escapes, so only backslash-free text takes part. Quotes inside text are
//! doubled, which both sides read the same way.
//!
//! This module is feature-gated behind `testing`.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rusqlite::Connection;
use rusqlite::types::Value;

use crate::escape::EscapePolicy;
use crate::fields::FieldValue;
use crate::rows::split_rows;
use crate::testing::FuzzValue;

/// Render a value the way SQLite reads it, or `None` if the dialects disagree on it.
fn sqlite_literal(value: &FuzzValue) -> Option<String> {
    match value {
        FuzzValue::Null => Some("NULL".into()),
        // SQLite reads the magnitude of i64::MIN as a real before negating it.
        FuzzValue::Integer(i64::MIN) | FuzzValue::Point(..) => None,
        FuzzValue::Integer(v) => Some(v.to_string()),
        FuzzValue::Text(text) if text.contains(['\\', '\0']) => None,
        FuzzValue::Text(text) => Some(format!("'{}'", text.replace('\'', "''"))),
    }
}

/// Convert a split field into the value SQLite would store for it.
fn field_to_value(field: &FieldValue<'_>) -> Option<Value> {
    match field {
        FieldValue::NullLiteral => Some(Value::Null),
        FieldValue::BareToken(_) => field.as_i64().map(Value::Integer),
        FieldValue::StringLiteral(_) => field
            .text(EscapePolicy::MySql)
            .map(|text| Value::Text(text.into_owned())),
    }
}

/// Read every row of `t` in insertion order.
fn read_back(conn: &Connection, width: usize) -> rusqlite::Result<Vec<Vec<Value>>> {
    let mut stmt = conn.prepare("SELECT * FROM t ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        (0..width)
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()
    })?;
    rows.collect()
}

/// Run a differential test comparing our splitters against SQLite.
///
/// This function is designed to be called from both the honggfuzz harness and
/// from regression tests. It will:
/// - Return silently for input the two dialects read differently
/// - Panic on real bugs (a value or count mismatch)
///
/// # Panics
///
/// Panics if SQLite accepts the tuple list and our splitters disagree with it.
pub fn run_differential_test(rows: &[Vec<FuzzValue>]) {
    let Some(width) = rows.first().map(Vec::len) else {
        return;
    };
    if width == 0 || rows.iter().any(|row| row.len() != width) {
        return;
    }

    let Some(rendered) = rows
        .iter()
        .map(|row| {
            let values = row.iter().map(sqlite_literal).collect::<Option<Vec<_>>>()?;
            Some(format!("({})", values.join(", ")))
        })
        .collect::<Option<Vec<_>>>()
    else {
        return;
    };
    let values_text = rendered.join(",");

    let Ok(conn) = Connection::open_in_memory() else {
        return;
    };
    let columns: Vec<String> = (0..width).map(|i| format!("c{i}")).collect();
    let create = format!("CREATE TABLE t ({})", columns.join(", "));
    let insert = format!("INSERT INTO t VALUES {values_text}");
    if conn.execute_batch(&create).is_err() || conn.execute_batch(&insert).is_err() {
        return;
    }
    let expected = read_back(&conn, width)
        .unwrap_or_else(|err| panic!("Failed to read back inserted rows: {err}"));

    let spans = split_rows(&values_text)
        .unwrap_or_else(|err| panic!("SQLite accepted input we rejected: {err}\n{values_text}"));
    assert_eq!(
        spans.len(),
        expected.len(),
        "Row count mismatch\nInput: {values_text}"
    );

    for (span, sqlite_row) in spans.iter().zip(&expected) {
        let row = span
            .fields()
            .unwrap_or_else(|err| panic!("Failed to split fields: {err}\nRow: {}", span.text()));
        let ours: Vec<Option<Value>> = row.iter().map(field_to_value).collect();
        let theirs: Vec<Option<Value>> = sqlite_row.iter().cloned().map(Some).collect();
        assert_eq!(
            ours,
            theirs,
            "Value mismatch\nRow: {}\nInput: {values_text}",
            span.text()
        );
    }
}
