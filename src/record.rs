//! Record assembly: rows projected onto named columns.
//!
//! This is the glue between the splitters and a caller that thinks in column
//! names. A row that cannot be split or does not fit the column list is
//! reported in [`Extraction::skipped`] and the remaining rows carry on.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::DefaultHashBuilder;
use indexmap::{IndexMap, IndexSet};

use crate::errors::ParseError;
use crate::escape::EscapePolicy;
use crate::fields::{FieldValue, Row};
use crate::options::ParseOptions;
use crate::rows::{RowSpan, split_rows};
use crate::statement::InsertStatement;

/// An ordered list of distinct column names.
#[derive(Debug, Clone)]
pub struct Columns {
    names: IndexSet<String, DefaultHashBuilder>,
}

impl PartialEq for Columns {
    fn eq(&self, other: &Self) -> bool {
        self.names.iter().eq(other.names.iter())
    }
}

impl Eq for Columns {}

impl Columns {
    /// Build a column list, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateColumn`] if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::with_hasher(DefaultHashBuilder::default());
        for name in names {
            let name = name.into();
            if set.contains(&name) {
                return Err(ParseError::DuplicateColumn(name));
            }
            set.insert(name);
        }
        Ok(Self { names: set })
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Position of `name` in the list.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Project `row` onto these columns.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedFieldCount`] unless the row has exactly
    /// one value per column.
    pub fn assemble<'a>(
        &'a self,
        row: Row<'a>,
        policy: EscapePolicy,
    ) -> Result<Record<'a>, ParseError> {
        if row.len() != self.len() {
            return Err(ParseError::UnexpectedFieldCount {
                expected: self.len(),
                found: row.len(),
            });
        }

        let mut values =
            IndexMap::with_capacity_and_hasher(self.len(), DefaultHashBuilder::default());
        for (name, value) in self.names.iter().zip(row) {
            values.insert(name.as_str(), value);
        }
        Ok(Record { values, policy })
    }
}

/// A row keyed by column name, in column order.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    values: IndexMap<&'a str, FieldValue<'a>, DefaultHashBuilder>,
    policy: EscapePolicy,
}

impl<'a> Record<'a> {
    /// The value of `column`, if the column exists.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FieldValue<'a>> {
        self.values.get(column)
    }

    /// The decoded text of `column`.
    ///
    /// `None` when the column is missing or `NULL`.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<Cow<'a, str>> {
        self.get(column)?.text(self.policy)
    }

    /// Whether `column` exists and holds `NULL`.
    #[must_use]
    pub fn is_null(&self, column: &str) -> bool {
        self.get(column).is_some_and(FieldValue::is_null)
    }

    /// Whether the decoded text of `column` equals `expected`.
    ///
    /// Bare tokens compare by their text too, so `post` and `'post'` both
    /// match `"post"`. Use [`Self::matches_string`] to require a literal.
    #[must_use]
    pub fn matches(&self, column: &str, expected: &str) -> bool {
        self.text(column).is_some_and(|text| text == expected)
    }

    /// Whether `column` holds a string literal whose decoded text equals `expected`.
    #[must_use]
    pub fn matches_string(&self, column: &str, expected: &str) -> bool {
        matches!(
            self.get(column),
            Some(value @ FieldValue::StringLiteral(_))
                if value.text(self.policy).is_some_and(|text| text == expected)
        )
    }

    /// Column names and values, in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &FieldValue<'a>)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The escape policy used by [`Self::text`].
    #[must_use]
    pub fn policy(&self) -> EscapePolicy {
        self.policy
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy && self.values.iter().eq(other.values.iter())
    }
}

/// A row that was left out of an [`Extraction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based index of the row in the tuple list.
    pub index: usize,
    /// Byte offset of the failure in the values text.
    pub offset: usize,
    /// Why the row was skipped.
    pub error: ParseError,
    /// Source text around [`Self::offset`].
    pub context: String,
}

/// The records of one tuple list, plus the rows that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct Extraction<'a> {
    /// Assembled records, in source order.
    pub records: Vec<Record<'a>>,
    /// Rows that failed field splitting or assembly, in source order.
    pub skipped: Vec<SkippedRow>,
}

impl<'a> Extraction<'a> {
    /// Number of rows seen, assembled or skipped.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Whether every row was assembled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of records per decoded value of `column`, in order of first appearance.
    ///
    /// `NULL` values and records without the column are counted under `None`.
    #[must_use]
    pub fn count_by(
        &self,
        column: &str,
    ) -> IndexMap<Option<Cow<'a, str>>, usize, DefaultHashBuilder> {
        let mut counts = IndexMap::with_hasher(DefaultHashBuilder::default());
        for record in &self.records {
            *counts.entry(record.text(column)).or_insert(0) += 1;
        }
        counts
    }

    /// Keep only the records that satisfy `predicate`.
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Record<'a>) -> bool,
    {
        self.records.retain(predicate);
    }
}

/// Split `values_text` into rows and assemble one record per row.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] when the tuple list as a whole
/// cannot be split into rows. Failures of individual rows end up in
/// [`Extraction::skipped`].
pub fn extract<'a>(
    values_text: &'a str,
    columns: &'a Columns,
    options: &ParseOptions,
) -> Result<Extraction<'a>, ParseError> {
    let spans = split_rows(values_text)?;
    let rows = spans.into_iter().map(|span| (span, span.fields()));
    Ok(collect_records(values_text, columns, options, rows))
}

/// Extract the records of a located INSERT statement.
///
/// Uses the statement's own column list, or `fallback` when the statement
/// has none. Offsets are relative to [`InsertStatement::values`].
///
/// # Errors
///
/// Returns [`ParseError::MissingColumns`] when no column list is available,
/// and otherwise fails like [`extract`].
pub fn extract_statement<'a>(
    statement: &'a InsertStatement<'a>,
    fallback: Option<&'a Columns>,
    options: &ParseOptions,
) -> Result<Extraction<'a>, ParseError> {
    let columns = statement
        .columns()
        .or(fallback)
        .ok_or_else(|| ParseError::MissingColumns(statement.table().into()))?;
    extract(statement.values(), columns, options)
}

/// Assemble already split rows, recording failures instead of stopping.
pub(crate) fn collect_records<'a, I>(
    values_text: &str,
    columns: &'a Columns,
    options: &ParseOptions,
    rows: I,
) -> Extraction<'a>
where
    I: IntoIterator<Item = (RowSpan<'a>, Result<Row<'a>, ParseError>)>,
{
    let mut extraction = Extraction::default();

    for (index, (span, fields)) in rows.into_iter().enumerate() {
        match fields.and_then(|row| columns.assemble(row, options.escape_policy)) {
            Ok(record) => extraction.records.push(record),
            Err(error) => {
                let offset = error.position().unwrap_or(span.offset());
                let context = context_snippet(values_text, offset, options.context_width);
                tracing::warn!(
                    row = index,
                    offset,
                    error = %error,
                    context = %context,
                    "skipping row"
                );
                extraction.skipped.push(SkippedRow {
                    index,
                    offset,
                    error,
                    context,
                });
            }
        }
    }

    tracing::debug!(
        records = extraction.records.len(),
        skipped = extraction.skipped.len(),
        "assembled records"
    );
    extraction
}

/// Up to `width` bytes of `text` on each side of `pos`, widened to char boundaries.
pub(crate) fn context_snippet(text: &str, pos: usize, width: usize) -> String {
    let pos = pos.min(text.len());
    let mut start = pos.saturating_sub(width);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = pos.saturating_add(width).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].into()
}
