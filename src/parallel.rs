//! Field splitting over the rayon thread pool.
//!
//! Row spans are independent once the tuple list has been split, so the
//! field splitter can run on them in any order. Results come back indexed
//! by row, so source order is the same as with the sequential functions.

use alloc::vec::Vec;

use rayon::prelude::*;

use crate::errors::ParseError;
use crate::fields::Row;
use crate::options::ParseOptions;
use crate::record::{Columns, Extraction, collect_records};
use crate::rows::{RowSpan, split_rows};

/// Split every row span into fields in parallel, keeping source order.
#[must_use]
pub fn split_all_fields<'a>(spans: &[RowSpan<'a>]) -> Vec<Result<Row<'a>, ParseError>> {
    spans.par_iter().map(RowSpan::fields).collect()
}

/// Parallel counterpart of [`extract`](crate::extract).
///
/// Field splitting runs on the rayon pool; record assembly and failure
/// reporting stay sequential so that skipped rows are logged in order.
///
/// # Errors
///
/// Fails like [`extract`](crate::extract).
pub fn extract_parallel<'a>(
    values_text: &'a str,
    columns: &'a Columns,
    options: &ParseOptions,
) -> Result<Extraction<'a>, ParseError> {
    let spans = split_rows(values_text)?;
    let fields = split_all_fields(&spans);
    tracing::debug!(rows = spans.len(), "split fields in parallel");
    Ok(collect_records(
        values_text,
        columns,
        options,
        spans.into_iter().zip(fields),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use alloc::format;
    use alloc::string::String;

    fn many_rows(n: usize) -> String {
        (0..n)
            .map(|i| format!("({i}, 'row {i}, (nested)', NULL)"))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_order_matches_sequential() {
        let values = many_rows(500);
        let spans = split_rows(&values).unwrap();
        let parallel = split_all_fields(&spans);
        let sequential: Vec<_> = spans.iter().map(RowSpan::fields).collect();
        assert_eq!(parallel, sequential);
        for (i, row) in parallel.into_iter().enumerate() {
            assert_eq!(row.unwrap()[0].as_i64(), Some(i64::try_from(i).unwrap()));
        }
    }

    #[test]
    fn test_extract_parallel_matches_extract() {
        let values = format!("{},(1, 2)", many_rows(100));
        let columns = Columns::new(["id", "title", "note"]).unwrap();
        let options = ParseOptions::default();

        let parallel = extract_parallel(&values, &columns, &options).unwrap();
        let sequential = extract(&values, &columns, &options).unwrap();

        assert_eq!(parallel.records, sequential.records);
        assert_eq!(parallel.skipped, sequential.skipped);
        assert_eq!(parallel.skipped.len(), 1);
        assert_eq!(parallel.skipped[0].index, 100);
    }
}
