#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

#[cfg(feature = "testing")]
pub mod differential_testing;
pub mod errors;
pub mod escape;
pub mod fields;
#[cfg(feature = "json")]
pub mod json;
pub mod options;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod record;
pub mod rows;
pub(crate) mod scanner;
#[cfg(feature = "serde")]
mod serialize;
pub mod statement;
#[cfg(feature = "testing")]
pub mod testing;

// Re-export main types
pub use errors::{Malformation, ParseError};
pub use escape::{EscapePolicy, escape_mysql, unescape};
pub use fields::{FieldValue, Row, split_fields};
pub use options::ParseOptions;
pub use record::{Columns, Extraction, Record, SkippedRow, extract, extract_statement};
pub use rows::{RowSpan, split_rows};
pub use statement::{InsertStatement, InsertStatements, locate_inserts, locate_inserts_for};
