//! Submodule defining the errors used across the crate.

use alloc::string::String;

/// The structural defect behind a [`ParseError::MalformedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformation {
    /// The input ended inside a quoted string literal.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// The input ended with at least one parenthesis still open.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,
    /// A closing parenthesis appeared at depth zero.
    #[error("unmatched closing parenthesis")]
    UnmatchedParenthesis,
    /// A back-tick or double-quoted identifier was not closed.
    #[error("unterminated quoted identifier")]
    UnterminatedIdentifier,
}

/// Errors that can occur while splitting tuple lists and assembling records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The tuple list is not complete and well formed.
    ///
    /// The position is the byte offset of the opening quote for
    /// [`Malformation::UnterminatedString`], of the outermost unclosed
    /// parenthesis for [`Malformation::UnclosedParenthesis`], and of the
    /// offending parenthesis for [`Malformation::UnmatchedParenthesis`].
    #[error("Malformed input at position {pos}: {reason}")]
    MalformedInput {
        /// What is wrong with the input.
        reason: Malformation,
        /// Byte offset in the scanned text.
        pos: usize,
    },
    /// A row does not have one value per column.
    #[error("Expected {expected} fields, found {found}")]
    UnexpectedFieldCount {
        /// Number of declared columns.
        expected: usize,
        /// Number of fields in the row.
        found: usize,
    },
    /// The text does not start with an `INSERT` statement.
    #[error("Not an INSERT statement at position {0}")]
    NotAnInsert(usize),
    /// The INSERT statement has no `VALUES` keyword.
    #[error("Missing VALUES clause in INSERT at position {0}")]
    MissingValues(usize),
    /// Unexpected token in an INSERT header.
    #[error("Unexpected {found:?} at position {pos}, expected {expected}")]
    UnexpectedToken {
        /// What was expected.
        expected: &'static str,
        /// What was found.
        found: String,
        /// Position in input.
        pos: usize,
    },
    /// Duplicate column name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
    /// Neither the statement nor the caller provided column names.
    #[error("No column names known for table {0}")]
    MissingColumns(String),
}

impl ParseError {
    /// Returns the byte offset carried by the error, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedInput { pos, .. }
            | Self::UnexpectedToken { pos, .. }
            | Self::NotAnInsert(pos)
            | Self::MissingValues(pos) => Some(*pos),
            Self::UnexpectedFieldCount { .. }
            | Self::DuplicateColumn(_)
            | Self::MissingColumns(_) => None,
        }
    }

    /// Shifts the carried byte offset by `base`.
    ///
    /// Errors raised on a sub-slice report offsets relative to that slice;
    /// this rebases them onto the enclosing text.
    #[must_use]
    pub fn offset_by(self, base: usize) -> Self {
        match self {
            Self::MalformedInput { reason, pos } => Self::MalformedInput {
                reason,
                pos: pos + base,
            },
            Self::UnexpectedToken {
                expected,
                found,
                pos,
            } => Self::UnexpectedToken {
                expected,
                found,
                pos: pos + base,
            },
            Self::NotAnInsert(pos) => Self::NotAnInsert(pos + base),
            Self::MissingValues(pos) => Self::MissingValues(pos + base),
            other => other,
        }
    }

    /// Returns true for structural failures of the tuple list.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}
