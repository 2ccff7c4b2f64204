//! Quote, escape and depth aware byte scanner shared by the splitters.
//!
//! Every delimiter the scanner reacts to is ASCII, so scanning bytes of a
//! UTF-8 string never splits a multi-byte character and every reported
//! position is a valid `char` boundary.

use alloc::vec::Vec;
use core::ops::{ControlFlow, Range};

use crate::errors::{Malformation, ParseError};

/// The string literal quote.
pub(crate) const QUOTE: u8 = b'\'';
/// The escape marker inside string literals.
pub(crate) const ESCAPE: u8 = b'\\';
/// MySQL's alternative string quote, outside `ANSI_QUOTES` mode.
const DOUBLE_QUOTE: u8 = b'"';
/// The identifier quote; no escapes apply inside it.
const BACKTICK: u8 = b'`';

/// A structural byte seen outside of string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Structural {
    /// `(`, depth already incremented.
    Open,
    /// `)`, depth already decremented.
    Close,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
}

/// Where a scan splits its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// One segment per top-level parenthesis pair, parentheses excluded.
    Tuple,
    /// One segment per top-level comma separated item.
    Comma,
}

#[derive(Debug, Default)]
pub(crate) struct Scanner {
    depth: usize,
    /// The quote byte of the open literal or identifier, if any.
    open_quote: Option<u8>,
    escape_pending: bool,
    string_start: usize,
    outermost_open: usize,
    /// Whether `"` and `` ` `` open quoted runs as well as `'`.
    all_quotes: bool,
}

impl Scanner {
    /// A scanner for whole statements, where double-quoted strings and
    /// back-tick identifiers hide structure too.
    pub(crate) fn statement() -> Self {
        Self {
            all_quotes: true,
            ..Self::default()
        }
    }

    /// Current parenthesis depth, after the last fed byte.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Advance the state machine by one byte.
    pub(crate) fn feed(&mut self, pos: usize, byte: u8) -> Result<Option<Structural>, ParseError> {
        if self.escape_pending {
            self.escape_pending = false;
            return Ok(None);
        }

        if let Some(quote) = self.open_quote {
            if byte == ESCAPE && quote != BACKTICK {
                self.escape_pending = true;
            } else if byte == quote {
                self.open_quote = None;
            }
            return Ok(None);
        }

        let structural = match byte {
            QUOTE | DOUBLE_QUOTE | BACKTICK if byte == QUOTE || self.all_quotes => {
                self.open_quote = Some(byte);
                self.string_start = pos;
                return Ok(None);
            }
            b'(' => {
                if self.depth == 0 {
                    self.outermost_open = pos;
                }
                self.depth += 1;
                Structural::Open
            }
            b')' => {
                if self.depth == 0 {
                    return Err(ParseError::MalformedInput {
                        reason: Malformation::UnmatchedParenthesis,
                        pos,
                    });
                }
                self.depth -= 1;
                Structural::Close
            }
            b',' => Structural::Comma,
            b';' => Structural::Semicolon,
            _ => return Ok(None),
        };

        Ok(Some(structural))
    }

    /// Check the state at end of input.
    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        if let Some(quote) = self.open_quote {
            let reason = if quote == BACKTICK {
                Malformation::UnterminatedIdentifier
            } else {
                Malformation::UnterminatedString
            };
            return Err(ParseError::MalformedInput {
                reason,
                pos: self.string_start,
            });
        }
        if self.depth > 0 {
            return Err(ParseError::MalformedInput {
                reason: Malformation::UnclosedParenthesis,
                pos: self.outermost_open,
            });
        }
        Ok(())
    }
}

/// Scan `input`, handing every structural byte and the resulting depth to `visit`.
///
/// Returns `Ok(Some(pos))` when `visit` breaks at `pos`, and `Ok(None)` once
/// the whole input was scanned and found balanced.
pub(crate) fn scan<F>(
    mut scanner: Scanner,
    input: &str,
    mut visit: F,
) -> Result<Option<usize>, ParseError>
where
    F: FnMut(usize, Structural, usize) -> ControlFlow<()>,
{
    for (pos, &byte) in input.as_bytes().iter().enumerate() {
        if let Some(structural) = scanner.feed(pos, byte)? {
            if visit(pos, structural, scanner.depth()).is_break() {
                return Ok(Some(pos));
            }
        }
    }
    scanner.finish()?;
    Ok(None)
}

/// Split `input` into byte ranges according to `boundary`.
pub(crate) fn segments(input: &str, boundary: Boundary) -> Result<Vec<Range<usize>>, ParseError> {
    let mut ranges = Vec::new();
    let mut start = 0;

    scan(Scanner::default(), input, |pos, structural, depth| {
        match (boundary, structural, depth) {
            (Boundary::Tuple, Structural::Open, 1) => start = pos + 1,
            (Boundary::Tuple, Structural::Close, 0) => ranges.push(start..pos),
            (Boundary::Comma, Structural::Comma, 0) => {
                ranges.push(start..pos);
                start = pos + 1;
            }
            _ => {}
        }
        ControlFlow::Continue(())
    })?;

    if boundary == Boundary::Comma {
        ranges.push(start..input.len());
    }
    Ok(ranges)
}

/// Position of the first top-level `;` outside string literals.
///
/// Returns `Ok(None)` when the input has no terminator but is balanced.
pub(crate) fn statement_end(input: &str) -> Result<Option<usize>, ParseError> {
    first_semicolon(Scanner::default(), input)
}

/// Like [`statement_end`], also stepping over double-quoted strings and
/// back-tick identifiers, for statements other than a tuple list.
pub(crate) fn skip_statement(input: &str) -> Result<Option<usize>, ParseError> {
    first_semicolon(Scanner::statement(), input)
}

fn first_semicolon(scanner: Scanner, input: &str) -> Result<Option<usize>, ParseError> {
    scan(scanner, input, |_, structural, depth| {
        if structural == Structural::Semicolon && depth == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
}
