//! Locating INSERT statements in a SQL dump.
//!
//! Only the statement header is parsed:
//!
//! ```text
//! INSERT [LOW_PRIORITY | DELAYED | HIGH_PRIORITY] [IGNORE] [INTO]
//!     [schema.]table [(column, ...)] VALUES <tuple list> ;
//! ```
//!
//! The tuple list is kept as text and handed to [`split_rows`](crate::split_rows).

mod lexer;

use alloc::vec::Vec;

use crate::errors::ParseError;
use crate::record::Columns;
use crate::scanner::{skip_statement, statement_end};

use lexer::{Lexer, TokenKind, skip_trivia};

const MODIFIERS: [&str; 4] = ["LOW_PRIORITY", "DELAYED", "HIGH_PRIORITY", "IGNORE"];

/// One `INSERT ... VALUES ...;` statement, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement<'a> {
    schema: Option<&'a str>,
    table: &'a str,
    columns: Option<Columns>,
    values: &'a str,
    offset: usize,
    values_offset: usize,
}

impl<'a> InsertStatement<'a> {
    /// Parse the INSERT statement at the start of `text`.
    ///
    /// Leading whitespace and comments are skipped. The tuple list runs to the
    /// first `;` outside string literals and parentheses, or to the end of
    /// `text` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotAnInsert`] when `text` does not start with
    /// `INSERT`, [`ParseError::MissingValues`] when no `VALUES` keyword
    /// follows the table, [`ParseError::UnexpectedToken`] for a malformed
    /// table name or column list, [`ParseError::DuplicateColumn`] for a
    /// repeated column and [`ParseError::MalformedInput`] when the tuple list
    /// is unterminated.
    pub fn parse(text: &'a str) -> Result<Self, ParseError> {
        Self::parse_prefix(text).map(|(statement, _)| statement)
    }

    /// Parse one statement, returning it with the number of bytes consumed,
    /// terminator included.
    fn parse_prefix(text: &'a str) -> Result<(Self, usize), ParseError> {
        let mut lexer = Lexer::new(text);

        let verb = lexer.next()?;
        if !verb.kind.is_keyword("INSERT") {
            return Err(ParseError::NotAnInsert(verb.pos));
        }
        while MODIFIERS
            .iter()
            .any(|modifier| lexer.peek().is_ok_and(|t| t.kind.is_keyword(modifier)))
        {
            lexer.next()?;
        }
        if lexer.peek()?.kind.is_keyword("INTO") {
            lexer.next()?;
        }

        let (schema, table) = parse_table_name(&mut lexer)?;

        let columns = if lexer.peek()?.kind == TokenKind::LParen {
            lexer.next()?;
            Some(parse_column_list(&mut lexer)?)
        } else {
            None
        };

        let keyword = lexer.next()?;
        if !(keyword.kind.is_keyword("VALUES") || keyword.kind.is_keyword("VALUE")) {
            return Err(ParseError::MissingValues(keyword.pos));
        }

        let rest_start = lexer.position();
        let rest = &text[rest_start..];
        let (raw_values, consumed) = match statement_end(rest).map_err(|e| e.offset_by(rest_start))? {
            Some(end) => (&rest[..end], rest_start + end + 1),
            None => (rest, text.len()),
        };

        let trimmed = raw_values.trim_start();
        let values_offset = rest_start + (raw_values.len() - trimmed.len());
        let values = trimmed.trim_end();

        Ok((
            Self {
                schema,
                table,
                columns,
                values,
                offset: verb.pos,
                values_offset,
            },
            consumed,
        ))
    }

    /// The schema qualifier, if the table name had one.
    #[must_use]
    pub fn schema(&self) -> Option<&'a str> {
        self.schema
    }

    /// The table name, without quotes.
    #[must_use]
    pub fn table(&self) -> &'a str {
        self.table
    }

    /// The explicit column list, if the statement declares one.
    #[must_use]
    pub fn columns(&self) -> Option<&Columns> {
        self.columns.as_ref()
    }

    /// The tuple list text following `VALUES`, terminator excluded.
    #[must_use]
    pub fn values(&self) -> &'a str {
        self.values
    }

    /// Byte offset of the `INSERT` keyword in the scanned text.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte offset of [`Self::values`] in the scanned text.
    #[must_use]
    pub fn values_offset(&self) -> usize {
        self.values_offset
    }

    fn rebase(mut self, base: usize) -> Self {
        self.offset += base;
        self.values_offset += base;
        self
    }
}

fn parse_table_name<'a>(lexer: &mut Lexer<'a>) -> Result<(Option<&'a str>, &'a str), ParseError> {
    let first = expect_name(lexer, "table name")?;
    if lexer.peek()?.kind == TokenKind::Dot {
        lexer.next()?;
        let table = expect_name(lexer, "table name after schema")?;
        return Ok((Some(first), table));
    }
    Ok((None, first))
}

fn parse_column_list(lexer: &mut Lexer<'_>) -> Result<Columns, ParseError> {
    let mut names = Vec::new();
    loop {
        names.push(expect_name(lexer, "column name")?);
        let token = lexer.next()?;
        match token.kind {
            TokenKind::Comma => {}
            TokenKind::RParen => break,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "`,` or `)` in column list",
                    found: other.describe(),
                    pos: token.pos,
                });
            }
        }
    }
    Columns::new(names)
}

fn expect_name<'a>(lexer: &mut Lexer<'a>, expected: &'static str) -> Result<&'a str, ParseError> {
    let token = lexer.next()?;
    match token.kind {
        TokenKind::Word(name) | TokenKind::Quoted(name) => Ok(name),
        other => Err(ParseError::UnexpectedToken {
            expected,
            found: other.describe(),
            pos: token.pos,
        }),
    }
}

/// Iterator over the INSERT statements of a dump, in source order.
///
/// Other statements are stepped over, honoring string literals and quoted
/// identifiers so that a `;` or an apostrophe inside them does not end a
/// statement early. An INSERT whose header does not parse is yielded as an
/// error and iteration resumes after its terminating `;`. Iteration stops
/// only when the end of a broken statement cannot be found.
#[derive(Debug, Clone)]
pub struct InsertStatements<'a> {
    dump: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> InsertStatements<'a> {
    fn fail(&mut self, error: ParseError) -> Option<Result<InsertStatement<'a>, ParseError>> {
        self.done = true;
        Some(Err(error))
    }

    /// Report a broken statement starting at `self.pos` and move past it.
    fn skip_broken(
        &mut self,
        error: ParseError,
    ) -> Option<Result<InsertStatement<'a>, ParseError>> {
        let base = self.pos;
        match skip_statement(&self.dump[base..]) {
            Ok(Some(end)) => {
                self.pos += end + 1;
                tracing::warn!(offset = base, error = %error, "skipping malformed INSERT");
                Some(Err(error))
            }
            Ok(None) | Err(_) => self.fail(error),
        }
    }
}

impl<'a> Iterator for InsertStatements<'a> {
    type Item = Result<InsertStatement<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.pos = skip_trivia(self.dump, self.pos);
            let rest = &self.dump[self.pos..];
            if rest.is_empty() {
                self.done = true;
                break;
            }

            if starts_with_insert(rest) {
                let base = self.pos;
                return match InsertStatement::parse_prefix(rest) {
                    Ok((statement, consumed)) => {
                        self.pos += consumed;
                        let statement = statement.rebase(base);
                        tracing::debug!(
                            table = statement.table(),
                            offset = statement.offset(),
                            bytes = statement.values().len(),
                            "located INSERT"
                        );
                        Some(Ok(statement))
                    }
                    Err(error) => self.skip_broken(error.offset_by(base)),
                };
            }

            match skip_statement(rest) {
                Ok(Some(end)) => self.pos += end + 1,
                Ok(None) => self.done = true,
                Err(error) => {
                    let base = self.pos;
                    return self.fail(error.offset_by(base));
                }
            }
        }
        None
    }
}

impl core::iter::FusedIterator for InsertStatements<'_> {}

fn starts_with_insert(text: &str) -> bool {
    const KEYWORD: &str = "INSERT";
    text.get(..KEYWORD.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(KEYWORD))
        && !text
            .as_bytes()
            .get(KEYWORD.len())
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Iterate over every INSERT statement in `dump`.
#[must_use]
pub fn locate_inserts(dump: &str) -> InsertStatements<'_> {
    InsertStatements {
        dump,
        pos: 0,
        done: false,
    }
}

/// Iterate over the INSERT statements of `dump` that target `table`.
///
/// Table names are compared ignoring ASCII case. Errors are passed through.
pub fn locate_inserts_for<'a>(
    dump: &'a str,
    table: &'a str,
) -> impl Iterator<Item = Result<InsertStatement<'a>, ParseError>> {
    locate_inserts(dump).filter(move |statement| match statement {
        Ok(statement) => statement.table().eq_ignore_ascii_case(table),
        Err(_) => true,
    })
}
