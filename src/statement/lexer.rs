//! Lexer for the header of an INSERT statement.
//!
//! Only the part before the tuple list is tokenized; the tuple list itself is
//! left to the splitters.

use alloc::string::String;

use crate::errors::{Malformation, ParseError};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    /// The kind of token.
    pub(crate) kind: TokenKind<'a>,
    /// The position in the input where this token starts.
    pub(crate) pos: usize,
}

/// The different kinds of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Unquoted word: keyword or identifier
    Word(&'a str),
    /// Back-tick or double-quoted identifier, quotes removed
    Quoted(&'a str),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Comma
    Comma,
    /// Dot
    Dot,
    /// Semicolon
    Semicolon,
    /// Anything else
    Other(char),
    /// End of input
    Eof,
}

impl TokenKind<'_> {
    /// Whether this is the unquoted keyword `keyword`, ignoring ASCII case.
    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, TokenKind::Word(word) if word.eq_ignore_ascii_case(keyword))
    }

    /// Short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Word(word) => (*word).into(),
            TokenKind::Quoted(name) => alloc::format!("`{name}`"),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Dot => ".".into(),
            TokenKind::Semicolon => ";".into(),
            TokenKind::Other(c) => alloc::format!("{c}"),
            TokenKind::Eof => "end of input".into(),
        }
    }
}

/// Header lexer that produces tokens from input.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    peeked: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            peeked: None,
        }
    }

    /// Position right after the last consumed token.
    pub(crate) fn position(&self) -> usize {
        self.peeked.map_or(self.pos, |token| token.pos)
    }

    /// Peek at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Token<'a>, ParseError> {
        match self.peeked {
            Some(token) => Ok(token),
            None => {
                let token = self.next_token()?;
                self.peeked = Some(token);
                Ok(token)
            }
        }
    }

    /// Consume and return the next token.
    pub(crate) fn next(&mut self) -> Result<Token<'a>, ParseError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.next_token()
    }

    fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        self.pos = skip_trivia(self.input, self.pos);

        let start_pos = self.pos;
        let bytes = self.input.as_bytes();

        if self.pos >= bytes.len() {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos: start_pos,
            });
        }

        let b = bytes[self.pos];

        let kind = match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b';' => TokenKind::Semicolon,
            b'`' | b'"' => return self.read_quoted(start_pos),
            _ if is_word_byte(b) => return Ok(self.read_word(start_pos)),
            _ => {
                let c = self.input[self.pos..].chars().next().unwrap_or('\0');
                self.pos += c.len_utf8();
                return Ok(Token {
                    kind: TokenKind::Other(c),
                    pos: start_pos,
                });
            }
        };
        self.pos += 1;

        Ok(Token {
            kind,
            pos: start_pos,
        })
    }

    fn read_quoted(&mut self, start_pos: usize) -> Result<Token<'a>, ParseError> {
        let bytes = self.input.as_bytes();
        let quote = bytes[self.pos];
        let name_start = self.pos + 1;

        let Some(len) = bytes[name_start..].iter().position(|&b| b == quote) else {
            return Err(ParseError::MalformedInput {
                reason: Malformation::UnterminatedIdentifier,
                pos: start_pos,
            });
        };
        self.pos = name_start + len + 1;

        Ok(Token {
            kind: TokenKind::Quoted(&self.input[name_start..name_start + len]),
            pos: start_pos,
        })
    }

    fn read_word(&mut self, start_pos: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && is_word_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Word(&self.input[start_pos..self.pos]),
            pos: start_pos,
        }
    }
}

/// Check if a byte can be part of an unquoted identifier or keyword.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Skip whitespace and comments starting at `pos`, returning the new position.
///
/// Handles `--` and `#` line comments and `/* */` block comments, which
/// includes MySQL's `/*!40101 ... */` conditional comments.
pub(crate) fn skip_trivia(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
        } else if b == b'#' || (b == b'-' && bytes.get(pos + 1) == Some(&b'-')) {
            // Line comment
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
        } else if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            // Block comment
            pos += 2;
            while pos + 1 < bytes.len() && !(bytes[pos] == b'*' && bytes[pos + 1] == b'/') {
                pos += 1;
            }
            pos = (pos + 2).min(bytes.len());
        } else {
            break;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_quoted() {
        let mut lexer = Lexer::new("INSERT INTO `wp_posts` (\"ID\", post_title)");
        assert!(lexer.next().unwrap().kind.is_keyword("insert"));
        assert!(lexer.next().unwrap().kind.is_keyword("INTO"));
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Quoted("wp_posts"));
        assert_eq!(lexer.next().unwrap().kind, TokenKind::LParen);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Quoted("ID"));
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Comma);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Word("post_title"));
        assert_eq!(lexer.next().unwrap().kind, TokenKind::RParen);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek().unwrap().kind, TokenKind::Word("a"));
        assert_eq!(lexer.position(), 0);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Word("a"));
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "-- header\n# hash\n/*!40101 SET NAMES utf8 */ INSERT";
        let mut lexer = Lexer::new(input);
        let token = lexer.next().unwrap();
        assert!(token.kind.is_keyword("INSERT"));
        assert_eq!(token.pos, input.len() - "INSERT".len());
    }

    #[test]
    fn test_unterminated_identifier() {
        let mut lexer = Lexer::new("  `posts");
        assert_eq!(
            lexer.next().unwrap_err(),
            ParseError::MalformedInput {
                reason: Malformation::UnterminatedIdentifier,
                pos: 2,
            }
        );
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(skip_trivia("/* open", 0), 7);
    }
}
