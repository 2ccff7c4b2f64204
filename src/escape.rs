//! Escape sequence normalization for string literal text.
//!
//! The splitters never touch the interior of a string literal: whether
//! `\\` means one backslash or two is left to the caller, who picks an
//! [`EscapePolicy`] when reading the text back.

use alloc::borrow::Cow;
use alloc::string::String;

/// How backslash sequences inside string literals are interpreted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
pub enum EscapePolicy {
    /// Keep the text exactly as written between the quotes.
    #[default]
    Preserve,
    /// Collapse `\\` into `\` and leave every other sequence untouched.
    Backslashes,
    /// Decode the MySQL string literal escape table, including `''` for `'`.
    MySql,
}

/// Decode `text` according to `policy`.
///
/// Borrows the input when no sequence needs decoding.
#[must_use]
pub fn unescape(text: &str, policy: EscapePolicy) -> Cow<'_, str> {
    let needs_work = match policy {
        EscapePolicy::Preserve => false,
        EscapePolicy::Backslashes => text.contains("\\\\"),
        EscapePolicy::MySql => text.contains('\\') || text.contains("''"),
    };
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match (policy, c) {
            (EscapePolicy::Backslashes, '\\') => {
                out.push('\\');
                if chars.peek() == Some(&'\\') {
                    chars.next();
                }
            }
            (EscapePolicy::MySql, '\\') => match chars.next() {
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('Z') => out.push('\u{1A}'),
                // LIKE wildcards keep their backslash.
                Some(wildcard @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(wildcard);
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            (EscapePolicy::MySql, '\'') => {
                out.push('\'');
                if chars.peek() == Some(&'\'') {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape `text` so that it can be written inside a MySQL single-quoted literal.
///
/// This is the inverse of [`unescape`] with [`EscapePolicy::MySql`].
#[must_use]
pub fn escape_mysql(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\'', '"', '\0', '\n', '\r', '\u{1A}']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1A}' => out.push_str("\\Z"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_borrows() {
        let text = r"C:\\path\'s";
        assert!(matches!(
            unescape(text, EscapePolicy::Preserve),
            Cow::Borrowed(t) if t == text
        ));
    }

    #[test]
    fn test_backslashes_only_collapses_double_backslash() {
        assert_eq!(
            unescape(r"C:\\dir\\it\'s", EscapePolicy::Backslashes),
            r"C:\dir\it\'s"
        );
        assert!(matches!(
            unescape(r"it\'s", EscapePolicy::Backslashes),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_mysql_table() {
        assert_eq!(
            unescape(r"a\nb\tc\rd\0e\Zf", EscapePolicy::MySql),
            "a\nb\tc\rd\0e\u{1A}f"
        );
        assert_eq!(unescape(r#"it\'s \"ok\""#, EscapePolicy::MySql), "it's \"ok\"");
        assert_eq!(unescape(r"C:\\temp", EscapePolicy::MySql), r"C:\temp");
        assert_eq!(unescape("it''s", EscapePolicy::MySql), "it's");
        assert_eq!(unescape(r"50\% off\_x", EscapePolicy::MySql), r"50\% off\_x");
        assert_eq!(unescape(r"\q", EscapePolicy::MySql), "q");
    }

    #[test]
    fn test_escape_is_inverse_of_mysql_unescape() {
        let original = "line1\nit's \"quoted\" C:\\dir\0\u{1A}";
        let escaped = escape_mysql(original);
        assert_eq!(unescape(&escaped, EscapePolicy::MySql), original);
    }

    #[test]
    fn test_escape_borrows_plain_text() {
        assert!(matches!(escape_mysql("plain text"), Cow::Borrowed(_)));
    }
}
