//! Caller-selected parsing options.

use crate::escape::EscapePolicy;

/// Default number of bytes shown on each side of a failure position.
pub const DEFAULT_CONTEXT_WIDTH: usize = 40;

/// Options for record extraction.
///
/// The splitters themselves take no options; these only affect how records
/// read their text and how failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// How escape sequences in string literals are decoded when read.
    pub escape_policy: EscapePolicy,
    /// Bytes of source text kept on each side of a failure position.
    pub context_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            escape_policy: EscapePolicy::default(),
            context_width: DEFAULT_CONTEXT_WIDTH,
        }
    }
}

impl ParseOptions {
    /// Set the escape policy.
    #[must_use]
    pub fn escape_policy(mut self, escape_policy: EscapePolicy) -> Self {
        self.escape_policy = escape_policy;
        self
    }

    /// Set the context width used in skipped-row reports.
    #[must_use]
    pub fn context_width(mut self, context_width: usize) -> Self {
        self.context_width = context_width;
        self
    }
}
