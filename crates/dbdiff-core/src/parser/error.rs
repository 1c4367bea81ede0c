//! Parser error types.

use std::fmt;

use crate::lexer::{Span, TokenKind};

/// Longest fragment quoted back in an error message.
const MAX_FRAGMENT_CHARS: usize = 80;

/// A malformed statement or create-definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Zero-based index of the statement in the script.
    pub statement: usize,
    /// The offending source fragment, whitespace collapsed.
    pub fragment: String,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            statement: 0,
            fragment: String::new(),
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected token: expected {expected}, found {found:?}"),
            expected: Some(expected),
            found: Some(found),
            ..Self::new("", span)
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected end of statement: expected {expected}"),
            expected: Some(expected),
            found: Some(TokenKind::Eof),
            ..Self::new("", span)
        }
    }

    /// Attaches the offending create-definition text.
    #[must_use]
    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.fragment = excerpt(fragment);
        self
    }

    /// Records which statement failed. When no fragment was attached yet,
    /// the statement text up to the error is used.
    #[must_use]
    pub fn in_statement(mut self, index: usize, source: &str, statement_start: usize) -> Self {
        self.statement = index;
        if self.fragment.is_empty() {
            let end = self.span.end.max(statement_start);
            self.fragment = excerpt(Span::new(statement_start, end).text(source));
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in statement {}", self.message, self.statement)?;
        if !self.fragment.is_empty() {
            write!(f, " near `{}`", self.fragment)?;
        }
        write!(f, " at position {}..{}", self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_FRAGMENT_CHARS {
        return collapsed;
    }
    let mut short: String = collapsed.chars().take(MAX_FRAGMENT_CHARS).collect();
    short.push_str("...");
    short
}
