//! Lexer error type.

/// A failure to split the source into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A `'...'` string literal is never closed.
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A `` `...` `` or `"..."` identifier is never closed.
    #[error("unterminated quoted identifier starting at byte {offset}")]
    UnterminatedIdentifier {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A `/* ... */` comment is never closed.
    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of the `/*`.
        offset: usize,
    },

    /// A character that cannot start any token.
    #[error("invalid character {ch:?} at byte {offset}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character.
        offset: usize,
    },
}

impl LexError {
    /// Returns the byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnterminatedString { offset }
            | Self::UnterminatedIdentifier { offset }
            | Self::UnterminatedComment { offset }
            | Self::InvalidCharacter { offset, .. } => *offset,
        }
    }
}
