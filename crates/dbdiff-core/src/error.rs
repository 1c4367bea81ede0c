//! Crate-wide error type.

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::schema::SchemaError;

/// Any error produced while turning DDL text into a schema model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The script could not be tokenized.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// A `CREATE TABLE` statement is malformed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The parsed definitions violate a schema model invariant.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Result type for schema loading.
pub type Result<T> = std::result::Result<T, Error>;
