//! DDL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for MySQL-flavoured DDL that
//! produces a stream of tokens. Comments are discarded and quoting is
//! stripped from delimited identifiers.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{quote_string, Lexer};
