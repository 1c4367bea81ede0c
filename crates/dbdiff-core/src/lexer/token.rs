//! Token types for the DDL lexer.

use super::Span;

/// DDL keywords the parser dispatches on.
///
/// Anything else (type names, table options, `VISIBLE`, ...) is lexed as an
/// identifier and matched by text where needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Statement heads
    Create,
    Table,
    Temporary,
    If,
    Not,
    Exists,
    Like,
    As,

    // Column options
    Null,
    Default,
    AutoIncrement,
    Unsigned,
    Signed,
    Zerofill,
    Comment,
    Collate,
    Character,
    Charset,
    Generated,
    Always,

    // Constraints
    Primary,
    Key,
    Index,
    Unique,
    Fulltext,
    Spatial,
    Constraint,
    Foreign,
    References,
    Check,
    Match,
    Using,

    // Referential actions
    On,
    Update,
    Delete,
    Cascade,
    Restrict,
    Set,
    No,
    Action,

    // Ordering
    Asc,
    Desc,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "TEMPORARY" => Some(Self::Temporary),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "LIKE" => Some(Self::Like),
            "AS" => Some(Self::As),
            "NULL" => Some(Self::Null),
            "DEFAULT" => Some(Self::Default),
            "AUTO_INCREMENT" | "AUTOINCREMENT" => Some(Self::AutoIncrement),
            "UNSIGNED" => Some(Self::Unsigned),
            "SIGNED" => Some(Self::Signed),
            "ZEROFILL" => Some(Self::Zerofill),
            "COMMENT" => Some(Self::Comment),
            "COLLATE" => Some(Self::Collate),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "INDEX" => Some(Self::Index),
            "UNIQUE" => Some(Self::Unique),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "CONSTRAINT" => Some(Self::Constraint),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "CHECK" => Some(Self::Check),
            "MATCH" => Some(Self::Match),
            "USING" => Some(Self::Using),
            "ON" => Some(Self::On),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "SET" => Some(Self::Set),
            "NO" => Some(Self::No),
            "ACTION" => Some(Self::Action),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the canonical spelling of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Like => "LIKE",
            Self::As => "AS",
            Self::Null => "NULL",
            Self::Default => "DEFAULT",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Unsigned => "UNSIGNED",
            Self::Signed => "SIGNED",
            Self::Zerofill => "ZEROFILL",
            Self::Comment => "COMMENT",
            Self::Collate => "COLLATE",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Index => "INDEX",
            Self::Unique => "UNIQUE",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Constraint => "CONSTRAINT",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Check => "CHECK",
            Self::Match => "MATCH",
            Self::Using => "USING",
            Self::On => "ON",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Set => "SET",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Returns true if the keyword opens a constraint or index clause
    /// inside a create-definition list, and so can never be a bare
    /// column name there.
    #[must_use]
    pub const fn starts_constraint(&self) -> bool {
        matches!(
            self,
            Self::Primary
                | Self::Key
                | Self::Index
                | Self::Unique
                | Self::Fulltext
                | Self::Spatial
                | Self::Constraint
                | Self::Foreign
                | Self::Check
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g., `42`, `1.50`, `2e3`).
    Number(String),
    /// String literal with quotes removed and escapes resolved.
    String(String),
    /// Hex or bit literal, kept as written (e.g., `b'0'`, `X'FF'`).
    BinaryLiteral(String),

    // Names
    /// Bare identifier.
    Identifier(String),
    /// Backtick- or double-quote-delimited identifier, quotes stripped.
    QuotedIdentifier(String),
    /// DDL keyword.
    Keyword(Keyword),

    // Punctuation
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// =
    Eq,
    /// Any other operator character (`+ - * / % < > ! | & ~ ^ : ? @`).
    Symbol(char),

    /// End of input
    Eof,
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the name carried by an identifier or quoted identifier.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => Some(name),
            _ => None,
        }
    }
}
