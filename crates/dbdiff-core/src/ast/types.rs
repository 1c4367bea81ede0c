//! Column-level AST nodes: data types, column options and literals.

use std::fmt;

use crate::lexer::{quote_string, Span};

/// Arguments written in parentheses after a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgs {
    /// No parenthesized arguments.
    None,
    /// A single numeric argument: length, or precision for numerics.
    Length(u32),
    /// Two numeric arguments: precision and scale.
    PrecisionScale(u32, u32),
    /// A list of string literals, as used by `ENUM` and `SET`, in
    /// declaration order with quotes stripped.
    Values(Vec<String>),
}

/// A data type as written in a column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeSpec {
    /// Type name as written, e.g. `VARCHAR` or `double precision`.
    pub name: String,
    /// Parenthesized arguments.
    pub args: TypeArgs,
}

impl DataTypeSpec {
    /// Creates a type spec without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: TypeArgs::None,
        }
    }

    /// Sets the parenthesized arguments.
    #[must_use]
    pub fn with_args(mut self, args: TypeArgs) -> Self {
        self.args = args;
        self
    }
}

impl fmt::Display for DataTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.args {
            TypeArgs::None => Ok(()),
            TypeArgs::Length(n) => write!(f, "({n})"),
            TypeArgs::PrecisionScale(p, s) => write!(f, "({p},{s})"),
            TypeArgs::Values(values) => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| quote_string(v))
                    .collect();
                write!(f, "({})", quoted.join(","))
            }
        }
    }
}

/// A literal value in `DEFAULT` or `ON UPDATE` position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `NULL`.
    Null,
    /// Unquoted numeric literal, kept as written (sign included).
    Number(String),
    /// Quoted string literal with quotes stripped.
    String(String),
    /// Anything else, kept verbatim: `CURRENT_TIMESTAMP`, `now()`,
    /// `b'0'`, `(uuid())`.
    Expression(String),
}

/// An option following the data type in a column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOption {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
    /// `UNSIGNED`
    Unsigned,
    /// `ZEROFILL`
    Zerofill,
    /// `DEFAULT <literal>`
    Default(Literal),
    /// `AUTO_INCREMENT`
    AutoIncrement,
    /// `COMMENT '<text>'`
    Comment(String),
    /// `COLLATE <name>`
    Collate(String),
    /// `CHARACTER SET <name>` or `CHARSET <name>`
    CharacterSet(String),
    /// `ON UPDATE <literal>`
    OnUpdate(Literal),
    /// `PRIMARY KEY`, or a bare `KEY`
    PrimaryKey,
    /// `UNIQUE [KEY]`
    Unique,
    /// `[GENERATED ALWAYS] AS (<expr>) [VIRTUAL | STORED]`
    Generated(String),
}

/// A column definition inside `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared data type.
    pub data_type: DataTypeSpec,
    /// Options in declaration order.
    pub options: Vec<ColumnOption>,
    /// Location of the whole definition.
    pub span: Span,
}

impl ColumnDef {
    /// Returns true if any option matches `predicate`.
    pub fn has_option(&self, predicate: impl Fn(&ColumnOption) -> bool) -> bool {
        self.options.iter().any(predicate)
    }
}
