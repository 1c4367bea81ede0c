//! Column model.

use std::fmt;

use serde::Serialize;

use crate::lexer::quote_string;

/// Semantic kind of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Exact integers of any width.
    Integer,
    /// Exact fixed-point numbers.
    Decimal,
    /// Approximate floating-point numbers.
    Float,
    /// Character strings with a length.
    String,
    /// Unbounded text.
    Text,
    /// Boolean (MySQL `TINYINT`).
    Boolean,
    /// Dates, times and timestamps.
    DateTime,
    /// Byte strings and blobs.
    Binary,
    /// `ENUM` and `SET`.
    Enumeration,
    /// Spatial types.
    Geometry,
    /// JSON documents.
    Json,
    /// A type the mapping does not know; `type_name` keeps the raw name.
    Other,
}

impl ColumnKind {
    /// Returns the lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::String => "string",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Binary => "binary",
            Self::Enumeration => "enumeration",
            Self::Geometry => "geometry",
            Self::Json => "json",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value for a column.
///
/// A `NULL` default is not represented: it is the same as no default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DefaultValue {
    /// Integer literal.
    Integer(i64),
    /// Quoted string literal, quotes stripped.
    String(String),
    /// Anything else, kept verbatim (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

/// Functions MySQL accepts as spellings of `CURRENT_TIMESTAMP`.
const TIMESTAMP_SYNONYMS: [&str; 4] = ["CURRENT_TIMESTAMP", "LOCALTIMESTAMP", "LOCALTIME", "NOW"];

impl DefaultValue {
    /// Creates an expression default in canonical form.
    ///
    /// `now()`, `current_timestamp()`, `LOCALTIMESTAMP` and friends all
    /// become `CURRENT_TIMESTAMP`, keeping a non-zero fractional precision
    /// as `CURRENT_TIMESTAMP(6)`. Other expressions are kept verbatim.
    #[must_use]
    pub fn expression(text: &str) -> Self {
        let text = text.trim();
        Self::Expression(current_timestamp(text).unwrap_or_else(|| text.to_string()))
    }

    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Integer(i) => i.to_string(),
            Self::String(s) => quote_string(s),
            Self::Expression(expr) => expr.clone(),
        }
    }

    /// Returns the value as text, without quoting. Defaults are compared
    /// by this text, so `0` and `'0'` are the same default.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Integer(i) => i.to_string(),
            Self::String(s) | Self::Expression(s) => s.clone(),
        }
    }
}

fn current_timestamp(text: &str) -> Option<String> {
    let upper = text.to_ascii_uppercase();
    let rest = TIMESTAMP_SYNONYMS
        .iter()
        .find_map(|name| upper.strip_prefix(name).map(str::trim_start))?;
    if rest.is_empty() {
        // `NOW` is only a timestamp when called.
        return (!upper.starts_with("NOW")).then(|| "CURRENT_TIMESTAMP".to_string());
    }
    let precision = rest.strip_prefix('(')?.strip_suffix(')')?.trim();
    match precision {
        "" | "0" => Some("CURRENT_TIMESTAMP".to_string()),
        p if p.bytes().all(|b| b.is_ascii_digit()) => Some(format!("CURRENT_TIMESTAMP({p})")),
        _ => None,
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Semantic kind.
    pub kind: ColumnKind,
    /// Canonical type name from the mapping (`bigint`, `string`), or the
    /// lowercased raw name for [`ColumnKind::Other`].
    pub type_name: String,
    /// Length of string and binary columns.
    pub length: Option<u32>,
    /// Precision of decimal columns.
    pub precision: Option<u32>,
    /// Scale of decimal columns.
    pub scale: Option<u32>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is UNSIGNED.
    pub unsigned: bool,
    /// Whether the column is AUTO_INCREMENT.
    pub autoincrement: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Column comment, never empty.
    pub comment: Option<String>,
    /// Fixed-width (`CHAR`, `BINARY`) rather than variable-width.
    pub fixed: bool,
    /// Allowed values of an enumeration, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Column {
    /// Creates a nullable column with no other attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ColumnKind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            unsigned: false,
            autoincrement: false,
            default: None,
            comment: None,
            fixed: false,
            enum_values: vec![],
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as UNSIGNED.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Marks the column as AUTO_INCREMENT.
    #[must_use]
    pub const fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    /// Marks the column as fixed-width.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the comment. An empty comment clears it.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    /// Sets the allowed enumeration values.
    #[must_use]
    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = values;
        self
    }

    /// Short type description such as `string(50)`, `decimal(2,1)` or
    /// `enum('a','b')`.
    #[must_use]
    pub fn type_summary(&self) -> String {
        if self.kind == ColumnKind::Enumeration {
            let values: Vec<String> = self
                .enum_values
                .iter()
                .map(|v| quote_string(v))
                .collect();
            return format!("{}({})", self.type_name, values.join(","));
        }
        match (self.length, self.precision, self.scale) {
            (Some(length), _, _) => format!("{}({length})", self.type_name),
            (None, Some(p), Some(s)) => format!("{}({p},{s})", self.type_name),
            _ => self.type_name.clone(),
        }
    }
}
