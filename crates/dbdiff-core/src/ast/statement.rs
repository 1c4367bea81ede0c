//! Statement-level AST nodes.

use std::fmt;

use serde::Serialize;

use super::types::ColumnDef;
use crate::lexer::Span;

/// A top-level statement of a DDL script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `CREATE TABLE`
    CreateTable(CreateTableStatement),
    /// Any other statement, or a table belonging to another database.
    /// Skipped without inspection.
    Other(Span),
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    /// Table name with any same-database qualifier stripped.
    pub name: String,
    /// Whether `TEMPORARY` was given.
    pub temporary: bool,
    /// Whether `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Create-definitions in declaration order.
    pub definitions: Vec<CreateDefinition>,
    /// Location of the statement (without the terminating `;`).
    pub span: Span,
}

impl CreateTableStatement {
    /// Iterates over the column definitions.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.definitions.iter().filter_map(|def| match def {
            CreateDefinition::Column(col) => Some(col),
            _ => None,
        })
    }
}

/// One entry of the parenthesized list in `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateDefinition {
    /// A column definition.
    Column(ColumnDef),
    /// `[CONSTRAINT [name]] PRIMARY KEY (cols)`
    PrimaryKey(PrimaryKeyDef),
    /// `[UNIQUE | FULLTEXT | SPATIAL] INDEX|KEY [name] (cols)`
    Index(IndexDef),
    /// `[CONSTRAINT name] FOREIGN KEY ...`
    ForeignKey(ForeignKeyDef),
}

/// A table-level primary key clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyDef {
    /// Key columns in order.
    pub columns: Vec<String>,
}

/// Kind of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Plain `INDEX` / `KEY`.
    Plain,
    /// `UNIQUE`
    Unique,
    /// `FULLTEXT`
    Fulltext,
    /// `SPATIAL`
    Spatial,
    /// The table's primary key.
    Primary,
}

impl IndexKind {
    /// Returns the lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Unique => "unique",
            Self::Fulltext => "fulltext",
            Self::Spatial => "spatial",
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An index clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    /// Index name; `None` when the clause left it out.
    pub name: Option<String>,
    /// Index kind (never [`IndexKind::Primary`] here).
    pub kind: IndexKind,
    /// Indexed columns in order, sort order and prefix length dropped.
    pub columns: Vec<String>,
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    /// `NO ACTION`, also the default when unspecified.
    #[default]
    NoAction,
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }

    /// Parses an action as reported by a catalog (`"SET NULL"`, ...).
    #[must_use]
    pub fn from_sql(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "NO ACTION" => Some(Self::NoAction),
            "RESTRICT" => Some(Self::Restrict),
            "CASCADE" => Some(Self::Cascade),
            "SET NULL" => Some(Self::SetNull),
            "SET DEFAULT" => Some(Self::SetDefault),
            _ => None,
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A foreign key clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDef {
    /// Constraint name (`CONSTRAINT name`, else the `FOREIGN KEY name`).
    pub name: Option<String>,
    /// Local columns in order.
    pub columns: Vec<String>,
    /// Referenced table, database qualifier stripped.
    pub referenced_table: String,
    /// Referenced columns in order.
    pub referenced_columns: Vec<String>,
    /// `ON UPDATE` action, if written.
    pub on_update: Option<ReferentialAction>,
    /// `ON DELETE` action, if written.
    pub on_delete: Option<ReferentialAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referential_action_sql_round_trip() {
        for action in [
            ReferentialAction::NoAction,
            ReferentialAction::Restrict,
            ReferentialAction::Cascade,
            ReferentialAction::SetNull,
            ReferentialAction::SetDefault,
        ] {
            assert_eq!(ReferentialAction::from_sql(action.as_sql()), Some(action));
        }
        assert_eq!(ReferentialAction::from_sql("set null"), Some(ReferentialAction::SetNull));
        assert_eq!(ReferentialAction::from_sql("bogus"), None);
    }

    #[test]
    fn test_default_action_is_no_action() {
        assert_eq!(ReferentialAction::default(), ReferentialAction::NoAction);
    }
}
