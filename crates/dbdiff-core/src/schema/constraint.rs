//! Index and foreign key models.

use serde::Serialize;

pub use crate::ast::{IndexKind, ReferentialAction};

/// Name of a table's primary key index.
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// An index, including the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    /// Index name, unique within the table.
    pub name: String,
    /// Index kind.
    pub kind: IndexKind,
    /// Indexed columns in order.
    pub columns: Vec<String>,
}

impl Index {
    /// Creates an index.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: IndexKind, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            columns,
        }
    }

    /// Creates a primary key over `columns`.
    #[must_use]
    pub fn primary(columns: Vec<String>) -> Self {
        Self::new(PRIMARY_KEY_NAME, IndexKind::Primary, columns)
    }

    /// Returns true for the primary key.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.kind == IndexKind::Primary
    }

    /// Returns true if both indexes have the same kind and columns,
    /// regardless of name.
    #[must_use]
    pub fn same_definition(&self, other: &Self) -> bool {
        self.kind == other.kind && names_eq(&self.columns, &other.columns)
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Constraint name, unique within the table.
    pub name: String,
    /// Local columns in order.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns, same arity as `columns`.
    pub referenced_columns: Vec<String>,
    /// ON UPDATE action.
    pub on_update: ReferentialAction,
    /// ON DELETE action.
    pub on_delete: ReferentialAction,
}

impl ForeignKey {
    /// Creates a foreign key with `NO ACTION` for both actions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            referenced_table: referenced_table.into(),
            referenced_columns,
            on_update: ReferentialAction::NoAction,
            on_delete: ReferentialAction::NoAction,
        }
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = action;
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    /// Returns true if everything but the name matches.
    #[must_use]
    pub fn same_definition(&self, other: &Self) -> bool {
        names_eq(&self.columns, &other.columns)
            && self.referenced_table.eq_ignore_ascii_case(&other.referenced_table)
            && names_eq(&self.referenced_columns, &other.referenced_columns)
            && self.on_update == other.on_update
            && self.on_delete == other.on_delete
    }
}

/// Case-insensitive, order-sensitive comparison of name lists.
fn names_eq(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
}
