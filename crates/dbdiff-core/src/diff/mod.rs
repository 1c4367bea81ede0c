//! Schema diff engine.
//!
//! Compares a "from" and a "to" [`Schema`] and produces a [`SchemaDiff`]:
//! added, removed, changed and renamed tables, and within changed tables
//! the same classification for columns, indexes and foreign keys. Inputs
//! are only read; the diff is an independent value.
//!
//! Rename detection is heuristic:
//!
//! - a removed and an added table are one renamed table when their sets
//!   of lower-cased column names are equal and non-empty;
//! - a removed and an added column are one renamed column when they have
//!   the same nearest preceding surviving column and the same kind;
//! - indexes and foreign keys are renamed when everything but the name is
//!   identical. The primary key is never renamed.

mod apply;
mod column;
mod table;

use serde::Serialize;
use tracing::debug;

pub use column::{diff_column, ChangedProperty};
pub use table::{diff_table, ColumnDiff, ForeignKeyDiff, IndexDiff, TableDiff};

use crate::dialect::SqlDialect;
use crate::schema::{Schema, Table};

/// The structural delta between two schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    /// Tables only in "to", by name.
    pub added_tables: Vec<Table>,
    /// Tables only in "from", by name.
    pub removed_tables: Vec<Table>,
    /// Changed or renamed tables, by "from" name.
    pub changed_tables: Vec<TableDiff>,
}

impl SchemaDiff {
    /// Returns true if the schemas are structurally equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_tables.is_empty()
            && self.removed_tables.is_empty()
            && self.changed_tables.is_empty()
    }

    /// Returns true if anything differs.
    #[must_use]
    pub fn has_difference(&self) -> bool {
        !self.is_empty()
    }

    /// Renders the diff as ALTER-equivalent statements.
    #[must_use]
    pub fn to_sql(&self, dialect: &impl SqlDialect) -> Vec<String> {
        dialect.diff_statements(self)
    }

    /// Returns the changed table with the given "from" name.
    #[must_use]
    pub fn changed_table(&self, name: &str) -> Option<&TableDiff> {
        self.changed_tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Compares two schemas.
#[must_use]
pub fn diff(from: &Schema, to: &Schema) -> SchemaDiff {
    let mut removed: Vec<&Table> = from
        .tables()
        .filter(|t| to.table(t.name()).is_none())
        .collect();
    let mut added: Vec<&Table> = to
        .tables()
        .filter(|t| from.table(t.name()).is_none())
        .collect();

    let mut changed_tables: Vec<TableDiff> = from
        .tables()
        .filter_map(|old| to.table(old.name()).map(|new| diff_table(old, new)))
        .filter(|d| !d.is_empty())
        .collect();

    // ---- Table renames ---------------------------------------------
    // Greedy in name order: each removed table takes the first added
    // table with the same column-name set.
    removed.retain(|old| {
        let signature = old.column_signature();
        if signature.is_empty() {
            return true;
        }
        match added.iter().position(|new| new.column_signature() == signature) {
            Some(at) => {
                let new = added.remove(at);
                debug!(from = %old.name(), to = %new.name(), "detected renamed table");
                changed_tables.push(diff_table(old, new));
                false
            }
            None => true,
        }
    });
    changed_tables.sort_by_key(|t| t.name.to_ascii_lowercase());

    SchemaDiff {
        added_tables: added.into_iter().cloned().collect(),
        removed_tables: removed.into_iter().cloned().collect(),
        changed_tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnKind};

    fn table(name: &str, columns: &[&str]) -> Table {
        let mut table = Table::new(name);
        for c in columns {
            table
                .add_column(Column::new(*c, ColumnKind::Integer, "integer"))
                .unwrap();
        }
        table
    }

    fn schema(tables: Vec<Table>) -> Schema {
        let mut schema = Schema::new();
        for t in tables {
            schema.add_table(t).unwrap();
        }
        schema
    }

    #[test]
    fn test_identical_schemas_have_no_difference() {
        let s = schema(vec![table("a", &["id"]), table("b", &["id", "x"])]);
        assert!(!diff(&s, &s).has_difference());
    }

    #[test]
    fn test_added_and_removed_tables() {
        let from = schema(vec![table("a", &["id"])]);
        let to = schema(vec![table("b", &["other"])]);
        let d = diff(&from, &to);
        assert_eq!(d.added_tables[0].name(), "b");
        assert_eq!(d.removed_tables[0].name(), "a");
        assert!(d.changed_tables.is_empty());
    }

    #[test]
    fn test_table_rename_by_column_signature() {
        let from = schema(vec![table("users", &["id", "Name"])]);
        let to = schema(vec![table("members", &["name", "id"])]);
        let d = diff(&from, &to);
        assert!(d.added_tables.is_empty());
        assert!(d.removed_tables.is_empty());
        let renamed = d.changed_table("users").unwrap();
        assert_eq!(renamed.new_name.as_deref(), Some("members"));
        assert_eq!(renamed.target_name(), "members");
    }

    #[test]
    fn test_empty_tables_are_never_renamed() {
        let from = schema(vec![table("a", &[])]);
        let to = schema(vec![table("b", &[])]);
        let d = diff(&from, &to);
        assert_eq!(d.added_tables.len(), 1);
        assert_eq!(d.removed_tables.len(), 1);
    }

    #[test]
    fn test_table_names_match_case_insensitively() {
        let from = schema(vec![table("Users", &["id"])]);
        let to = schema(vec![table("users", &["id"])]);
        assert!(diff(&from, &to).is_empty());
    }
}
