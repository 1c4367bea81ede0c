//! Table comparison.

use serde::Serialize;
use tracing::debug;

use super::column::{diff_column, ChangedProperty};
use crate::schema::{Column, ForeignKey, Index, Table};

/// A column present on both sides, changed or renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDiff {
    /// The column before.
    pub from: Column,
    /// The column after.
    pub to: Column,
    /// Differing properties, in report order. May be empty for a pure
    /// rename.
    pub changed_properties: Vec<ChangedProperty>,
}

/// An index present on both sides with a different definition or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDiff {
    /// The index before.
    pub from: Index,
    /// The index after.
    pub to: Index,
}

/// A foreign key present on both sides with a different definition or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDiff {
    /// The foreign key before.
    pub from: ForeignKey,
    /// The foreign key after.
    pub to: ForeignKey,
}

/// Differences within one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableDiff {
    /// Table name on the "from" side.
    pub name: String,
    /// New name when the table was renamed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_columns: Vec<ColumnDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub renamed_columns: Vec<ColumnDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_indexes: Vec<Index>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_indexes: Vec<Index>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_indexes: Vec<IndexDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub renamed_indexes: Vec<IndexDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_foreign_keys: Vec<ForeignKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_foreign_keys: Vec<ForeignKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_foreign_keys: Vec<ForeignKeyDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub renamed_foreign_keys: Vec<ForeignKeyDiff>,
}

impl TableDiff {
    /// Creates an empty diff for the named table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the table name on the "to" side.
    #[must_use]
    pub fn target_name(&self) -> &str {
        self.new_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if nothing differs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.added_columns.is_empty()
            && self.removed_columns.is_empty()
            && self.changed_columns.is_empty()
            && self.renamed_columns.is_empty()
            && self.added_indexes.is_empty()
            && self.removed_indexes.is_empty()
            && self.changed_indexes.is_empty()
            && self.renamed_indexes.is_empty()
            && self.added_foreign_keys.is_empty()
            && self.removed_foreign_keys.is_empty()
            && self.changed_foreign_keys.is_empty()
            && self.renamed_foreign_keys.is_empty()
    }

    /// Foreign keys dropped from the "from" table: removed, changed and
    /// renamed ones.
    pub fn dropped_foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.removed_foreign_keys
            .iter()
            .chain(self.changed_foreign_keys.iter().map(|d| &d.from))
            .chain(self.renamed_foreign_keys.iter().map(|d| &d.from))
    }

    /// Foreign keys created on the "to" table: added, changed and renamed
    /// ones.
    pub fn created_foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.added_foreign_keys
            .iter()
            .chain(self.changed_foreign_keys.iter().map(|d| &d.to))
            .chain(self.renamed_foreign_keys.iter().map(|d| &d.to))
    }
}

/// Compares two versions of a table. Columns, indexes and foreign keys
/// are matched by name; unmatched pairs are then checked for renames.
#[must_use]
pub fn diff_table(from: &Table, to: &Table) -> TableDiff {
    let mut diff = TableDiff::new(from.name());
    if !from.name().eq_ignore_ascii_case(to.name()) {
        diff.new_name = Some(to.name().to_string());
    }

    diff_columns(from, to, &mut diff);
    diff_indexes(from, to, &mut diff);
    diff_foreign_keys(from, to, &mut diff);

    debug!(
        table = %diff.name,
        added = diff.added_columns.len(),
        removed = diff.removed_columns.len(),
        changed = diff.changed_columns.len(),
        renamed = diff.renamed_columns.len(),
        "compared table"
    );
    diff
}

// ================================================================
// Columns
// ================================================================

fn diff_columns(from: &Table, to: &Table, diff: &mut TableDiff) {
    let mut removed: Vec<&Column> = Vec::new();
    for old in from.columns() {
        match to.column(&old.name) {
            Some(new) => {
                let changed_properties = diff_column(old, new);
                if !changed_properties.is_empty() {
                    diff.changed_columns.push(ColumnDiff {
                        from: old.clone(),
                        to: new.clone(),
                        changed_properties,
                    });
                }
            }
            None => removed.push(old),
        }
    }
    let mut added: Vec<&Column> = to
        .columns()
        .iter()
        .filter(|c| from.column(&c.name).is_none())
        .collect();

    // ---- Rename detection ------------------------------------------
    // A removed and an added column are one renamed column when they sit
    // in the same gap between surviving columns and share a kind.
    removed.retain(|old| {
        let anchor = surviving_predecessor(from, to, &old.name);
        let found = added.iter().position(|new| {
            new.kind == old.kind && surviving_predecessor(to, from, &new.name) == anchor
        });
        match found {
            Some(at) => {
                let new = added.remove(at);
                diff.renamed_columns.push(ColumnDiff {
                    from: (*old).clone(),
                    to: new.clone(),
                    changed_properties: diff_column(old, new),
                });
                false
            }
            None => true,
        }
    });

    diff.added_columns = added.into_iter().cloned().collect();
    diff.removed_columns = removed.into_iter().cloned().collect();
    diff.added_columns.sort_by_key(|c| c.name.to_ascii_lowercase());
    diff.removed_columns.sort_by_key(|c| c.name.to_ascii_lowercase());
    diff.changed_columns
        .sort_by_key(|d| d.from.name.to_ascii_lowercase());
    diff.renamed_columns
        .sort_by_key(|d| d.from.name.to_ascii_lowercase());
}

/// Lower-cased name of the nearest column before `name` in `table` that
/// also exists in `other`; `None` when there is none.
fn surviving_predecessor(table: &Table, other: &Table, name: &str) -> Option<String> {
    let position = table.column_position(name)?;
    table.columns()[..position]
        .iter()
        .rev()
        .find(|c| other.column(&c.name).is_some())
        .map(|c| c.name.to_ascii_lowercase())
}

// ================================================================
// Indexes / foreign keys
// ================================================================

fn diff_indexes(from: &Table, to: &Table, diff: &mut TableDiff) {
    let mut removed: Vec<&Index> = Vec::new();
    for old in from.all_indexes() {
        match to.index(&old.name) {
            Some(new) if !old.same_definition(new) => diff.changed_indexes.push(IndexDiff {
                from: old.clone(),
                to: new.clone(),
            }),
            Some(_) => {}
            None => removed.push(old),
        }
    }
    let mut added: Vec<&Index> = to
        .all_indexes()
        .filter(|i| from.index(&i.name).is_none())
        .collect();

    // ---- Rename detection (never the primary key) ------------------
    removed.retain(|old| {
        if old.is_primary() {
            return true;
        }
        let found = added
            .iter()
            .position(|new| !new.is_primary() && old.same_definition(new));
        match found {
            Some(at) => {
                let new = added.remove(at);
                diff.renamed_indexes.push(IndexDiff {
                    from: (*old).clone(),
                    to: new.clone(),
                });
                false
            }
            None => true,
        }
    });

    diff.added_indexes = added.into_iter().cloned().collect();
    diff.removed_indexes = removed.into_iter().cloned().collect();
    diff.added_indexes.sort_by_key(|i| i.name.to_ascii_lowercase());
    diff.removed_indexes.sort_by_key(|i| i.name.to_ascii_lowercase());
    diff.changed_indexes
        .sort_by_key(|d| d.from.name.to_ascii_lowercase());
    diff.renamed_indexes
        .sort_by_key(|d| d.from.name.to_ascii_lowercase());
}

fn diff_foreign_keys(from: &Table, to: &Table, diff: &mut TableDiff) {
    let mut removed: Vec<&ForeignKey> = Vec::new();
    for old in from.foreign_keys() {
        match to.foreign_key(&old.name) {
            Some(new) if !old.same_definition(new) => {
                diff.changed_foreign_keys.push(ForeignKeyDiff {
                    from: old.clone(),
                    to: new.clone(),
                });
            }
            Some(_) => {}
            None => removed.push(old),
        }
    }
    let mut added: Vec<&ForeignKey> = to
        .foreign_keys()
        .iter()
        .filter(|fk| from.foreign_key(&fk.name).is_none())
        .collect();

    removed.retain(|old| match added.iter().position(|new| old.same_definition(new)) {
        Some(at) => {
            let new = added.remove(at);
            diff.renamed_foreign_keys.push(ForeignKeyDiff {
                from: (*old).clone(),
                to: new.clone(),
            });
            false
        }
        None => true,
    });

    // Table storage is already name-ordered; the lists stay that way.
    diff.added_foreign_keys = added.into_iter().cloned().collect();
    diff.removed_foreign_keys = removed.into_iter().cloned().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnKind, IndexKind, ReferentialAction};

    fn col(name: &str) -> Column {
        Column::new(name, ColumnKind::Integer, "integer")
    }

    fn table(name: &str, columns: &[&str]) -> Table {
        let mut table = Table::new(name);
        for c in columns {
            table.add_column(col(c)).unwrap();
        }
        table
    }

    #[test]
    fn test_rename_requires_same_gap() {
        // `b` was removed after `a`; `z` was added after `c`.
        let from = table("t", &["a", "b", "c"]);
        let to = table("t", &["a", "c", "z"]);
        let diff = diff_table(&from, &to);
        assert!(diff.renamed_columns.is_empty());
        assert_eq!(diff.removed_columns[0].name, "b");
        assert_eq!(diff.added_columns[0].name, "z");
    }

    #[test]
    fn test_rename_requires_same_kind() {
        let from = table("t", &["id", "old"]);
        let mut to = table("t", &["id"]);
        to.add_column(Column::new("new", ColumnKind::Text, "text"))
            .unwrap();
        let diff = diff_table(&from, &to);
        assert!(diff.renamed_columns.is_empty());
    }

    #[test]
    fn test_rename_records_remaining_changes() {
        let from = table("t", &["id", "old"]);
        let mut to = table("t", &["id"]);
        to.add_column(col("new").not_null()).unwrap();
        let diff = diff_table(&from, &to);
        assert_eq!(diff.renamed_columns.len(), 1);
        assert_eq!(
            diff.renamed_columns[0].changed_properties,
            vec![ChangedProperty::Nullable]
        );
    }

    #[test]
    fn test_index_rename_and_change() {
        let mut from = table("t", &["a", "b"]);
        from.add_index(Index::new("idx_a", IndexKind::Plain, vec!["a".into()]))
            .unwrap();
        from.add_index(Index::new("idx_b", IndexKind::Plain, vec!["b".into()]))
            .unwrap();
        let mut to = table("t", &["a", "b"]);
        to.add_index(Index::new("a_index", IndexKind::Plain, vec!["a".into()]))
            .unwrap();
        to.add_index(Index::new("idx_b", IndexKind::Unique, vec!["b".into()]))
            .unwrap();

        let diff = diff_table(&from, &to);
        assert_eq!(diff.renamed_indexes.len(), 1);
        assert_eq!(diff.renamed_indexes[0].from.name, "idx_a");
        assert_eq!(diff.renamed_indexes[0].to.name, "a_index");
        assert_eq!(diff.changed_indexes.len(), 1);
        assert_eq!(diff.changed_indexes[0].to.kind, IndexKind::Unique);
    }

    #[test]
    fn test_primary_key_is_never_renamed() {
        let mut from = table("t", &["a"]);
        from.set_primary_key(vec!["a".into()]).unwrap();
        let mut to = table("t", &["a"]);
        to.add_index(Index::new("uniq_a", IndexKind::Primary, vec!["a".into()]))
            .unwrap();
        assert!(diff_table(&from, &to).is_empty());

        let mut to = table("t", &["a"]);
        to.add_index(Index::new("a", IndexKind::Unique, vec!["a".into()]))
            .unwrap();
        let diff = diff_table(&from, &to);
        assert!(diff.renamed_indexes.is_empty());
        assert_eq!(diff.removed_indexes[0].name, "PRIMARY");
        assert_eq!(diff.added_indexes[0].name, "a");
    }

    #[test]
    fn test_foreign_key_change_and_rename() {
        let fk = ForeignKey::new("fk_a", vec!["a".into()], "other", vec!["id".into()]);
        let mut from = table("t", &["a"]);
        from.add_foreign_key(fk.clone()).unwrap();

        let mut to = table("t", &["a"]);
        to.add_foreign_key(fk.clone().on_update(ReferentialAction::Cascade))
            .unwrap();
        assert_eq!(diff_table(&from, &to).changed_foreign_keys.len(), 1);

        let mut renamed = fk;
        renamed.name = "t_ibfk_1".into();
        let mut to = table("t", &["a"]);
        to.add_foreign_key(renamed).unwrap();
        let diff = diff_table(&from, &to);
        assert_eq!(diff.renamed_foreign_keys.len(), 1);
        assert!(diff.removed_foreign_keys.is_empty());
    }
}
