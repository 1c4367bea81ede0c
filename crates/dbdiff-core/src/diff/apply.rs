//! Applying a diff to the model it was computed from.

use super::{SchemaDiff, TableDiff};
use crate::schema::{Schema, SchemaError, Table};

impl SchemaDiff {
    /// Applies the diff to `from`, returning a schema structurally equal
    /// to the "to" side of the comparison. `from` is left untouched.
    ///
    /// # Errors
    ///
    /// Fails if `from` is not the schema the diff was computed from.
    pub fn apply_to(&self, from: &Schema) -> Result<Schema, SchemaError> {
        let mut schema = from.clone();
        for table in &self.removed_tables {
            schema.remove_table(table.name())?;
        }
        for diff in &self.changed_tables {
            let mut table = schema.remove_table(&diff.name)?;
            diff.apply_to(&mut table)?;
            schema.add_table(table)?;
        }
        for table in &self.added_tables {
            schema.add_table(table.clone())?;
        }
        Ok(schema)
    }
}

impl TableDiff {
    /// Applies the table-level changes. Everything that goes away is
    /// removed before anything new is added; the rename comes last.
    ///
    /// # Errors
    ///
    /// Fails if `table` does not match the "from" side.
    pub fn apply_to(&self, table: &mut Table) -> Result<(), SchemaError> {
        for fk in self.dropped_foreign_keys() {
            table.remove_foreign_key(&fk.name)?;
        }
        let dropped_indexes = self
            .removed_indexes
            .iter()
            .chain(self.changed_indexes.iter().map(|d| &d.from))
            .chain(self.renamed_indexes.iter().map(|d| &d.from));
        for index in dropped_indexes {
            table.remove_index(&index.name)?;
        }

        for column in &self.removed_columns {
            table.remove_column(&column.name)?;
        }
        for change in self.changed_columns.iter().chain(&self.renamed_columns) {
            table.replace_column(&change.from.name, change.to.clone())?;
        }
        for column in &self.added_columns {
            table.add_column(column.clone())?;
        }

        let created_indexes = self
            .added_indexes
            .iter()
            .chain(self.changed_indexes.iter().map(|d| &d.to))
            .chain(self.renamed_indexes.iter().map(|d| &d.to));
        for index in created_indexes {
            table.add_index(index.clone())?;
        }
        for fk in self.created_foreign_keys() {
            table.add_foreign_key(fk.clone())?;
        }

        if let Some(name) = &self.new_name {
            table.rename(name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::diff;
    use crate::schema::{Column, ColumnKind, ForeignKey, Index, IndexKind, Schema, Table};

    fn users(extra: Option<&str>) -> Table {
        let mut table = Table::new("users");
        table
            .add_column(Column::new("id", ColumnKind::Integer, "integer"))
            .unwrap();
        table
            .add_column(Column::new("email", ColumnKind::String, "string").with_length(100))
            .unwrap();
        if let Some(name) = extra {
            table
                .add_column(Column::new(name, ColumnKind::Integer, "integer"))
                .unwrap();
        }
        table.set_primary_key(vec!["id".into()]).unwrap();
        table
    }

    #[test]
    fn test_apply_reaches_target() {
        let mut from = Schema::new();
        let mut old = users(Some("club_id"));
        old.add_index(Index::new("club_id", IndexKind::Plain, vec!["club_id".into()]))
            .unwrap();
        old.add_foreign_key(ForeignKey::new(
            "fk_club",
            vec!["club_id".into()],
            "clubs",
            vec!["id".into()],
        ))
        .unwrap();
        from.add_table(old).unwrap();
        from.add_table(Table::new("legacy")).unwrap();

        let mut to = Schema::new();
        let mut new = users(Some("team_id"));
        new.add_index(Index::new("uniq_email", IndexKind::Unique, vec!["email".into()]))
            .unwrap();
        to.add_table(new).unwrap();
        let mut audit = Table::new("audit");
        audit
            .add_column(Column::new("at", ColumnKind::DateTime, "datetime"))
            .unwrap();
        to.add_table(audit).unwrap();

        let d = diff(&from, &to);
        let applied = d.apply_to(&from).unwrap();
        assert!(diff(&applied, &to).is_empty());
        // The input is not mutated.
        assert!(from.table("legacy").is_some());
    }

    #[test]
    fn test_apply_to_wrong_schema_fails() {
        let mut from = Schema::new();
        from.add_table(users(None)).unwrap();
        let d = diff(&from, &Schema::new());
        assert!(d.apply_to(&Schema::new()).is_err());
    }
}
