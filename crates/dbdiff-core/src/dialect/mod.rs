//! Dialect-specific SQL generation for schema diffs.
//!
//! [`SqlDialect`] turns a [`SchemaDiff`] into an ordered list of
//! ALTER-equivalent statements. The default method bodies fix the
//! statement order and produce standard SQL; implementations supply
//! quoting, type rendering and the statements their database spells
//! differently.

mod mysql;

pub use mysql::MySqlDialect;

use crate::diff::{ColumnDiff, SchemaDiff};
use crate::lexer::quote_string;
use crate::schema::{Column, DefaultValue, ForeignKey, Index, IndexKind, ReferentialAction, Table};

/// Trait for dialect-specific SQL generation.
pub trait SqlDialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Renders the column type, including arguments and `UNSIGNED`.
    fn column_type(&self, column: &Column) -> String;

    /// Generates SQL for changing a column, possibly renaming it.
    fn change_column(&self, table: &str, change: &ColumnDiff) -> String;

    /// Generates SQL for dropping an index or the primary key.
    fn drop_index(&self, table: &str, index: &Index) -> String;

    /// Generates SQL for renaming an index.
    fn rename_index(&self, table: &str, from: &str, to: &str) -> String;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Quotes a comma-separated list of identifiers.
    fn quote_list(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| self.quote_identifier(n))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders a default value.
    fn render_default(&self, default: &DefaultValue) -> String {
        default.to_sql()
    }

    /// Generates SQL for a column definition.
    fn column_definition(&self, column: &Column) -> String {
        let mut sql = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            self.column_type(column)
        );
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(ref default) = column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.render_default(default));
        }
        if column.autoincrement {
            sql.push_str(" AUTO_INCREMENT");
        }
        if let Some(ref comment) = column.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&quote_string(comment));
        }
        sql
    }

    /// Generates the inline definition of an index.
    fn index_definition(&self, index: &Index) -> String {
        let columns = self.quote_list(&index.columns);
        let name = self.quote_identifier(&index.name);
        match index.kind {
            IndexKind::Primary => format!("PRIMARY KEY ({columns})"),
            IndexKind::Unique => format!("UNIQUE KEY {name} ({columns})"),
            IndexKind::Fulltext => format!("FULLTEXT KEY {name} ({columns})"),
            IndexKind::Spatial => format!("SPATIAL KEY {name} ({columns})"),
            IndexKind::Plain => format!("KEY {name} ({columns})"),
        }
    }

    /// Generates the inline definition of a foreign key. Actions equal
    /// to the `NO ACTION` default are left out.
    fn foreign_key_definition(&self, fk: &ForeignKey) -> String {
        let mut sql = format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_identifier(&fk.name),
            self.quote_list(&fk.columns),
            self.quote_identifier(&fk.referenced_table),
            self.quote_list(&fk.referenced_columns)
        );
        if fk.on_delete != ReferentialAction::NoAction {
            sql.push_str(" ON DELETE ");
            sql.push_str(fk.on_delete.as_sql());
        }
        if fk.on_update != ReferentialAction::NoAction {
            sql.push_str(" ON UPDATE ");
            sql.push_str(fk.on_update.as_sql());
        }
        sql
    }

    /// Generates SQL for CREATE TABLE with indexes and foreign keys inline.
    fn create_table(&self, table: &Table) -> String {
        let mut lines: Vec<String> = table
            .columns()
            .iter()
            .map(|c| self.column_definition(c))
            .collect();
        lines.extend(table.all_indexes().map(|i| self.index_definition(i)));
        lines.extend(
            table
                .foreign_keys()
                .iter()
                .map(|fk| self.foreign_key_definition(fk)),
        );
        let body: Vec<String> = lines.iter().map(|l| format!("  {l}")).collect();
        format!(
            "CREATE TABLE {} (\n{}\n)",
            self.quote_identifier(table.name()),
            body.join(",\n")
        )
    }

    /// Generates SQL for DROP TABLE.
    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(table))
    }

    /// Generates SQL for renaming a table.
    fn rename_table(&self, from: &str, to: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_identifier(from),
            self.quote_identifier(to)
        )
    }

    /// Generates SQL for ADD COLUMN.
    fn add_column(&self, table: &str, column: &Column) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.quote_identifier(table),
            self.column_definition(column)
        )
    }

    /// Generates SQL for DROP COLUMN.
    fn drop_column(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_identifier(table),
            self.quote_identifier(column)
        )
    }

    /// Generates SQL for adding an index or the primary key.
    fn add_index(&self, table: &str, index: &Index) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.quote_identifier(table),
            self.index_definition(index)
        )
    }

    /// Generates SQL for adding a foreign key.
    fn add_foreign_key(&self, table: &str, fk: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.quote_identifier(table),
            self.foreign_key_definition(fk)
        )
    }

    /// Generates SQL for dropping a foreign key.
    fn drop_foreign_key(&self, table: &str, name: &str) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.quote_identifier(table),
            self.quote_identifier(name)
        )
    }

    /// Generates the statements that turn "from" into "to".
    ///
    /// Order: drop foreign keys, drop tables, create tables, then per
    /// changed table rename it, drop indexes, add, change and drop
    /// columns, add and rename indexes, and finally add foreign keys.
    fn diff_statements(&self, diff: &SchemaDiff) -> Vec<String> {
        let mut statements = Vec::new();

        // ---- Foreign keys that go away -------------------------------
        for table in &diff.removed_tables {
            for fk in table.foreign_keys() {
                statements.push(self.drop_foreign_key(table.name(), &fk.name));
            }
        }
        for table in &diff.changed_tables {
            for fk in table.dropped_foreign_keys() {
                statements.push(self.drop_foreign_key(&table.name, &fk.name));
            }
        }

        // ---- Tables --------------------------------------------------
        for table in &diff.removed_tables {
            statements.push(self.drop_table(table.name()));
        }
        for table in &diff.added_tables {
            statements.push(self.create_table(table));
        }

        // ---- Changed tables ------------------------------------------
        for table in &diff.changed_tables {
            let name = table.target_name();
            if let Some(ref new_name) = table.new_name {
                statements.push(self.rename_table(&table.name, new_name));
            }
            let dropped_indexes = table
                .removed_indexes
                .iter()
                .chain(table.changed_indexes.iter().map(|d| &d.from));
            for index in dropped_indexes {
                statements.push(self.drop_index(name, index));
            }
            for column in &table.added_columns {
                statements.push(self.add_column(name, column));
            }
            for change in table.changed_columns.iter().chain(&table.renamed_columns) {
                statements.push(self.change_column(name, change));
            }
            for column in &table.removed_columns {
                statements.push(self.drop_column(name, &column.name));
            }
            let added_indexes = table
                .added_indexes
                .iter()
                .chain(table.changed_indexes.iter().map(|d| &d.to));
            for index in added_indexes {
                statements.push(self.add_index(name, index));
            }
            for rename in &table.renamed_indexes {
                statements.push(self.rename_index(name, &rename.from.name, &rename.to.name));
            }
        }

        // ---- Foreign keys that appear --------------------------------
        for table in &diff.changed_tables {
            for fk in table.created_foreign_keys() {
                statements.push(self.add_foreign_key(table.target_name(), fk));
            }
        }

        statements
    }

    /// Renders the diff as a script of `;`-terminated statements, one per
    /// line (CREATE TABLE spans several).
    fn diff_script(&self, diff: &SchemaDiff) -> String {
        self.diff_statements(diff)
            .into_iter()
            .map(|s| format!("{s};\n"))
            .collect()
    }
}
