//! Table model.
//!
//! A [`Table`] enforces its invariants on every insertion: column names
//! are unique, constraint columns resolve, the primary key is unique and
//! forces its columns to NOT NULL. Indexes and foreign keys are kept in
//! lower-cased name order.

use serde::Serialize;

use super::column::{Column, ColumnKind};
use super::constraint::{ForeignKey, Index, PRIMARY_KEY_NAME};
use super::error::SchemaError;

/// A table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_key: Option<Index>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            primary_key: None,
            indexes: vec![],
            foreign_keys: vec![],
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name, case-insensitively.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Returns the declaration position of a column.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Returns the primary key, if any.
    #[must_use]
    pub const fn primary_key(&self) -> Option<&Index> {
        self.primary_key.as_ref()
    }

    /// Returns the secondary indexes, ordered by name.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Iterates over the primary key followed by the secondary indexes.
    pub fn all_indexes(&self) -> impl Iterator<Item = &Index> {
        self.primary_key.iter().chain(&self.indexes)
    }

    /// Looks up an index by name; `PRIMARY` finds the primary key.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.all_indexes()
            .find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Returns the foreign keys, ordered by name.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Looks up a foreign key by name.
    #[must_use]
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.name.eq_ignore_ascii_case(name))
    }

    /// Set of lower-cased column names, used to detect renamed tables.
    #[must_use]
    pub fn column_signature(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.name.to_ascii_lowercase())
            .collect();
        names.sort();
        names
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name or an enumeration without values.
    pub fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        self.check_column(&column, None)?;
        self.columns.push(column);
        Ok(())
    }

    /// Establishes the primary key and forces its columns to NOT NULL.
    ///
    /// # Errors
    ///
    /// Fails if a primary key exists or a column does not resolve.
    pub fn set_primary_key(&mut self, columns: Vec<String>) -> Result<(), SchemaError> {
        if self.primary_key.is_some() {
            return Err(SchemaError::DuplicatePrimaryKey(self.name.clone()));
        }
        let columns = self.resolve_columns(&columns, "primary key")?;
        for name in &columns {
            if let Some(column) = self
                .columns
                .iter_mut()
                .find(|c| c.name.eq_ignore_ascii_case(name))
            {
                column.nullable = false;
            }
        }
        self.primary_key = Some(Index::primary(columns));
        Ok(())
    }

    /// Adds an index. A primary-kind index becomes the primary key.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name or an unresolved column.
    pub fn add_index(&mut self, index: Index) -> Result<(), SchemaError> {
        if index.is_primary() {
            return self.set_primary_key(index.columns);
        }
        if self.index(&index.name).is_some() || index.name.eq_ignore_ascii_case(PRIMARY_KEY_NAME)
        {
            return Err(SchemaError::DuplicateIndex {
                table: self.name.clone(),
                index: index.name,
            });
        }
        let columns = self.resolve_columns(&index.columns, &format!("index `{}`", index.name))?;
        let index = Index { columns, ..index };
        let at = self
            .indexes
            .partition_point(|i| i.name.to_ascii_lowercase() < index.name.to_ascii_lowercase());
        self.indexes.insert(at, index);
        Ok(())
    }

    /// Adds a foreign key. Only local columns are resolved; the referenced
    /// table may live elsewhere.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name, an unresolved local column or an arity
    /// mismatch.
    pub fn add_foreign_key(&mut self, foreign_key: ForeignKey) -> Result<(), SchemaError> {
        if self.foreign_key(&foreign_key.name).is_some() {
            return Err(SchemaError::DuplicateForeignKey {
                table: self.name.clone(),
                foreign_key: foreign_key.name,
            });
        }
        if foreign_key.columns.len() != foreign_key.referenced_columns.len() {
            return Err(SchemaError::ForeignKeyArity {
                table: self.name.clone(),
                foreign_key: foreign_key.name,
                columns: foreign_key.columns.len(),
                referenced: foreign_key.referenced_columns.len(),
            });
        }
        let owner = format!("foreign key `{}`", foreign_key.name);
        let columns = self.resolve_columns(&foreign_key.columns, &owner)?;
        let foreign_key = ForeignKey {
            columns,
            ..foreign_key
        };
        let lower = foreign_key.name.to_ascii_lowercase();
        let at = self
            .foreign_keys
            .partition_point(|fk| fk.name.to_ascii_lowercase() < lower);
        self.foreign_keys.insert(at, foreign_key);
        Ok(())
    }

    // ========================================================================
    // Mutation (diff application)
    // ========================================================================

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Removes a column that nothing refers to.
    pub(crate) fn remove_column(&mut self, name: &str) -> Result<Column, SchemaError> {
        let position = self.require_column(name)?;
        if let Some(used_by) = self.column_user(name) {
            return Err(SchemaError::ColumnInUse {
                table: self.name.clone(),
                column: name.to_string(),
                used_by,
            });
        }
        Ok(self.columns.remove(position))
    }

    /// Replaces a column in place. A column that changes name must not be
    /// referenced by any constraint.
    pub(crate) fn replace_column(&mut self, name: &str, column: Column) -> Result<(), SchemaError> {
        let position = self.require_column(name)?;
        if !column.name.eq_ignore_ascii_case(name) {
            if let Some(used_by) = self.column_user(name) {
                return Err(SchemaError::ColumnInUse {
                    table: self.name.clone(),
                    column: name.to_string(),
                    used_by,
                });
            }
        }
        self.check_column(&column, Some(position))?;
        self.columns[position] = column;
        Ok(())
    }

    /// Removes an index; `PRIMARY` removes the primary key.
    pub(crate) fn remove_index(&mut self, name: &str) -> Result<Index, SchemaError> {
        if name.eq_ignore_ascii_case(PRIMARY_KEY_NAME) {
            if let Some(pk) = self.primary_key.take() {
                return Ok(pk);
            }
        } else if let Some(at) = self
            .indexes
            .iter()
            .position(|i| i.name.eq_ignore_ascii_case(name))
        {
            return Ok(self.indexes.remove(at));
        }
        Err(SchemaError::UnknownIndex {
            table: self.name.clone(),
            index: name.to_string(),
        })
    }

    pub(crate) fn remove_foreign_key(&mut self, name: &str) -> Result<ForeignKey, SchemaError> {
        match self
            .foreign_keys
            .iter()
            .position(|fk| fk.name.eq_ignore_ascii_case(name))
        {
            Some(at) => Ok(self.foreign_keys.remove(at)),
            None => Err(SchemaError::UnknownForeignKey {
                table: self.name.clone(),
                foreign_key: name.to_string(),
            }),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn check_column(&self, column: &Column, replacing: Option<usize>) -> Result<(), SchemaError> {
        let duplicate = self
            .columns
            .iter()
            .enumerate()
            .any(|(i, c)| Some(i) != replacing && c.name.eq_ignore_ascii_case(&column.name));
        if duplicate {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name.clone(),
            });
        }
        if column.kind == ColumnKind::Enumeration && column.enum_values.is_empty() {
            return Err(SchemaError::EmptyEnumeration {
                table: self.name.clone(),
                column: column.name.clone(),
            });
        }
        Ok(())
    }

    fn require_column(&self, name: &str) -> Result<usize, SchemaError> {
        self.column_position(name)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Maps constraint column names to the declared spelling.
    fn resolve_columns(&self, names: &[String], owner: &str) -> Result<Vec<String>, SchemaError> {
        names
            .iter()
            .map(|name| {
                self.column(name)
                    .map(|c| c.name.clone())
                    .ok_or_else(|| SchemaError::UnresolvedReference {
                        table: self.name.clone(),
                        owner: owner.to_string(),
                        column: name.clone(),
                    })
            })
            .collect()
    }

    /// Describes the first constraint that uses `column`.
    fn column_user(&self, column: &str) -> Option<String> {
        let uses = |columns: &[String]| columns.iter().any(|c| c.eq_ignore_ascii_case(column));
        if let Some(index) = self.all_indexes().find(|i| uses(&i.columns)) {
            return Some(if index.is_primary() {
                "the primary key".to_string()
            } else {
                format!("index `{}`", index.name)
            });
        }
        self.foreign_keys
            .iter()
            .find(|fk| uses(&fk.columns))
            .map(|fk| format!("foreign key `{}`", fk.name))
    }
}
