//! Schema model.
//!
//! The in-memory representation of tables, columns, indexes and foreign
//! keys that both the DDL path and the live-catalog path produce, and that
//! the diff engine compares. A built [`Schema`] is not mutated in place;
//! filtering and diff application return new values.

mod column;
mod constraint;
mod error;
mod table;

use std::collections::BTreeMap;

use serde::Serialize;

pub use column::{Column, ColumnKind, DefaultValue};
pub use constraint::{ForeignKey, Index, IndexKind, ReferentialAction, PRIMARY_KEY_NAME};
pub use error::SchemaError;
pub use table::Table;

/// A named collection of tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Keyed by lower-cased table name.
    tables: BTreeMap<String, Table>,
}

impl Schema {
    /// Creates an empty, unnamed schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty schema for the named database.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tables: BTreeMap::new(),
        }
    }

    /// Returns the database name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a table.
    ///
    /// # Errors
    ///
    /// Fails if a table of the same name (case-insensitively) exists.
    pub fn add_table(&mut self, table: Table) -> Result<(), SchemaError> {
        let key = table.name().to_ascii_lowercase();
        if self.tables.contains_key(&key) {
            return Err(SchemaError::DuplicateTable(table.name().to_string()));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Looks up a table by name, case-insensitively.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&name.to_ascii_lowercase())
    }

    /// Iterates over the tables in lower-cased name order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the schema has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns a copy without the tables matching `predicate`.
    #[must_use]
    pub fn without_tables(&self, predicate: impl Fn(&Table) -> bool) -> Self {
        Self {
            name: self.name.clone(),
            tables: self
                .tables
                .iter()
                .filter(|(_, table)| !predicate(table))
                .map(|(key, table)| (key.clone(), table.clone()))
                .collect(),
        }
    }

    pub(crate) fn remove_table(&mut self, name: &str) -> Result<Table, SchemaError> {
        self.tables
            .remove(&name.to_ascii_lowercase())
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }
}
