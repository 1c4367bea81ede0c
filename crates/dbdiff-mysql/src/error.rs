//! Error types for catalog access.

use dbdiff_core::SchemaError;

/// Errors that can occur while reading a live catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Database error while connecting or querying.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A `COLUMN_TYPE` the DDL parser does not accept.
    #[error("Invalid column type `{column_type}` for {table}.{column}: {source}")]
    ColumnType {
        /// Owning table.
        table: String,
        /// The column.
        column: String,
        /// The type as reported by the catalog.
        column_type: String,
        /// The parser's complaint.
        source: dbdiff_core::Error,
    },

    /// The catalog rows violate a schema invariant.
    #[error("Inconsistent catalog: {0}")]
    Schema(#[from] SchemaError),
}
