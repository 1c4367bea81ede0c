//! Schema model invariant violations.

/// A schema model invariant was violated while building or mutating a
/// schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// An index, primary key or foreign key names a column absent from
    /// its table.
    #[error("{owner} on table `{table}` references unknown column `{column}`")]
    UnresolvedReference {
        /// Owning table.
        table: String,
        /// The referencing object, e.g. ``index `idx_name` ``.
        owner: String,
        /// The missing column.
        column: String,
    },

    /// Two tables share a name.
    #[error("table `{0}` is defined more than once")]
    DuplicateTable(String),

    /// Two columns of a table share a name.
    #[error("column `{column}` is defined more than once in table `{table}`")]
    DuplicateColumn {
        /// Owning table.
        table: String,
        /// Duplicated column name.
        column: String,
    },

    /// Two indexes of a table share a name.
    #[error("index `{index}` is defined more than once in table `{table}`")]
    DuplicateIndex {
        /// Owning table.
        table: String,
        /// Duplicated index name.
        index: String,
    },

    /// Two foreign keys of a table share a name.
    #[error("foreign key `{foreign_key}` is defined more than once in table `{table}`")]
    DuplicateForeignKey {
        /// Owning table.
        table: String,
        /// Duplicated constraint name.
        foreign_key: String,
    },

    /// A second primary key was declared.
    #[error("table `{0}` has more than one primary key")]
    DuplicatePrimaryKey(String),

    /// An enumeration column has an empty value list.
    #[error("enumeration column `{column}` in table `{table}` has no values")]
    EmptyEnumeration {
        /// Owning table.
        table: String,
        /// The column.
        column: String,
    },

    /// A foreign key's local and referenced column lists differ in length.
    #[error(
        "foreign key `{foreign_key}` on table `{table}` has {columns} columns \
         but references {referenced}"
    )]
    ForeignKeyArity {
        /// Owning table.
        table: String,
        /// Constraint name.
        foreign_key: String,
        /// Number of local columns.
        columns: usize,
        /// Number of referenced columns.
        referenced: usize,
    },

    /// A column cannot be removed or renamed while something refers to it.
    #[error("column `{column}` of table `{table}` is still used by {used_by}")]
    ColumnInUse {
        /// Owning table.
        table: String,
        /// The column.
        column: String,
        /// The referencing object.
        used_by: String,
    },

    /// No table of that name exists.
    #[error("unknown table `{0}`")]
    UnknownTable(String),

    /// No column of that name exists.
    #[error("unknown column `{column}` in table `{table}`")]
    UnknownColumn {
        /// Owning table.
        table: String,
        /// The column.
        column: String,
    },

    /// No index of that name exists.
    #[error("unknown index `{index}` in table `{table}`")]
    UnknownIndex {
        /// Owning table.
        table: String,
        /// The index.
        index: String,
    },

    /// No foreign key of that name exists.
    #[error("unknown foreign key `{foreign_key}` in table `{table}`")]
    UnknownForeignKey {
        /// Owning table.
        table: String,
        /// Constraint name.
        foreign_key: String,
    },
}
