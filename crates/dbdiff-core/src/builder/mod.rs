//! Schema builder.
//!
//! Walks parsed `CREATE TABLE` statements and materializes the schema
//! model, resolving raw type names through a caller-supplied
//! [`TypeMapping`].
//!
//! # Example
//!
//! ```rust
//! use dbdiff_core::builder::{SchemaBuilder, TypeMapping};
//! use dbdiff_core::schema::ColumnKind;
//!
//! let mapping = TypeMapping::mysql();
//! let output = SchemaBuilder::new(&mapping)
//!     .build("CREATE TABLE t (id INT AUTO_INCREMENT, PRIMARY KEY (id));")
//!     .unwrap();
//!
//! let table = output.schema.table("t").unwrap();
//! assert_eq!(table.column("id").unwrap().kind, ColumnKind::Integer);
//! assert!(output.diagnostics.is_empty());
//! ```

mod mapping;

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

pub use mapping::{MappedType, TypeMapping};

use crate::ast::{
    ColumnDef, ColumnOption, CreateDefinition, CreateTableStatement, Literal, Statement, TypeArgs,
};
use crate::error::Error;
use crate::parser::Parser;
use crate::schema::{
    Column, ColumnKind, DefaultValue, ForeignKey, Index, IndexKind, Schema, SchemaError, Table,
    PRIMARY_KEY_NAME,
};

/// Default precision of a `DECIMAL` without arguments.
const DEFAULT_DECIMAL_PRECISION: u32 = 10;

/// A non-fatal problem met while building a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A statement that failed to lex or parse and was skipped.
    Rejected(Error),
    /// A column whose type the mapping does not know.
    UnmappableType {
        /// Owning table.
        table: String,
        /// The column.
        column: String,
        /// The raw type name.
        type_name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "statement skipped: {err}"),
            Self::UnmappableType {
                table,
                column,
                type_name,
            } => write!(f, "unmappable type `{type_name}` for column `{table}`.`{column}`"),
        }
    }
}

/// A built schema and the diagnostics recorded along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// The schema.
    pub schema: Schema,
    /// Non-fatal diagnostics, in script order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a [`Schema`] from DDL text.
#[derive(Debug, Clone)]
pub struct SchemaBuilder<'m> {
    mapping: &'m TypeMapping,
    database: Option<String>,
    strict: bool,
}

impl<'m> SchemaBuilder<'m> {
    /// Creates a lenient builder using `mapping`.
    #[must_use]
    pub const fn new(mapping: &'m TypeMapping) -> Self {
        Self {
            mapping,
            database: None,
            strict: false,
        }
    }

    /// Sets the database under inspection; it names the schema and tables
    /// qualified with another database are skipped.
    #[must_use]
    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    /// In strict mode the first lex or parse error aborts the build.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds a schema from a DDL script.
    ///
    /// # Errors
    ///
    /// Schema invariant violations are always returned. Lex and parse
    /// errors are returned in strict mode and recorded as
    /// [`Diagnostic::Rejected`] otherwise.
    pub fn build(&self, sql: &str) -> Result<BuildOutput, Error> {
        let mut schema = self
            .database
            .as_ref()
            .map_or_else(Schema::new, Schema::named);
        let mut diagnostics = Vec::new();

        let mut parser = Parser::new(sql);
        if let Some(database) = &self.database {
            parser = parser.with_database(database.clone());
        }

        for result in parser {
            match result {
                Ok(Statement::CreateTable(stmt)) => {
                    let table = self.build_table(&stmt, &mut diagnostics)?;
                    debug!(
                        table = %table.name(),
                        columns = table.columns().len(),
                        indexes = table.indexes().len(),
                        "built table"
                    );
                    schema.add_table(table)?;
                }
                Ok(Statement::Other(_)) => {}
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    warn!(error = %err, "skipping statement");
                    diagnostics.push(Diagnostic::Rejected(err));
                }
            }
        }

        Ok(BuildOutput {
            schema,
            diagnostics,
        })
    }

    /// Builds one table.
    ///
    /// # Errors
    ///
    /// Returns the first schema invariant the statement violates.
    pub fn build_table(
        &self,
        stmt: &CreateTableStatement,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Table, SchemaError> {
        let mut table = Table::new(&stmt.name);
        let mut inline_primary = None;
        let mut pending_indexes: Vec<(Option<String>, IndexKind, Vec<String>)> = Vec::new();

        for def in stmt.columns() {
            let column = self.build_column(&stmt.name, def, diagnostics);
            if inline_primary.is_none() && def.has_option(|o| matches!(o, ColumnOption::PrimaryKey))
            {
                inline_primary = Some(column.name.clone());
            }
            if def.has_option(|o| matches!(o, ColumnOption::Unique)) {
                pending_indexes.push((None, IndexKind::Unique, vec![column.name.clone()]));
            }
            table.add_column(column)?;
        }

        for def in &stmt.definitions {
            match def {
                CreateDefinition::PrimaryKey(pk) => table.set_primary_key(pk.columns.clone())?,
                CreateDefinition::Index(index) => {
                    pending_indexes.push((index.name.clone(), index.kind, index.columns.clone()));
                }
                CreateDefinition::Column(_) | CreateDefinition::ForeignKey(_) => {}
            }
        }
        if table.primary_key().is_none() {
            if let Some(column) = inline_primary {
                table.set_primary_key(vec![column])?;
            }
        }

        // Explicit names win; unnamed indexes take the first free
        // `<column>`, `<column>_2`, ... name.
        let mut taken: BTreeSet<String> = pending_indexes
            .iter()
            .filter_map(|(name, _, _)| name.as_ref().map(|n| n.to_ascii_lowercase()))
            .collect();
        taken.insert(PRIMARY_KEY_NAME.to_ascii_lowercase());
        for (name, kind, columns) in pending_indexes {
            let name = match name {
                Some(name) => name,
                None => {
                    let base = columns.first().map_or("index", String::as_str);
                    claim_name(base, &mut taken)
                }
            };
            table.add_index(Index::new(name, kind, columns))?;
        }

        let mut ordinal = 0;
        for def in &stmt.definitions {
            let CreateDefinition::ForeignKey(fk) = def else {
                continue;
            };
            let name = match &fk.name {
                Some(name) => name.clone(),
                None => loop {
                    ordinal += 1;
                    let candidate = format!("{}_ibfk_{ordinal}", stmt.name);
                    if table.foreign_key(&candidate).is_none() {
                        break candidate;
                    }
                },
            };
            let foreign_key = ForeignKey::new(
                name,
                fk.columns.clone(),
                &fk.referenced_table,
                fk.referenced_columns.clone(),
            )
            .on_update(fk.on_update.unwrap_or_default())
            .on_delete(fk.on_delete.unwrap_or_default());
            table.add_foreign_key(foreign_key)?;
        }

        Ok(table)
    }

    /// Builds one column. Table-level effects of the column's options
    /// (inline primary key, inline unique) are left to the caller.
    pub fn build_column(
        &self,
        table: &str,
        def: &ColumnDef,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Column {
        let raw = def.data_type.name.to_ascii_lowercase();
        let (kind, type_name) = if let Some(mapped) = self.mapping.resolve(&raw) {
            (mapped.kind, mapped.name.clone())
        } else {
            warn!(table, column = %def.name, type_name = %raw, "unmappable column type");
            diagnostics.push(Diagnostic::UnmappableType {
                table: table.to_string(),
                column: def.name.clone(),
                type_name: raw.clone(),
            });
            (ColumnKind::Other, raw.clone())
        };

        let mut column = Column::new(&def.name, kind, type_name);
        apply_type_args(&mut column, &raw, &def.data_type.args);

        for option in &def.options {
            match option {
                ColumnOption::Null => column.nullable = true,
                ColumnOption::NotNull => column.nullable = false,
                // ZEROFILL implies UNSIGNED.
                ColumnOption::Unsigned | ColumnOption::Zerofill => column.unsigned = true,
                ColumnOption::Default(literal) => column.default = convert_default(literal),
                ColumnOption::AutoIncrement => column.autoincrement = true,
                ColumnOption::Comment(text) => {
                    column.comment = (!text.is_empty()).then(|| text.clone());
                }
                ColumnOption::Collate(_)
                | ColumnOption::CharacterSet(_)
                | ColumnOption::OnUpdate(_)
                | ColumnOption::PrimaryKey
                | ColumnOption::Unique
                | ColumnOption::Generated(_) => {}
            }
        }
        column
    }
}

/// Builds a schema from a DDL script with the MySQL mapping, leniently.
///
/// # Errors
///
/// Returns schema invariant violations.
pub fn parse_schema(sql: &str) -> Result<Schema, Error> {
    let mapping = TypeMapping::mysql();
    SchemaBuilder::new(&mapping).build(sql).map(|out| out.schema)
}

fn apply_type_args(column: &mut Column, raw: &str, args: &TypeArgs) {
    match column.kind {
        ColumnKind::String | ColumnKind::Binary => {
            if let TypeArgs::Length(length) = args {
                column.length = Some(*length);
            }
            if matches!(column.type_name.as_str(), "string" | "binary") {
                column.fixed = !raw.contains("var");
                if column.fixed && column.length.is_none() {
                    column.length = Some(1);
                }
            }
        }
        ColumnKind::Decimal => {
            let (precision, scale) = match args {
                TypeArgs::Length(p) => (*p, 0),
                TypeArgs::PrecisionScale(p, s) => (*p, *s),
                TypeArgs::None | TypeArgs::Values(_) => (DEFAULT_DECIMAL_PRECISION, 0),
            };
            column.precision = Some(precision);
            column.scale = Some(scale);
        }
        ColumnKind::Enumeration => {
            if let TypeArgs::Values(values) = args {
                column.enum_values.clone_from(values);
            }
        }
        ColumnKind::Other => match args {
            TypeArgs::Length(length) => column.length = Some(*length),
            TypeArgs::PrecisionScale(p, s) => {
                column.precision = Some(*p);
                column.scale = Some(*s);
            }
            TypeArgs::Values(values) => column.enum_values.clone_from(values),
            TypeArgs::None => {}
        },
        // Display widths and fractional-second precision are not modeled.
        ColumnKind::Integer
        | ColumnKind::Float
        | ColumnKind::Text
        | ColumnKind::Boolean
        | ColumnKind::DateTime
        | ColumnKind::Geometry
        | ColumnKind::Json => {}
    }
}

fn convert_default(literal: &Literal) -> Option<DefaultValue> {
    match literal {
        Literal::Null => None,
        Literal::Number(text) => Some(
            text.parse::<i64>()
                .map_or_else(|_| DefaultValue::Expression(text.clone()), DefaultValue::Integer),
        ),
        Literal::String(text) => Some(DefaultValue::String(text.clone())),
        Literal::Expression(text) => Some(DefaultValue::expression(text)),
    }
}

fn claim_name(base: &str, taken: &mut BTreeSet<String>) -> String {
    let mut name = base.to_string();
    let mut suffix = 2;
    while taken.contains(&name.to_ascii_lowercase()) {
        name = format!("{base}_{suffix}");
        suffix += 1;
    }
    taken.insert(name.to_ascii_lowercase());
    name
}
