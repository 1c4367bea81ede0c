//! Assembly of `information_schema` rows into a schema model.
//!
//! Everything here is pure: rows are fetched by
//! [`MySqlIntrospector`](crate::MySqlIntrospector) and turned into a
//! [`Schema`] without touching the network, so the mapping can be tested
//! without a server.

use std::collections::BTreeMap;

use dbdiff_core::ast::{ColumnDef, ColumnOption, Literal};
use dbdiff_core::lexer::{Lexer, Span, Token, TokenKind};
use dbdiff_core::schema::{ForeignKey, Index, IndexKind, ReferentialAction, PRIMARY_KEY_NAME};
use dbdiff_core::{BuildOutput, Parser, Schema, SchemaBuilder, Table, TypeMapping};
use tracing::debug;

use crate::error::CatalogError;

/// One row of `information_schema.COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub table: String,
    pub name: String,
    /// Full type as MySQL prints it, e.g. `int(10) unsigned`.
    pub column_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    /// `EXTRA`, e.g. `auto_increment` or `DEFAULT_GENERATED`.
    pub extra: String,
    pub comment: String,
}

/// One row of `information_schema.STATISTICS`, i.e. one column of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub table: String,
    pub name: String,
    pub non_unique: bool,
    /// `BTREE`, `HASH`, `FULLTEXT` or `SPATIAL`.
    pub index_type: String,
    pub position: i64,
    pub column: String,
}

/// One column of a foreign key, from `KEY_COLUMN_USAGE` joined with
/// `REFERENTIAL_CONSTRAINTS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub table: String,
    pub name: String,
    pub position: i64,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub update_rule: String,
    pub delete_rule: String,
}

/// Everything read from the catalog for one database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRows {
    /// Base tables, by name.
    pub tables: Vec<String>,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnRow>,
    pub indexes: Vec<IndexRow>,
    pub foreign_keys: Vec<ForeignKeyRow>,
}

/// Builds the schema of `database` from catalog rows.
///
/// Column types are parsed with the DDL parser's column-type entry point
/// and built by the same routine as `CREATE TABLE` columns, so a live
/// database and a dump of it produce the same model.
///
/// # Errors
///
/// Fails if a `COLUMN_TYPE` cannot be parsed or the rows violate a schema
/// invariant.
pub fn assemble(
    rows: &CatalogRows,
    database: &str,
    mapping: &TypeMapping,
) -> Result<BuildOutput, CatalogError> {
    let builder = SchemaBuilder::new(mapping).database(database);
    let mut diagnostics = Vec::new();
    let mut tables: BTreeMap<String, Table> = rows
        .tables
        .iter()
        .map(|name| (name.clone(), Table::new(name)))
        .collect();

    for row in &rows.columns {
        let Some(table) = tables.get_mut(&row.table) else {
            debug!(table = %row.table, column = %row.name, "column of unknown table");
            continue;
        };
        let def = column_def(row)?;
        table.add_column(builder.build_column(&row.table, &def, &mut diagnostics))?;
    }

    // ---- Indexes ----
    let mut indexes: BTreeMap<(&str, &str), Vec<&IndexRow>> = BTreeMap::new();
    for row in &rows.indexes {
        indexes
            .entry((row.table.as_str(), row.name.as_str()))
            .or_default()
            .push(row);
    }
    for ((table_name, name), mut parts) in indexes {
        let Some(table) = tables.get_mut(table_name) else {
            continue;
        };
        parts.sort_by_key(|r| r.position);
        let columns = parts.iter().map(|r| r.column.clone()).collect();
        table.add_index(Index::new(name, index_kind(parts[0]), columns))?;
    }

    // ---- Foreign keys ----
    let mut foreign_keys: BTreeMap<(&str, &str), Vec<&ForeignKeyRow>> = BTreeMap::new();
    for row in &rows.foreign_keys {
        foreign_keys
            .entry((row.table.as_str(), row.name.as_str()))
            .or_default()
            .push(row);
    }
    for ((table_name, name), mut parts) in foreign_keys {
        let Some(table) = tables.get_mut(table_name) else {
            continue;
        };
        parts.sort_by_key(|r| r.position);
        let first = parts[0];
        let foreign_key = ForeignKey::new(
            name,
            parts.iter().map(|r| r.column.clone()).collect(),
            &first.referenced_table,
            parts.iter().map(|r| r.referenced_column.clone()).collect(),
        )
        .on_update(ReferentialAction::from_sql(&first.update_rule).unwrap_or_default())
        .on_delete(ReferentialAction::from_sql(&first.delete_rule).unwrap_or_default());
        table.add_foreign_key(foreign_key)?;
    }

    let mut schema = Schema::named(database);
    for table in tables.into_values() {
        schema.add_table(table)?;
    }
    Ok(BuildOutput {
        schema,
        diagnostics,
    })
}

/// Rebuilds the column definition MySQL would print for a row.
fn column_def(row: &ColumnRow) -> Result<ColumnDef, CatalogError> {
    let (data_type, mut options) =
        Parser::parse_column_type(&row.column_type).map_err(|source| {
            CatalogError::ColumnType {
                table: row.table.clone(),
                column: row.name.clone(),
                column_type: row.column_type.clone(),
                source,
            }
        })?;

    options.push(if row.nullable {
        ColumnOption::Null
    } else {
        ColumnOption::NotNull
    });
    if let Some(default) = &row.default {
        options.push(ColumnOption::Default(default_literal(default, &row.extra)));
    }
    if contains_word(&row.extra, "auto_increment") {
        options.push(ColumnOption::AutoIncrement);
    }
    if !row.comment.is_empty() {
        options.push(ColumnOption::Comment(row.comment.clone()));
    }

    Ok(ColumnDef {
        name: row.name.clone(),
        data_type,
        options,
        span: Span::default(),
    })
}

/// Interprets `COLUMN_DEFAULT`. MySQL reports strings unquoted and flags
/// expressions in `EXTRA`; MariaDB quotes strings and reports `NULL` as
/// text.
///
/// MySQL drops the parentheses an expression default is declared with, so
/// they are put back to match the `DEFAULT (uuid())` form of a dump.
/// Timestamp spellings are left to the builder, which canonicalizes them.
fn default_literal(default: &str, extra: &str) -> Literal {
    if let Some(text) = quoted_string(default) {
        return Literal::String(text);
    }
    if default.eq_ignore_ascii_case("NULL") {
        return Literal::Null;
    }
    if is_current_timestamp(default) {
        return Literal::Expression(default.to_string());
    }
    if contains_word(extra, "DEFAULT_GENERATED") {
        return Literal::Expression(if default.starts_with('(') {
            default.to_string()
        } else {
            format!("({default})")
        });
    }
    if default.parse::<i64>().is_ok() {
        return Literal::Number(default.to_string());
    }
    Literal::String(default.to_string())
}

/// Decodes a MariaDB-style `'...'` default with the DDL lexer, so escapes
/// are read exactly as in a dump.
fn quoted_string(default: &str) -> Option<String> {
    if !default.starts_with('\'') {
        return None;
    }
    let mut lexer = Lexer::new(default);
    match (lexer.next(), lexer.next()) {
        (
            Some(Ok(Token {
                kind: TokenKind::String(text),
                ..
            })),
            None,
        ) => Some(text),
        _ => None,
    }
}

fn is_current_timestamp(text: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    ["CURRENT_TIMESTAMP", "LOCALTIME", "NOW("]
        .iter()
        .any(|name| upper.starts_with(name))
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|w| w.eq_ignore_ascii_case(word))
}

fn index_kind(row: &IndexRow) -> IndexKind {
    if row.name.eq_ignore_ascii_case(PRIMARY_KEY_NAME) {
        return IndexKind::Primary;
    }
    match row.index_type.to_ascii_uppercase().as_str() {
        "FULLTEXT" => IndexKind::Fulltext,
        "SPATIAL" => IndexKind::Spatial,
        _ if !row.non_unique => IndexKind::Unique,
        _ => IndexKind::Plain,
    }
}
