//! # dbdiff-core
//!
//! Structural comparison of MySQL schemas.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for `CREATE TABLE`
//! - A schema model whose invariants are checked on construction
//! - A schema builder driven by an explicit [`TypeMapping`]
//! - A diff engine with table, column, index and foreign key rename detection
//! - Serializers: MySQL `ALTER` statements and a human-readable report
//!
//! ## Example
//!
//! ```rust
//! use dbdiff_core::{diff, parse_schema, MySqlDialect, SqlDialect};
//!
//! let from = parse_schema("CREATE TABLE t (id INT, name VARCHAR(50));").unwrap();
//! let to = parse_schema("CREATE TABLE t (id INT, name VARCHAR(50), email TEXT);").unwrap();
//!
//! let delta = diff(&from, &to);
//! assert_eq!(
//!     MySqlDialect::new().diff_statements(&delta),
//!     vec!["ALTER TABLE `t` ADD COLUMN `email` TEXT"]
//! );
//! ```

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod schema;

pub use builder::{parse_schema, BuildOutput, Diagnostic, SchemaBuilder, TypeMapping};
pub use dialect::{MySqlDialect, SqlDialect};
pub use diff::{diff, SchemaDiff, TableDiff};
pub use error::{Error, Result};
pub use parser::{ParseError, Parser};
pub use report::{render_report, Report};
pub use schema::{Column, ColumnKind, ForeignKey, Index, Schema, SchemaError, Table};
