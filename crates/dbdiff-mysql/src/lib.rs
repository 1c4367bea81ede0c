//! # dbdiff-mysql
//!
//! Reads the schema of a live MySQL database from `information_schema`
//! and assembles it into a [`dbdiff_core::Schema`].
//!
//! Column types go through the same parser and schema builder as dump
//! files, so a database and its dump compare equal.
//!
//! ```rust,no_run
//! use dbdiff_core::TypeMapping;
//! use dbdiff_mysql::{MySqlConnection, MySqlIntrospector};
//!
//! # async fn run() -> Result<(), dbdiff_mysql::CatalogError> {
//! let connection = MySqlConnection::new("root", "shop");
//! let introspector = MySqlIntrospector::connect(&connection).await?;
//! let output = introspector.introspect_schema(&TypeMapping::mysql()).await?;
//! println!("{} tables", output.schema.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod connection;
mod error;
mod introspect;

pub use catalog::{assemble, CatalogRows, ColumnRow, ForeignKeyRow, IndexRow};
pub use connection::{MySqlConnection, DEFAULT_PORT};
pub use error::CatalogError;
pub use introspect::MySqlIntrospector;
