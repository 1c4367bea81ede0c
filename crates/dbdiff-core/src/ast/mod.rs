//! Abstract Syntax Tree (AST) types for `CREATE TABLE` scripts.
//!
//! Create-definitions are a closed set of tagged variants so the schema
//! builder can match them exhaustively.

mod statement;
mod types;

pub use statement::{
    CreateDefinition, CreateTableStatement, ForeignKeyDef, IndexDef, IndexKind, PrimaryKeyDef,
    ReferentialAction, Statement,
};
pub use types::{ColumnDef, ColumnOption, DataTypeSpec, Literal, TypeArgs};
