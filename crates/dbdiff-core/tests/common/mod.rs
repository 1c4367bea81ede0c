#![allow(dead_code)]

use std::path::PathBuf;

use dbdiff_core::ast::{CreateTableStatement, Statement};
use dbdiff_core::{parse_schema, Error, Parser, Schema, Table};

pub fn parse_table(sql: &str) -> CreateTableStatement {
    match Parser::new(sql).next() {
        Some(Ok(Statement::CreateTable(stmt))) => stmt,
        other => panic!("Expected CREATE TABLE for: {sql}\nGot: {other:?}"),
    }
}

pub fn parse_err(sql: &str) -> Error {
    match Parser::new(sql).next() {
        Some(Err(err)) => err,
        other => panic!("Expected error for: {sql}\nGot: {other:?}"),
    }
}

pub fn schema(sql: &str) -> Schema {
    parse_schema(sql).unwrap_or_else(|e| panic!("Failed to build: {sql}\nError: {e}"))
}

pub fn table(sql: &str) -> Table {
    let schema = schema(sql);
    assert_eq!(schema.len(), 1, "expected exactly one table in: {sql}");
    let table = schema
        .tables()
        .next()
        .cloned()
        .unwrap_or_else(|| panic!("no table in: {sql}"));
    table
}

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}
