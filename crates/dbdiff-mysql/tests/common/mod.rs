#![allow(dead_code)]

use dbdiff_mysql::{ColumnRow, ForeignKeyRow, IndexRow};

pub fn column(table: &str, name: &str, column_type: &str) -> ColumnRow {
    ColumnRow {
        table: table.into(),
        name: name.into(),
        column_type: column_type.into(),
        nullable: true,
        default: None,
        extra: String::new(),
        comment: String::new(),
    }
}

pub fn not_null(row: ColumnRow) -> ColumnRow {
    ColumnRow {
        nullable: false,
        ..row
    }
}

pub fn index(table: &str, name: &str, non_unique: bool, columns: &[&str]) -> Vec<IndexRow> {
    columns
        .iter()
        .zip(1..)
        .map(|(column, position)| IndexRow {
            table: table.into(),
            name: name.into(),
            non_unique,
            index_type: "BTREE".into(),
            position,
            column: (*column).into(),
        })
        .collect()
}

pub fn foreign_key(
    table: &str,
    name: &str,
    column: &str,
    referenced_table: &str,
    referenced_column: &str,
    update_rule: &str,
) -> ForeignKeyRow {
    ForeignKeyRow {
        table: table.into(),
        name: name.into(),
        position: 1,
        column: column.into(),
        referenced_table: referenced_table.into(),
        referenced_column: referenced_column.into(),
        update_rule: update_rule.into(),
        delete_rule: "NO ACTION".into(),
    }
}
