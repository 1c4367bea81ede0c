//! Tests for building the schema model from DDL.

mod common;
use common::*;

use dbdiff_core::schema::{DefaultValue, IndexKind, ReferentialAction};
use dbdiff_core::{ColumnKind, Diagnostic, SchemaBuilder, TypeMapping};

#[test]
fn simple_table() {
    let t = table(
        "CREATE TABLE t (id INT AUTO_INCREMENT, name VARCHAR(50) NOT NULL, PRIMARY KEY(id))",
    );
    assert_eq!(t.name(), "t");
    assert_eq!(t.columns().len(), 2);

    let id = t.column("id").unwrap();
    assert_eq!(id.kind, ColumnKind::Integer);
    assert!(id.autoincrement);
    assert!(!id.nullable);

    let name = t.column("name").unwrap();
    assert_eq!(name.kind, ColumnKind::String);
    assert_eq!(name.length, Some(50));
    assert!(!name.fixed);

    assert_eq!(t.primary_key().unwrap().columns, ["id"]);
}

#[test]
fn enumeration_column() {
    let t = table("CREATE TABLE t (c ENUM('red','blue') NOT NULL)");
    let c = t.column("c").unwrap();
    assert_eq!(c.kind, ColumnKind::Enumeration);
    assert_eq!(c.enum_values, ["red", "blue"]);
    assert!(!c.nullable);
}

#[test]
fn foreign_key_default_actions() {
    let t = table(
        "CREATE TABLE user (user_id INT, \
         FOREIGN KEY (user_id) REFERENCES club(club_id) ON UPDATE CASCADE)",
    );
    let fk = &t.foreign_keys()[0];
    assert_eq!(fk.name, "user_ibfk_1");
    assert_eq!(fk.on_update, ReferentialAction::Cascade);
    assert_eq!(fk.on_delete, ReferentialAction::NoAction);
}

#[test]
fn fixed_and_length_rules() {
    let t = table(
        "CREATE TABLE t (\
         code CHAR(2), flag CHAR, label VARCHAR(20), \
         hash BINARY(16), data VARBINARY(64), body BLOB, \
         price DECIMAL(8,2), amount DECIMAL, total NUMERIC(12))",
    );
    let col = |name: &str| t.column(name).unwrap();
    assert!(col("code").fixed);
    assert_eq!(col("code").length, Some(2));
    assert_eq!(col("flag").length, Some(1));
    assert!(!col("label").fixed);
    assert!(col("hash").fixed);
    assert!(!col("data").fixed);
    assert_eq!(col("data").length, Some(64));
    assert!(!col("body").fixed);
    assert_eq!(col("body").type_name, "blob");
    assert_eq!((col("price").precision, col("price").scale), (Some(8), Some(2)));
    assert_eq!((col("amount").precision, col("amount").scale), (Some(10), Some(0)));
    assert_eq!((col("total").precision, col("total").scale), (Some(12), Some(0)));
}

#[test]
fn inline_keys_and_generated_index_names() {
    let t = table(
        "CREATE TABLE t (id INT PRIMARY KEY, email VARCHAR(100) UNIQUE, \
         tag INT, KEY (tag), KEY email (email, tag))",
    );
    assert_eq!(t.primary_key().unwrap().columns, ["id"]);
    assert!(!t.column("id").unwrap().nullable);
    // The explicit `email` name wins; the inline UNIQUE takes `email_2`.
    assert_eq!(t.index("email").unwrap().columns, ["email", "tag"]);
    assert_eq!(t.index("email_2").unwrap().kind, IndexKind::Unique);
    assert_eq!(t.index("tag").unwrap().columns, ["tag"]);
}

#[test]
fn unmappable_type_is_a_warning() {
    let mapping = TypeMapping::mysql();
    let output = SchemaBuilder::new(&mapping)
        .build("CREATE TABLE t (b BIT(8), u UUID)")
        .unwrap();
    let t = output.schema.table("t").unwrap();
    assert_eq!(t.column("b").unwrap().kind, ColumnKind::Other);
    assert_eq!(t.column("b").unwrap().length, Some(8));
    assert_eq!(output.diagnostics.len(), 2);
    assert!(matches!(
        &output.diagnostics[1],
        Diagnostic::UnmappableType { column, type_name, .. } if column == "u" && type_name == "uuid"
    ));
}

#[test]
fn custom_type_mapping() {
    let mapping = TypeMapping::mysql().with_type("uuid", ColumnKind::String, "string");
    let output = SchemaBuilder::new(&mapping)
        .build("CREATE TABLE t (u UUID)")
        .unwrap();
    assert!(output.diagnostics.is_empty());
    assert_eq!(
        output.schema.table("t").unwrap().column("u").unwrap().kind,
        ColumnKind::String
    );
}

#[test]
fn database_name_filters_qualified_tables() {
    let mapping = TypeMapping::mysql();
    let output = SchemaBuilder::new(&mapping)
        .database("shop")
        .build("CREATE TABLE shop.a (x INT); CREATE TABLE other.b (x INT); CREATE TABLE c (x INT);")
        .unwrap();
    assert_eq!(output.schema.name(), Some("shop"));
    let names: Vec<_> = output.schema.tables().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn dump_fixture() {
    let mapping = TypeMapping::mysql();
    let output = SchemaBuilder::new(&mapping)
        .database("testdb")
        .build(&fixture("simple-structure.sql"))
        .unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    let schema = output.schema;
    assert_eq!(schema.name(), Some("testdb"));
    assert_eq!(schema.len(), 2);

    let user = schema.table("user").unwrap();
    assert_eq!(user.columns().len(), 16);

    let fk = user.foreign_key("fk_club").unwrap();
    assert_eq!(fk.columns, ["user_id"]);
    assert_eq!(fk.referenced_table, "club");
    assert_eq!(fk.referenced_columns, ["club_id"]);
    assert_eq!(fk.on_update, ReferentialAction::Cascade);
    assert_eq!(fk.on_delete, ReferentialAction::NoAction);
    // Foreign keys do not create indexes of their own.
    assert!(user.index("fk_club").is_none());
    assert!(user.index("fk_club_idx").is_some());
    assert_eq!(
        user.index("fulltext_street").unwrap().kind,
        IndexKind::Fulltext
    );

    let user_id = user.column("user_id").unwrap();
    assert!(user_id.autoincrement);
    assert_eq!(user_id.comment, None);
    assert_eq!(user_id.kind, ColumnKind::Integer);

    let login_name = user.column("login_name").unwrap();
    assert!(!login_name.autoincrement);
    assert_eq!(login_name.comment.as_deref(), Some("name for login"));
    assert!(!login_name.nullable);
    assert_eq!(login_name.length, Some(50));
    assert_eq!(login_name.default, None);
    assert_eq!(login_name.kind, ColumnKind::String);

    let club = schema.table("club").unwrap();
    assert_eq!(club.columns().len(), 3);
    let rating = club.column("rating").unwrap();
    assert_eq!(rating.kind, ColumnKind::Decimal);
    assert_eq!((rating.precision, rating.scale), (Some(2), Some(1)));
    assert_eq!(
        club.column("category").unwrap().default,
        Some(DefaultValue::String("test".into()))
    );
}
