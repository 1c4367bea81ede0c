//! End-to-end runs over dump files.

mod common;
use common::*;

use dbdiff::output::{append_sql, render, sql_block};
use dbdiff::runner::ignore_pattern;
use dbdiff::{run_all, DiffError, Format, LoadOptions};

const SHOP_V1: &str = "
CREATE TABLE `customer` (`id` INT NOT NULL, `name` VARCHAR(50), PRIMARY KEY (`id`));
CREATE TABLE `tmp_x` (`a` INT);
";

const SHOP_V2: &str = "
CREATE TABLE `customer` (`id` INT NOT NULL, `name` VARCHAR(50), `email` VARCHAR(100), PRIMARY KEY (`id`));
CREATE TABLE `TMP_y` (`b` INT);
";

#[tokio::test]
async fn groups_are_reported_in_configuration_order() {
    let ws = Workspace::new();
    ws.write("v1.sql", SHOP_V1);
    ws.write("v2.sql", SHOP_V2);
    let config = ws.config(&[
        ("upgrade", "v1.sql", "v2.sql"),
        ("same", "v1.sql", "v1.sql"),
    ]);

    let outcomes = run_all(&config, &LoadOptions::default(), None).await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].name, "upgrade");
    assert_eq!(outcomes[0].header(), "===== File: v1.sql => File: v2.sql =====");
    assert!(outcomes[0].diff.has_difference());
    assert_eq!(outcomes[1].name, "same");
    assert!(outcomes[1].diff.is_empty());
}

#[tokio::test]
async fn ignored_tables_are_removed_from_both_sides() {
    let ws = Workspace::new();
    ws.write("v1.sql", SHOP_V1);
    ws.write("v2.sql", SHOP_V2);
    let config = ws.config(&[("upgrade", "v1.sql", "v2.sql")]);

    let ignore = ignore_pattern("^tmp_").unwrap();
    let outcomes = run_all(&config, &LoadOptions::default(), Some(&ignore))
        .await
        .unwrap();
    let diff = &outcomes[0].diff;
    assert!(diff.added_tables.is_empty());
    assert!(diff.removed_tables.is_empty());
    assert_eq!(diff.changed_tables.len(), 1);
    assert_eq!(diff.changed_tables[0].name, "customer");

    let sql = render(&outcomes, Format::Sql).unwrap();
    assert!(sql.contains("ALTER TABLE `customer` ADD COLUMN `email` VARCHAR(100);"));
    assert!(!sql.to_lowercase().contains("tmp_"));
}

#[tokio::test]
async fn output_file_accumulates_blocks() {
    let ws = Workspace::new();
    ws.write("v1.sql", SHOP_V1);
    ws.write("v2.sql", SHOP_V2);
    let config = ws.config(&[("upgrade", "v1.sql", "v2.sql")]);
    let outcomes = run_all(&config, &LoadOptions::default(), None).await.unwrap();

    let out = ws.path("migration.sql");
    append_sql(&out, &outcomes).unwrap();
    append_sql(&out, &outcomes).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let block = sql_block(&outcomes[0]);
    assert_eq!(written, format!("{block}{block}"));
    assert_eq!(
        written.matches("===== File: v1.sql => File: v2.sql =====").count(),
        2
    );
}

#[tokio::test]
async fn strict_mode_rejects_malformed_dumps() {
    let ws = Workspace::new();
    ws.write("good.sql", SHOP_V1);
    ws.write(
        "bad.sql",
        "CREATE TABLE `a` (`x` INT); CREATE TABLE `b` (`y` WIBBLE WOBBLE);",
    );
    let config = ws.config(&[("broken", "good.sql", "bad.sql")]);

    let lenient = run_all(&config, &LoadOptions::default(), None).await.unwrap();
    assert_eq!(lenient[0].diff.added_tables.len(), 1);

    let strict = LoadOptions {
        strict: true,
        ..LoadOptions::default()
    };
    let err = run_all(&config, &strict, None).await.unwrap_err();
    assert!(matches!(err, DiffError::Load { ref group, .. } if group == "broken"));
}

#[tokio::test]
async fn missing_dump_is_an_io_error() {
    let ws = Workspace::new();
    ws.write("v1.sql", SHOP_V1);
    let config = ws.config(&[("missing", "v1.sql", "nowhere.sql")]);

    let err = run_all(&config, &LoadOptions::default(), None).await.unwrap_err();
    assert!(matches!(err, DiffError::Io { ref path, .. } if path.ends_with("nowhere.sql")));
}

#[test]
fn invalid_configuration() {
    let ws = Workspace::new();
    let path = ws.write("dbdiff.json", r#"{"groups": [{"name": "x"}]}"#);
    let err = dbdiff::Config::load(&path).unwrap_err();
    assert!(matches!(err, DiffError::Config { .. }));
}
