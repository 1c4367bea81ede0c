//! Tests for parsing `CREATE TABLE` statements into the AST.

mod common;
use common::*;

use dbdiff_core::ast::{
    ColumnOption, CreateDefinition, IndexKind, Literal, ReferentialAction, Statement, TypeArgs,
};
use dbdiff_core::Parser;

#[test]
fn create_table_with_inline_options_and_primary_key() {
    let stmt = parse_table(
        "CREATE TABLE t (id INT AUTO_INCREMENT, name VARCHAR(50) NOT NULL, PRIMARY KEY(id))",
    );
    assert_eq!(stmt.name, "t");
    let columns: Vec<_> = stmt.columns().collect();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].data_type.name, "INT");
    assert!(columns[0].has_option(|o| matches!(o, ColumnOption::AutoIncrement)));
    assert_eq!(columns[1].data_type.args, TypeArgs::Length(50));
    assert_eq!(columns[1].options, vec![ColumnOption::NotNull]);
    assert!(stmt
        .definitions
        .iter()
        .any(|d| matches!(d, CreateDefinition::PrimaryKey(pk) if pk.columns == ["id"])));
}

#[test]
fn temporary_and_if_not_exists() {
    let stmt = parse_table("CREATE TEMPORARY TABLE IF NOT EXISTS `tmp` (a INT)");
    assert!(stmt.temporary);
    assert!(stmt.if_not_exists);
    assert_eq!(stmt.name, "tmp");
}

#[test]
fn foreign_key_actions_in_any_order() {
    let stmt = parse_table(
        "CREATE TABLE user (user_id INT, \
         CONSTRAINT fk_club FOREIGN KEY (user_id) REFERENCES club(club_id) ON UPDATE CASCADE)",
    );
    let fk = stmt
        .definitions
        .iter()
        .find_map(|d| match d {
            CreateDefinition::ForeignKey(fk) => Some(fk),
            _ => None,
        })
        .unwrap();
    assert_eq!(fk.name.as_deref(), Some("fk_club"));
    assert_eq!(fk.referenced_table, "club");
    assert_eq!(fk.referenced_columns, ["club_id"]);
    assert_eq!(fk.on_update, Some(ReferentialAction::Cascade));
    assert_eq!(fk.on_delete, None);

    let stmt = parse_table(
        "CREATE TABLE a (b INT, FOREIGN KEY (b) REFERENCES c (d) \
         ON UPDATE SET NULL ON DELETE RESTRICT)",
    );
    let CreateDefinition::ForeignKey(fk) = &stmt.definitions[1] else {
        panic!("expected a foreign key, got {:?}", stmt.definitions[1]);
    };
    assert_eq!(fk.name, None);
    assert_eq!(fk.on_update, Some(ReferentialAction::SetNull));
    assert_eq!(fk.on_delete, Some(ReferentialAction::Restrict));
}

#[test]
fn index_clauses() {
    let stmt = parse_table(
        "CREATE TABLE t (a INT, b TEXT, \
         UNIQUE KEY uniq_a (a), \
         KEY (a, b), \
         FULLTEXT INDEX ft_b (b) WITH PARSER ngram, \
         INDEX idx_prefix USING BTREE (b(10) DESC) COMMENT 'prefix')",
    );
    let indexes: Vec<_> = stmt
        .definitions
        .iter()
        .filter_map(|d| match d {
            CreateDefinition::Index(index) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(indexes.len(), 4);
    assert_eq!(indexes[0].name.as_deref(), Some("uniq_a"));
    assert_eq!(indexes[0].kind, IndexKind::Unique);
    assert_eq!(indexes[1].name, None);
    assert_eq!(indexes[1].columns, ["a", "b"]);
    assert_eq!(indexes[2].kind, IndexKind::Fulltext);
    assert_eq!(indexes[3].name.as_deref(), Some("idx_prefix"));
    assert_eq!(indexes[3].columns, ["b"]);
}

#[test]
fn enum_and_set_values() {
    let stmt = parse_table("CREATE TABLE t (c ENUM('red','blue') NOT NULL, s SET('a','b''c'))");
    let columns: Vec<_> = stmt.columns().collect();
    assert_eq!(
        columns[0].data_type.args,
        TypeArgs::Values(vec!["red".into(), "blue".into()])
    );
    assert_eq!(
        columns[1].data_type.args,
        TypeArgs::Values(vec!["a".into(), "b'c".into()])
    );
}

#[test]
fn default_values() {
    let stmt = parse_table(
        "CREATE TABLE t (\
         a INT DEFAULT -1, \
         b VARCHAR(5) DEFAULT _utf8mb4'x', \
         c DATETIME DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP, \
         d INT DEFAULT NULL)",
    );
    let defaults: Vec<_> = stmt
        .columns()
        .map(|c| {
            c.options.iter().find_map(|o| match o {
                ColumnOption::Default(literal) => Some(literal.clone()),
                _ => None,
            })
        })
        .collect();
    assert_eq!(defaults[0], Some(Literal::Number("-1".into())));
    assert_eq!(defaults[1], Some(Literal::String("x".into())));
    assert_eq!(
        defaults[2],
        Some(Literal::Expression("CURRENT_TIMESTAMP".into()))
    );
    assert_eq!(defaults[3], Some(Literal::Null));
}

#[test]
fn dump_noise_is_skipped() {
    let sql = "/*!40101 SET NAMES utf8 */;\n\
               -- comment\n\
               DROP TABLE IF EXISTS `t`;\n\
               CREATE TABLE `t` (`a` int(11)) ENGINE=InnoDB DEFAULT CHARSET=utf8;\n\
               INSERT INTO `t` VALUES (1),(2);";
    let statements: Vec<_> = Parser::new(sql).collect::<Result<_, _>>().unwrap();
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], Statement::Other(_)));
    assert!(matches!(statements[1], Statement::CreateTable(_)));
    assert!(matches!(statements[2], Statement::Other(_)));
}
