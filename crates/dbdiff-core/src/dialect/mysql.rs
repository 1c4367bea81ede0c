//! MySQL dialect.

use super::SqlDialect;
use crate::diff::ColumnDiff;
use crate::lexer::quote_string;
use crate::schema::{Column, ColumnKind, Index};

/// Length used for a `VARCHAR` whose length is unknown.
const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// MySQL dialect for diff SQL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn column_type(&self, column: &Column) -> String {
        let mut sql = match column.kind {
            ColumnKind::Integer => match column.type_name.as_str() {
                "integer" => "INT".to_string(),
                other => other.to_ascii_uppercase(),
            },
            ColumnKind::Boolean => "TINYINT(1)".to_string(),
            ColumnKind::Decimal => format!(
                "DECIMAL({},{})",
                column.precision.unwrap_or(10),
                column.scale.unwrap_or(0)
            ),
            ColumnKind::Float => "DOUBLE".to_string(),
            ColumnKind::String => {
                let length = column.length.unwrap_or(DEFAULT_VARCHAR_LENGTH);
                if column.fixed {
                    format!("CHAR({length})")
                } else {
                    format!("VARCHAR({length})")
                }
            }
            ColumnKind::Text => "TEXT".to_string(),
            ColumnKind::Binary => match (column.type_name.as_str(), column.length) {
                ("binary", Some(length)) if column.fixed => format!("BINARY({length})"),
                ("binary", Some(length)) => format!("VARBINARY({length})"),
                _ => "BLOB".to_string(),
            },
            ColumnKind::DateTime => column.type_name.to_ascii_uppercase(),
            ColumnKind::Enumeration => format!(
                "{}({})",
                column.type_name.to_ascii_uppercase(),
                quote_values(&column.enum_values)
            ),
            ColumnKind::Geometry => "GEOMETRY".to_string(),
            ColumnKind::Json => "JSON".to_string(),
            ColumnKind::Other => {
                let name = column.type_name.to_ascii_uppercase();
                match (column.length, column.precision, column.scale) {
                    (Some(length), _, _) => format!("{name}({length})"),
                    (None, Some(p), Some(s)) => format!("{name}({p},{s})"),
                    _ if !column.enum_values.is_empty() => {
                        format!("{name}({})", quote_values(&column.enum_values))
                    }
                    _ => name,
                }
            }
        };
        if column.unsigned {
            sql.push_str(" UNSIGNED");
        }
        sql
    }

    fn rename_table(&self, from: &str, to: &str) -> String {
        format!(
            "RENAME TABLE {} TO {}",
            self.quote_identifier(from),
            self.quote_identifier(to)
        )
    }

    fn change_column(&self, table: &str, change: &ColumnDiff) -> String {
        format!(
            "ALTER TABLE {} CHANGE {} {}",
            self.quote_identifier(table),
            self.quote_identifier(&change.from.name),
            self.column_definition(&change.to)
        )
    }

    fn drop_index(&self, table: &str, index: &Index) -> String {
        if index.is_primary() {
            format!("ALTER TABLE {} DROP PRIMARY KEY", self.quote_identifier(table))
        } else {
            format!(
                "ALTER TABLE {} DROP INDEX {}",
                self.quote_identifier(table),
                self.quote_identifier(&index.name)
            )
        }
    }

    fn rename_index(&self, table: &str, from: &str, to: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME INDEX {} TO {}",
            self.quote_identifier(table),
            self.quote_identifier(from),
            self.quote_identifier(to)
        )
    }

    fn drop_foreign_key(&self, table: &str, name: &str) -> String {
        format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.quote_identifier(table),
            self.quote_identifier(name)
        )
    }
}

fn quote_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_string(v))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefaultValue, IndexKind};

    #[test]
    fn test_quote_identifier_doubles_backticks() {
        let d = MySqlDialect::new();
        assert_eq!(d.quote_identifier("user"), "`user`");
        assert_eq!(d.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_column_types() {
        let d = MySqlDialect::new();
        let cases = [
            (Column::new("a", ColumnKind::Integer, "integer").unsigned(), "INT UNSIGNED"),
            (Column::new("a", ColumnKind::Integer, "bigint"), "BIGINT"),
            (Column::new("a", ColumnKind::Boolean, "boolean"), "TINYINT(1)"),
            (
                Column::new("a", ColumnKind::Decimal, "decimal").with_precision(2, 1),
                "DECIMAL(2,1)",
            ),
            (
                Column::new("a", ColumnKind::String, "string").with_length(50),
                "VARCHAR(50)",
            ),
            (
                Column::new("a", ColumnKind::String, "string").with_length(2).fixed(),
                "CHAR(2)",
            ),
            (Column::new("a", ColumnKind::Binary, "blob"), "BLOB"),
            (Column::new("a", ColumnKind::DateTime, "datetime"), "DATETIME"),
            (
                Column::new("a", ColumnKind::Enumeration, "enum")
                    .with_enum_values(vec!["red".into(), "blue".into()]),
                "ENUM('red','blue')",
            ),
            (Column::new("a", ColumnKind::Other, "bit").with_length(8), "BIT(8)"),
        ];
        for (column, expected) in cases {
            assert_eq!(d.column_type(&column), expected);
        }
    }

    #[test]
    fn test_column_definition() {
        let d = MySqlDialect::new();
        let column = Column::new("login_name", ColumnKind::String, "string")
            .with_length(50)
            .not_null()
            .with_default(DefaultValue::String("guest".into()))
            .with_comment("name for login");
        assert_eq!(
            d.column_definition(&column),
            "`login_name` VARCHAR(50) NOT NULL DEFAULT 'guest' COMMENT 'name for login'"
        );
    }

    #[test]
    fn test_drop_index_statements() {
        let d = MySqlDialect::new();
        assert_eq!(
            d.drop_index("t", &Index::primary(vec!["id".into()])),
            "ALTER TABLE `t` DROP PRIMARY KEY"
        );
        assert_eq!(
            d.drop_index("t", &Index::new("idx", IndexKind::Plain, vec!["a".into()])),
            "ALTER TABLE `t` DROP INDEX `idx`"
        );
    }
}
