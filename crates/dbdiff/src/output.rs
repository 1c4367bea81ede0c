//! Rendering group outcomes.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use clap::ValueEnum;
use dbdiff_core::{render_report, MySqlDialect, SqlDialect};
use serde::Serialize;

use crate::error::{DiffError, Result};
use crate::runner::GroupOutcome;

/// What to print for each group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Nested human-readable report.
    #[default]
    Report,
    /// Semicolon-terminated MySQL statements.
    Sql,
    /// The diff as JSON.
    Json,
}

/// Renders all outcomes for standard output.
///
/// # Errors
///
/// Only JSON serialization can fail.
pub fn render(outcomes: &[GroupOutcome], format: Format) -> Result<String> {
    if format == Format::Json {
        let mut out = serde_json::to_string_pretty(&JsonOutput { groups: outcomes })?;
        out.push('\n');
        return Ok(out);
    }

    let dialect = MySqlDialect::new();
    let mut out = String::new();
    for outcome in outcomes {
        out.push_str(&outcome.header());
        out.push_str("\n\n");
        if format == Format::Sql {
            out.push_str(&dialect.diff_script(&outcome.diff));
        } else {
            out.push_str(&render_report(&outcome.diff));
        }
        out.push('\n');
    }
    Ok(out)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    groups: &'a [GroupOutcome],
}

/// The block appended to an output file for one group: a blank-line
/// separated header followed by the migration script.
#[must_use]
pub fn sql_block(outcome: &GroupOutcome) -> String {
    format!(
        "\n\n{}\n\n{}",
        outcome.header(),
        MySqlDialect::new().diff_script(&outcome.diff)
    )
}

/// Appends the SQL block of every outcome to `path`, creating the file
/// if needed.
///
/// # Errors
///
/// Returns IO errors with the file path.
pub fn append_sql(path: &Path, outcomes: &[GroupOutcome]) -> Result<()> {
    let io_error = |source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    for outcome in outcomes {
        file.write_all(sql_block(outcome).as_bytes())
            .map_err(io_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbdiff_core::{diff, parse_schema};

    fn outcome() -> GroupOutcome {
        let from = parse_schema("CREATE TABLE t (a INT);").unwrap();
        let to = parse_schema("CREATE TABLE t (a INT, b INT);").unwrap();
        GroupOutcome {
            name: "g".into(),
            from: "File: a.sql".into(),
            to: "Database: shop@db".into(),
            diff: diff(&from, &to),
        }
    }

    #[test]
    fn test_sql_block() {
        assert_eq!(
            sql_block(&outcome()),
            "\n\n===== File: a.sql => Database: shop@db =====\n\n\
             ALTER TABLE `t` ADD COLUMN `b` INT;\n"
        );
    }

    #[test]
    fn test_render_sql() {
        let text = render(&[outcome()], Format::Sql).unwrap();
        assert_eq!(
            text,
            "===== File: a.sql => Database: shop@db =====\n\n\
             ALTER TABLE `t` ADD COLUMN `b` INT;\n\n"
        );
    }

    #[test]
    fn test_render_report() {
        let text = render(&[outcome()], Format::Report).unwrap();
        assert!(text.starts_with("===== File: a.sql => Database: shop@db =====\n\n"));
        assert!(text.contains("Changed tables"));
        assert!(text.contains("b: "));
    }

    #[test]
    fn test_render_json() {
        let text = render(&[outcome()], Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["groups"][0]["name"], "g");
        assert_eq!(
            value["groups"][0]["diff"]["changed_tables"][0]["added_columns"][0]["name"],
            "b"
        );
    }
}
