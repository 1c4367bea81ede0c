//! Per-group pipeline: load both sides, drop ignored tables, diff.

use dbdiff_core::{diff, Schema, SchemaDiff};
use futures::future::try_join_all;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::info;

use crate::config::{Config, Group};
use crate::error::Result;
use crate::source::{load_schema, LoadOptions};

/// The result of diffing one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    pub name: String,
    /// Description of the "from" side.
    pub from: String,
    /// Description of the "to" side.
    pub to: String,
    pub diff: SchemaDiff,
}

impl GroupOutcome {
    /// The `===== from => to =====` line that introduces the group.
    #[must_use]
    pub fn header(&self) -> String {
        format!("===== {} => {} =====", self.from, self.to)
    }
}

/// Compiles an ignore-table pattern. Matching is case-insensitive.
///
/// # Errors
///
/// Returns the regex error for an invalid pattern.
pub fn ignore_pattern(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Returns `schema` without the tables whose name matches `ignore`.
#[must_use]
pub fn filter_tables(schema: &Schema, ignore: Option<&Regex>) -> Schema {
    ignore.map_or_else(
        || schema.clone(),
        |pattern| schema.without_tables(|table| pattern.is_match(table.name())),
    )
}

/// Runs one group. Both sides are loaded one after the other.
///
/// # Errors
///
/// Returns the first load error.
pub async fn run_group(
    group: &Group,
    config: &Config,
    options: &LoadOptions,
    ignore: Option<&Regex>,
) -> Result<GroupOutcome> {
    info!(group = %group.name, "comparing {} => {}", group.from.description(), group.to.description());
    let from = load_schema(&group.name, &group.from, config, options).await?;
    let to = load_schema(&group.name, &group.to, config, options).await?;

    let diff = diff(&filter_tables(&from, ignore), &filter_tables(&to, ignore));
    info!(
        group = %group.name,
        added = diff.added_tables.len(),
        removed = diff.removed_tables.len(),
        changed = diff.changed_tables.len(),
        "group compared"
    );
    Ok(GroupOutcome {
        name: group.name.clone(),
        from: group.from.description(),
        to: group.to.description(),
        diff,
    })
}

/// Runs every group concurrently. Outcomes keep configuration order.
///
/// # Errors
///
/// Returns the first error of any group.
pub async fn run_all(
    config: &Config,
    options: &LoadOptions,
    ignore: Option<&Regex>,
) -> Result<Vec<GroupOutcome>> {
    try_join_all(
        config
            .groups
            .iter()
            .map(|group| run_group(group, config, options, ignore)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbdiff_core::parse_schema;

    #[test]
    fn test_ignore_pattern_is_case_insensitive() {
        let schema = parse_schema(
            "CREATE TABLE tmp_x (a INT); CREATE TABLE TMP_y (a INT); CREATE TABLE keep_tmp_ (a INT);",
        )
        .unwrap();
        let pattern = ignore_pattern("^tmp_").unwrap();
        let filtered = filter_tables(&schema, Some(&pattern));
        let names: Vec<&str> = filtered.tables().map(dbdiff_core::Table::name).collect();
        assert_eq!(names, ["keep_tmp_"]);
        assert_eq!(filter_tables(&schema, None), schema);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ignore_pattern("(unclosed").is_err());
    }
}
