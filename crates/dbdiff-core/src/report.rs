//! Human-readable diff report.
//!
//! ```text
//! New tables
//!   * audit: id, at
//! Changed tables
//!   users => members
//!     Changed columns
//!       name
//!         * length: "50" => "100"
//! ```

use std::fmt::{self, Write};

use crate::diff::{ChangedProperty, SchemaDiff, TableDiff};
use crate::schema::{ForeignKey, Index};

/// A diff displayed as an indented text report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a SchemaDiff);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.0)
    }
}

/// Renders a diff as an indented text report. An empty diff renders as
/// `No differences`.
#[must_use]
pub fn render_report(diff: &SchemaDiff) -> String {
    Report(diff).to_string()
}

/// Writes the report for `diff` to `out`.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_report(out: &mut impl Write, diff: &SchemaDiff) -> fmt::Result {
    if diff.is_empty() {
        return writeln!(out, "No differences");
    }

    if !diff.added_tables.is_empty() {
        writeln!(out, "New tables")?;
        for table in &diff.added_tables {
            let columns: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
            writeln!(out, "  * {}: {}", table.name(), columns.join(", "))?;
        }
    }

    if !diff.removed_tables.is_empty() {
        writeln!(out, "Removed tables")?;
        for table in &diff.removed_tables {
            writeln!(out, "  * {}", table.name())?;
        }
    }

    if !diff.changed_tables.is_empty() {
        writeln!(out, "Changed tables")?;
        for table in &diff.changed_tables {
            write_table(out, table)?;
        }
    }
    Ok(())
}

fn write_table(out: &mut impl Write, table: &TableDiff) -> fmt::Result {
    match table.new_name {
        Some(ref new_name) => writeln!(out, "  {} => {new_name}", table.name)?,
        None => writeln!(out, "  {}", table.name)?,
    }

    // ---- Columns ----
    section(out, "Added columns", &table.added_columns, |c| {
        format!("{}: {}", c.name, c.type_summary())
    })?;
    if !table.changed_columns.is_empty() {
        writeln!(out, "    Changed columns")?;
        for change in &table.changed_columns {
            writeln!(out, "      {}", change.to.name)?;
            for property in &change.changed_properties {
                writeln!(
                    out,
                    "        * {property}: {} => {}",
                    display_value(*property, &property.value_of(&change.from)),
                    display_value(*property, &property.value_of(&change.to))
                )?;
            }
        }
    }
    section(out, "Renamed columns", &table.renamed_columns, |d| {
        format!("{} => {}", d.from.name, d.to.name)
    })?;
    section(out, "Removed columns", &table.removed_columns, |c| c.name.clone())?;

    // ---- Indexes ----
    section(out, "Added indexes", &table.added_indexes, describe_index)?;
    section(out, "Changed indexes", &table.changed_indexes, |d| {
        format!("{} => {}", describe_index(&d.from), describe_index(&d.to))
    })?;
    section(out, "Renamed indexes", &table.renamed_indexes, |d| {
        format!("{} => {}", d.from.name, d.to.name)
    })?;
    section(out, "Removed indexes", &table.removed_indexes, |i| i.name.clone())?;

    // ---- Foreign keys ----
    section(out, "Added foreign keys", &table.added_foreign_keys, describe_foreign_key)?;
    section(out, "Changed foreign keys", &table.changed_foreign_keys, |d| {
        describe_foreign_key(&d.to)
    })?;
    section(out, "Renamed foreign keys", &table.renamed_foreign_keys, |d| {
        format!("{} => {}", d.from.name, d.to.name)
    })?;
    section(out, "Removed foreign keys", &table.removed_foreign_keys, |fk| fk.name.clone())
}

fn section<T>(
    out: &mut impl Write,
    title: &str,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "    {title}")?;
    for item in items {
        writeln!(out, "      * {}", line(item))?;
    }
    Ok(())
}

fn describe_index(index: &Index) -> String {
    format!("{} {} ({})", index.name, index.kind.as_str(), index.columns.join(", "))
}

fn describe_foreign_key(fk: &ForeignKey) -> String {
    format!(
        "{}: ({}) => {} ({}) ON UPDATE {} ON DELETE {}",
        fk.name,
        fk.columns.join(", "),
        fk.referenced_table,
        fk.referenced_columns.join(", "),
        fk.on_update,
        fk.on_delete
    )
}

/// Flags print bare, absent values print empty, everything else quoted.
fn display_value(property: ChangedProperty, value: &str) -> String {
    match property {
        ChangedProperty::Nullable
        | ChangedProperty::Unsigned
        | ChangedProperty::Autoincrement
        | ChangedProperty::Fixed => value.to_string(),
        _ if value.is_empty() => String::new(),
        _ => format!("\"{value}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::schema::{Column, ColumnKind, Schema, Table};

    fn schema(table: Table) -> Schema {
        let mut schema = Schema::new();
        schema.add_table(table).unwrap();
        schema
    }

    #[test]
    fn test_empty_diff() {
        assert_eq!(render_report(&SchemaDiff::default()), "No differences\n");
    }

    struct Failing;

    impl Write for Failing {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_writer_errors_propagate() {
        let d = diff(&Schema::new(), &schema(Table::new("t")));
        assert!(write_report(&mut Failing, &d).is_err());
        assert_eq!(format!("{}", Report(&d)), render_report(&d));
    }

    #[test]
    fn test_changed_and_renamed_columns() {
        let mut from = Table::new("t");
        from.add_column(Column::new("id", ColumnKind::Integer, "integer"))
            .unwrap();
        from.add_column(Column::new("name", ColumnKind::String, "string").with_length(50))
            .unwrap();
        from.add_column(Column::new("old_name", ColumnKind::Integer, "integer"))
            .unwrap();
        let mut to = Table::new("t");
        to.add_column(Column::new("id", ColumnKind::Integer, "integer"))
            .unwrap();
        to.add_column(
            Column::new("name", ColumnKind::String, "string")
                .with_length(100)
                .not_null(),
        )
        .unwrap();
        to.add_column(Column::new("new_name", ColumnKind::Integer, "integer"))
            .unwrap();

        let report = render_report(&diff(&schema(from), &schema(to)));
        let expected = "\
Changed tables
  t
    Changed columns
      name
        * length: \"50\" => \"100\"
        * nullable: true => false
    Renamed columns
      * old_name => new_name
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_new_and_removed_tables() {
        let mut audit = Table::new("audit");
        audit
            .add_column(Column::new("id", ColumnKind::Integer, "integer"))
            .unwrap();
        audit
            .add_column(Column::new("at", ColumnKind::DateTime, "datetime"))
            .unwrap();
        let report = render_report(&diff(&schema(Table::new("legacy")), &schema(audit)));
        assert_eq!(
            report,
            "New tables\n  * audit: id, at\nRemoved tables\n  * legacy\n"
        );
    }
}
