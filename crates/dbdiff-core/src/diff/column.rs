//! Column comparison.

use std::fmt;

use serde::Serialize;

use crate::schema::Column;

/// An observable column attribute that can differ between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedProperty {
    /// Kind or canonical type name.
    Type,
    /// String or binary length.
    Length,
    /// Decimal precision.
    Precision,
    /// Decimal scale.
    Scale,
    /// NULL / NOT NULL.
    Nullable,
    /// UNSIGNED.
    Unsigned,
    /// AUTO_INCREMENT.
    Autoincrement,
    /// Default value, compared as text.
    Default,
    /// Column comment.
    Comment,
    /// Fixed vs variable width.
    Fixed,
    /// Enumeration values.
    Enum,
}

impl ChangedProperty {
    /// Every property, in report order.
    pub const ALL: [Self; 11] = [
        Self::Type,
        Self::Length,
        Self::Precision,
        Self::Scale,
        Self::Nullable,
        Self::Unsigned,
        Self::Autoincrement,
        Self::Default,
        Self::Comment,
        Self::Fixed,
        Self::Enum,
    ];

    /// Returns the property name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Length => "length",
            Self::Precision => "precision",
            Self::Scale => "scale",
            Self::Nullable => "nullable",
            Self::Unsigned => "unsigned",
            Self::Autoincrement => "autoincrement",
            Self::Default => "default",
            Self::Comment => "comment",
            Self::Fixed => "fixed",
            Self::Enum => "enum",
        }
    }

    /// Returns true if the property differs between `a` and `b`.
    #[must_use]
    pub fn differs(self, a: &Column, b: &Column) -> bool {
        match self {
            Self::Type => a.kind != b.kind || a.type_name != b.type_name,
            Self::Length => a.length != b.length,
            Self::Precision => a.precision != b.precision,
            Self::Scale => a.scale != b.scale,
            Self::Nullable => a.nullable != b.nullable,
            Self::Unsigned => a.unsigned != b.unsigned,
            Self::Autoincrement => a.autoincrement != b.autoincrement,
            Self::Default => {
                a.default.as_ref().map(|d| d.as_text()) != b.default.as_ref().map(|d| d.as_text())
            }
            Self::Comment => a.comment != b.comment,
            Self::Fixed => a.fixed != b.fixed,
            Self::Enum => a.enum_values != b.enum_values,
        }
    }

    /// Renders the property's value on `column` for reports. Absent
    /// values render empty.
    #[must_use]
    pub fn value_of(self, column: &Column) -> String {
        let number = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        match self {
            Self::Type => column.type_name.clone(),
            Self::Length => number(column.length),
            Self::Precision => number(column.precision),
            Self::Scale => number(column.scale),
            Self::Nullable => column.nullable.to_string(),
            Self::Unsigned => column.unsigned.to_string(),
            Self::Autoincrement => column.autoincrement.to_string(),
            Self::Default => column
                .default
                .as_ref()
                .map(|d| d.as_text())
                .unwrap_or_default(),
            Self::Comment => column.comment.clone().unwrap_or_default(),
            Self::Fixed => column.fixed.to_string(),
            Self::Enum => column
                .enum_values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for ChangedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the properties that differ between two versions of a column,
/// in report order. The names are not compared.
#[must_use]
pub fn diff_column(from: &Column, to: &Column) -> Vec<ChangedProperty> {
    ChangedProperty::ALL
        .into_iter()
        .filter(|property| property.differs(from, to))
        .collect()
}
