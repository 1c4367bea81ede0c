//! Raw type name to column kind mapping.

use std::collections::BTreeMap;

use crate::schema::ColumnKind;

/// MySQL type names, their kind and canonical name.
const MYSQL_TYPES: &[(&str, ColumnKind, &str)] = &[
    ("tinyint", ColumnKind::Boolean, "boolean"),
    ("bool", ColumnKind::Boolean, "boolean"),
    ("boolean", ColumnKind::Boolean, "boolean"),
    ("smallint", ColumnKind::Integer, "smallint"),
    ("mediumint", ColumnKind::Integer, "integer"),
    ("int", ColumnKind::Integer, "integer"),
    ("integer", ColumnKind::Integer, "integer"),
    ("bigint", ColumnKind::Integer, "bigint"),
    ("decimal", ColumnKind::Decimal, "decimal"),
    ("numeric", ColumnKind::Decimal, "decimal"),
    ("dec", ColumnKind::Decimal, "decimal"),
    ("fixed", ColumnKind::Decimal, "decimal"),
    ("float", ColumnKind::Float, "float"),
    ("double", ColumnKind::Float, "float"),
    ("double precision", ColumnKind::Float, "float"),
    ("real", ColumnKind::Float, "float"),
    ("point", ColumnKind::Float, "float"),
    ("char", ColumnKind::String, "string"),
    ("character", ColumnKind::String, "string"),
    ("varchar", ColumnKind::String, "string"),
    ("character varying", ColumnKind::String, "string"),
    ("tinytext", ColumnKind::Text, "text"),
    ("text", ColumnKind::Text, "text"),
    ("mediumtext", ColumnKind::Text, "text"),
    ("longtext", ColumnKind::Text, "text"),
    ("binary", ColumnKind::Binary, "binary"),
    ("varbinary", ColumnKind::Binary, "binary"),
    ("tinyblob", ColumnKind::Binary, "blob"),
    ("blob", ColumnKind::Binary, "blob"),
    ("mediumblob", ColumnKind::Binary, "blob"),
    ("longblob", ColumnKind::Binary, "blob"),
    ("date", ColumnKind::DateTime, "date"),
    ("year", ColumnKind::DateTime, "date"),
    ("datetime", ColumnKind::DateTime, "datetime"),
    ("timestamp", ColumnKind::DateTime, "datetime"),
    ("time", ColumnKind::DateTime, "time"),
    ("enum", ColumnKind::Enumeration, "enum"),
    ("set", ColumnKind::Enumeration, "set"),
    ("json", ColumnKind::Json, "json"),
    ("geometry", ColumnKind::Geometry, "geometry"),
    ("linestring", ColumnKind::Geometry, "geometry"),
    ("polygon", ColumnKind::Geometry, "geometry"),
    ("multipoint", ColumnKind::Geometry, "geometry"),
    ("multilinestring", ColumnKind::Geometry, "geometry"),
    ("multipolygon", ColumnKind::Geometry, "geometry"),
    ("geometrycollection", ColumnKind::Geometry, "geometry"),
];

/// The kind and canonical name a raw type maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Semantic kind.
    pub kind: ColumnKind,
    /// Canonical type name.
    pub name: String,
}

/// An immutable table from raw type names to column kinds.
///
/// Lookups are case-insensitive and collapse inner whitespace, so
/// `DOUBLE  PRECISION` resolves like `double precision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    entries: BTreeMap<String, MappedType>,
}

impl TypeMapping {
    /// Creates an empty mapping: every type maps to
    /// [`ColumnKind::Other`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The default MySQL mapping.
    #[must_use]
    pub fn mysql() -> Self {
        MYSQL_TYPES
            .iter()
            .fold(Self::new(), |mapping, (raw, kind, name)| {
                mapping.with_type(raw, *kind, name)
            })
    }

    /// Returns a copy with `raw` mapped to `kind` and `name`.
    #[must_use]
    pub fn with_type(mut self, raw: &str, kind: ColumnKind, name: &str) -> Self {
        self.entries.insert(
            normalize(raw),
            MappedType {
                kind,
                name: name.to_string(),
            },
        );
        self
    }

    /// Resolves a raw type name.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<&MappedType> {
        self.entries.get(&normalize(raw))
    }

    /// Returns the number of mapped type names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::mysql()
    }
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_mapping() {
        let mapping = TypeMapping::mysql();
        let kind = |raw: &str| mapping.resolve(raw).map(|m| m.kind);
        assert_eq!(kind("VARCHAR"), Some(ColumnKind::String));
        assert_eq!(kind("int"), Some(ColumnKind::Integer));
        assert_eq!(kind("TinyInt"), Some(ColumnKind::Boolean));
        assert_eq!(kind("enum"), Some(ColumnKind::Enumeration));
        assert_eq!(kind("geometry"), Some(ColumnKind::Geometry));
        assert_eq!(kind("point"), Some(ColumnKind::Float));
        assert_eq!(kind("double   precision"), Some(ColumnKind::Float));
        assert_eq!(kind("bit"), None);
        assert_eq!(mapping.resolve("bigint").unwrap().name, "bigint");
    }

    #[test]
    fn test_custom_entries_override() {
        let mapping = TypeMapping::mysql().with_type("tinyint", ColumnKind::Integer, "smallint");
        assert_eq!(mapping.resolve("tinyint").unwrap().kind, ColumnKind::Integer);
        assert!(TypeMapping::new().resolve("int").is_none());
        assert!(TypeMapping::new().is_empty());
    }
}
