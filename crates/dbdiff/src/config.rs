//! Group configuration.
//!
//! A configuration file lists the groups to compare:
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "name": "dump against production",
//!       "from": { "driver": "file", "path": "dump.sql", "dbname": "shop" },
//!       "to": { "driver": "mysql", "host": "db", "user": "app", "password": "secret", "dbname": "shop" }
//!     }
//!   ]
//! }
//! ```
//!
//! `pdo_mysql` is accepted as a driver name for `mysql`. Relative dump paths
//! are resolved against the directory of the configuration file.

use std::path::{Path, PathBuf};

use dbdiff_mysql::MySqlConnection;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DiffError, Result};

/// A DDL dump on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileConnection {
    /// Path as written in the configuration.
    pub path: PathBuf,
    /// Database the dump belongs to; tables qualified with another
    /// database are skipped.
    #[serde(default)]
    pub dbname: Option<String>,
}

/// One side of a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum Connection {
    /// A `mysqldump`-style file.
    File(FileConnection),
    /// A live MySQL server.
    #[serde(alias = "pdo_mysql")]
    Mysql(MySqlConnection),
}

impl Connection {
    /// Human-readable name used in headers and logs.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::File(file) => format!("File: {}", file.path.display()),
            Self::Mysql(mysql) => mysql.description(),
        }
    }
}

/// A pair of schemas to compare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub name: String,
    pub from: Connection,
    pub to: Connection,
}

/// The parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub groups: Vec<Group>,
    /// Directory relative dump paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::ConfigNotFound`] if the file does not exist,
    /// and IO or JSON errors otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DiffError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| DiffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = Self::parse(&text, base_dir).map_err(|source| DiffError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), groups = config.groups.len(), "loaded configuration");
        Ok(config)
    }

    /// Parses configuration text, resolving relative paths against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not a valid configuration.
    pub fn parse(text: &str, base_dir: impl Into<PathBuf>) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    /// Resolves the location of a dump.
    #[must_use]
    pub fn resolve(&self, file: &FileConnection) -> PathBuf {
        if file.path.is_absolute() {
            file.path.clone()
        } else {
            self.base_dir.join(&file.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "groups": [
            {
                "name": "dump against live",
                "from": { "driver": "file", "path": "dumps/shop.sql", "dbname": "shop" },
                "to": { "driver": "pdo_mysql", "host": "db", "user": "app", "dbname": "shop" }
            },
            {
                "name": "two dumps",
                "from": { "driver": "file", "path": "/abs/a.sql" },
                "to": { "driver": "mysql", "user": "root", "dbname": "other" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_groups() {
        let config = Config::parse(CONFIG, "/etc/dbdiff").unwrap();
        assert_eq!(config.groups.len(), 2);

        let first = &config.groups[0];
        assert_eq!(first.name, "dump against live");
        assert_eq!(first.from.description(), "File: dumps/shop.sql");
        assert_eq!(first.to.description(), "Database: shop@db");

        let Connection::File(file) = &first.from else {
            panic!("expected a file connection");
        };
        assert_eq!(file.dbname.as_deref(), Some("shop"));
        assert_eq!(
            config.resolve(file),
            PathBuf::from("/etc/dbdiff/dumps/shop.sql")
        );

        let second = &config.groups[1];
        assert_eq!(second.to.description(), "Database: other@localhost");
        let Connection::File(file) = &second.from else {
            panic!("expected a file connection");
        };
        assert_eq!(file.dbname, None);
        assert_eq!(config.resolve(file), PathBuf::from("/abs/a.sql"));
    }

    #[test]
    fn test_unknown_driver() {
        let text = r#"{"groups": [{"name": "x",
            "from": {"driver": "sqlite", "path": "a.db"},
            "to": {"driver": "file", "path": "b.sql"}}]}"#;
        assert!(Config::parse(text, "").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DiffError::ConfigNotFound(_)));
    }
}
