//! Error types for the command-line differ.

use std::path::PathBuf;

use dbdiff_mysql::CatalogError;

/// Errors that can occur while loading configuration or diffing groups.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// The configuration file is not valid JSON for a group list.
    #[error("Invalid configuration file '{path}': {source}")]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Reading or writing a file failed.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The ignore-table pattern is not a valid regular expression.
    #[error("Invalid ignore-table pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A schema dump could not be turned into a schema.
    #[error("Group '{group}': failed to load {source_name}: {source}")]
    Load {
        /// Group being processed.
        group: String,
        /// Description of the failing connection.
        source_name: String,
        /// Underlying error.
        source: dbdiff_core::Error,
    },

    /// A live database could not be read.
    #[error("Group '{group}': failed to read {source_name}: {source}")]
    Catalog {
        /// Group being processed.
        group: String,
        /// Description of the failing connection.
        source_name: String,
        /// Underlying error.
        source: CatalogError,
    },

    /// A background task panicked or was cancelled.
    #[error("Group '{group}': task failed: {source}")]
    Join {
        /// Group being processed.
        group: String,
        /// Underlying join error.
        source: tokio::task::JoinError,
    },

    /// Serializing a diff failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, DiffError>;
