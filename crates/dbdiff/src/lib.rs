//! # dbdiff
//!
//! Compares pairs of MySQL schemas ("groups") described in a JSON
//! configuration file. Each side is a `mysqldump`-style file or a live
//! database; the differences are printed as a report, as MySQL statements
//! or as JSON, or appended as migration scripts to an output file.
//!
//! Groups are processed concurrently and reported in configuration order.

pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod source;

pub use config::{Config, Connection, FileConnection, Group};
pub use error::{DiffError, Result};
pub use output::Format;
pub use runner::{run_all, run_group, GroupOutcome};
pub use source::LoadOptions;
