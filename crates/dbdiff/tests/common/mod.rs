#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dbdiff::Config;
use tempfile::TempDir;

/// A temporary directory holding a configuration file and its dumps.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a configuration comparing pairs of dumps, given as
    /// `(name, from file, to file)`.
    pub fn config(&self, groups: &[(&str, &str, &str)]) -> Config {
        let groups: Vec<_> = groups
            .iter()
            .map(|(name, from, to)| {
                serde_json::json!({
                    "name": name,
                    "from": { "driver": "file", "path": from },
                    "to": { "driver": "file", "path": to },
                })
            })
            .collect();
        let path = self.write(
            "dbdiff.json",
            &serde_json::json!({ "groups": groups }).to_string(),
        );
        load(&path)
    }
}

pub fn load(path: &Path) -> Config {
    Config::load(path).unwrap()
}
