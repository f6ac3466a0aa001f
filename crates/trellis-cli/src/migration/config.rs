use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for migration operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Directory holding migration scripts, the history file and the
    /// snapshot
    pub path: PathBuf,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("migrations"),
        }
    }
}

impl MigrationConfig {
    /// Create a new MigrationConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migrations path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn history_file_path(&self) -> PathBuf {
        self.path.join("history.toml")
    }

    /// The compiled schema the last written or applied migration produced
    pub fn snapshot_file_path(&self) -> PathBuf {
        self.path.join("snapshot.json")
    }

    pub fn script_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}
