use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const HISTORY_FILE_VERSION: u32 = 1;

/// Record of the migration scripts written by `trellis plan --write`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    /// History file format version
    version: u32,

    /// Migration history
    migrations: Vec<HistoryFileMigration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFileMigration {
    /// Sequential identifier, matching the id the migration is applied under
    pub id: u64,

    /// Script file name
    pub name: String,

    /// Checksum of the script's statements
    pub checksum: String,
}

impl HistoryFile {
    pub fn new() -> Self {
        Self {
            version: HISTORY_FILE_VERSION,
            migrations: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Writes the history as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_string())?;
        Ok(())
    }

    /// An empty history when nothing was written yet
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    pub fn migrations(&self) -> &[HistoryFileMigration] {
        &self.migrations
    }

    pub fn next_migration_id(&self) -> u64 {
        self.migrations.last().map_or(1, |m| m.id + 1)
    }

    pub fn add_migration(&mut self, migration: HistoryFileMigration) {
        self.migrations.push(migration);
    }
}

impl Default for HistoryFile {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for HistoryFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: HistoryFile = toml::from_str(s)?;

        if file.version != HISTORY_FILE_VERSION {
            bail!(
                "Unsupported history file version: {}. Expected version {HISTORY_FILE_VERSION}",
                file.version
            );
        }

        Ok(file)
    }
}

impl fmt::Display for HistoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&contents)
    }
}
