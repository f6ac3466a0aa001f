use crate::migration::MigrationConfig;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};
use trellis::{db, schema, Db, RoleHierarchy};

/// Configuration for Trellis CLI operations, usually read from
/// `Trellis.toml`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database to plan against and apply to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Prefix for every compiled table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name_prefix: Option<String>,

    /// Migration-related configuration
    pub migration: MigrationConfig,

    /// Role levels used by `roles` rules
    pub roles: RoleConfig,
}

/// Role name to hierarchy level. Empty means the built-in hierarchy.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleConfig {
    levels: IndexMap<String, u32>,
}

impl Config {
    pub const FILE_NAME: &'static str = "Trellis.toml";

    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid configuration in `{}`", path.display()))
    }

    /// Loads the configuration file, or returns the defaults if it does not
    /// exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn table_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_name_prefix = Some(prefix.into());
        self
    }

    /// Set the migration configuration
    pub fn migration(mut self, migration: MigrationConfig) -> Self {
        self.migration = migration;
        self
    }

    pub fn roles(mut self, roles: RoleConfig) -> Self {
        self.roles = roles;
        self
    }

    /// A schema builder honoring this configuration
    pub fn schema_builder(&self) -> schema::Builder {
        let mut builder = schema::Builder::new();
        if let Some(prefix) = &self.table_name_prefix {
            builder.table_name_prefix(prefix);
        }
        builder
    }

    /// A database handle builder honoring this configuration
    pub fn db_builder(&self) -> db::Builder {
        let mut builder = Db::builder();
        if let Some(prefix) = &self.table_name_prefix {
            builder.table_name_prefix(prefix);
        }
        builder.roles(self.roles.hierarchy());
        builder
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl RoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, name: impl Into<String>, level: u32) -> Self {
        self.levels.insert(name.into(), level);
        self
    }

    pub fn hierarchy(&self) -> RoleHierarchy {
        if self.levels.is_empty() {
            return RoleHierarchy::default();
        }

        self.levels
            .iter()
            .map(|(name, level)| (name.clone(), *level))
            .collect()
    }
}
