use sha2::{Digest, Sha256};

/// Separates statements inside a [`Migration::Sql`] script.
pub const BREAKPOINT: &str = "\n-- #[trellis::breakpoint]\n";

/// Database migration generated from a [`super::SchemaDiff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    Sql(String),
}

impl Migration {
    /// Create a new SQL migration from a single SQL string.
    pub fn new_sql(sql: String) -> Self {
        Migration::Sql(sql)
    }

    /// Create a new SQL migration from multiple SQL statements.
    /// Statements are joined with breakpoint markers.
    pub fn new_sql_with_breakpoints<S: AsRef<str>>(statements: &[S]) -> Self {
        let sql = statements
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(BREAKPOINT);
        Migration::Sql(sql)
    }

    /// Get individual SQL statements by splitting on breakpoint markers.
    pub fn statements(&self) -> Vec<&str> {
        match self {
            Migration::Sql(sql) if sql.is_empty() => vec![],
            Migration::Sql(sql) => sql.split(BREAKPOINT).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Migration::Sql(sql) => sql.is_empty(),
        }
    }

    /// Hex-encoded SHA-256 of the script. Recorded with each applied
    /// migration so a script edited after being applied can be detected.
    pub fn checksum(&self) -> String {
        match self {
            Migration::Sql(sql) => hex::encode(Sha256::digest(sql.as_bytes())),
        }
    }
}

/// Metadata about a migration that has already been applied to a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    id: u64,
    name: String,
    checksum: String,
}

impl AppliedMigration {
    pub fn new(id: u64, name: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            checksum: checksum.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}
