use crate::{
    async_trait,
    schema::db::{AppliedMigration, Migration, Schema, SchemaDiff},
    Result,
};

use std::{borrow::Cow, fmt::Debug};

/// A database the compiled schema can be applied to.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL, for diagnostics. Must not include credentials.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Renders the statements that take the database from `diff.previous()`
    /// to `diff.next()`.
    fn generate_migration(&self, diff: &SchemaDiff<'_>) -> Migration;
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// The schema recorded by the most recently applied migration, or `None`
    /// when no migration has been applied yet. This is the baseline the next
    /// declaration is diffed against.
    async fn current_schema(&mut self) -> Result<Option<Schema>>;

    /// Migrations applied so far, oldest first.
    async fn applied_migrations(&mut self) -> Result<Vec<AppliedMigration>>;

    /// Applies `migration` and records it together with `snapshot`, the
    /// schema the database is in afterwards. Either every statement and the
    /// record commit, or nothing does.
    async fn apply_migration(
        &mut self,
        id: u64,
        name: String,
        migration: &Migration,
        snapshot: &Schema,
    ) -> Result<()>;
}
