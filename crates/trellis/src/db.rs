mod builder;
pub use builder::Builder;

use crate::{driver::Driver, Result};

use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::Mutex;
use trellis_access::{Enforcer, PolicySet, RoleHierarchy};
use trellis_core::{
    schema::{
        self, app,
        db::{Migration, SchemaDiff},
    },
    Schema,
};

/// A handle to a database whose schema is managed from a declaration.
///
/// Cloning is cheap; clones share the compiled artifacts and the apply
/// lock.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Box<dyn Driver>,

    /// Compiles declarations
    builder: schema::Builder,

    roles: RoleHierarchy,

    /// The artifacts requests are enforced against
    compiled: ArcSwap<Compiled>,

    /// Held for the whole of an apply
    apply: Mutex<()>,
}

/// A compiled schema together with the permissions compiled from it.
/// Replaced as a whole, never modified.
#[derive(Debug)]
pub struct Compiled {
    schema: Arc<Schema>,
    policies: Arc<PolicySet>,
}

/// Outcome of [`Db::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The database already matched the declaration
    Unchanged,

    Migrated {
        id: u64,
        name: String,
        statements: usize,
    },
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The artifacts currently in effect. The returned snapshot stays valid
    /// while later applies replace the published one.
    pub fn compiled(&self) -> Arc<Compiled> {
        self.shared.compiled.load_full()
    }

    pub fn schema(&self) -> Arc<Schema> {
        self.shared.compiled.load().schema.clone()
    }

    /// An enforcer over the permissions currently in effect.
    pub fn enforcer(&self) -> Enforcer {
        self.shared.compiled.load().enforcer()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Renders the migration [`apply`](Self::apply) would run, without
    /// running it.
    pub async fn plan(&self, declaration: app::Schema) -> Result<Migration> {
        let schema = self.shared.builder.build(declaration)?;

        let mut conn = self.shared.driver.connect().await?;
        let previous = conn.current_schema().await?.unwrap_or_default();

        let diff = SchemaDiff::from(&previous, &schema.db);
        Ok(self.shared.driver.generate_migration(&diff))
    }

    /// Validates and compiles `declaration`, migrates the database to it,
    /// then publishes the new artifacts.
    ///
    /// Applies are serialized. A declaration that fails validation is
    /// rejected before any statement runs, and a migration that fails is
    /// rolled back by the driver; either way the published artifacts stay
    /// as they were.
    pub async fn apply(&self, declaration: app::Schema) -> Result<Applied> {
        let _guard = self.shared.apply.lock().await;

        let schema = self.shared.builder.build(declaration)?;

        let mut conn = self.shared.driver.connect().await?;
        let previous = conn.current_schema().await?.unwrap_or_default();

        let migration = {
            let diff = SchemaDiff::from(&previous, &schema.db);
            self.shared.driver.generate_migration(&diff)
        };

        let applied = if migration.is_empty() {
            tracing::debug!("database already matches the declaration");
            Applied::Unchanged
        } else {
            let id = conn
                .applied_migrations()
                .await?
                .last()
                .map_or(1, |migration| migration.id() + 1);
            let name = format!("{id:04}_schema");
            let statements = migration.statements().len();

            conn.apply_migration(id, name.clone(), &migration, &schema.db)
                .await?;

            tracing::info!(id, %name, statements, "applied schema");

            Applied::Migrated {
                id,
                name,
                statements,
            }
        };

        self.publish(schema);
        Ok(applied)
    }

    fn publish(&self, schema: Schema) {
        let compiled = Compiled::new(schema, &self.shared.roles);
        tracing::debug!(
            tables = compiled.schema.db.tables.len(),
            views = compiled.schema.db.views.len(),
            "published compiled schema"
        );
        self.shared.compiled.store(Arc::new(compiled));
    }
}

impl Compiled {
    fn new(schema: Schema, roles: &RoleHierarchy) -> Compiled {
        let policies = PolicySet::compile(&schema, roles);
        Compiled {
            schema: Arc::new(schema),
            policies: Arc::new(policies),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn policies(&self) -> &Arc<PolicySet> {
        &self.policies
    }

    pub fn enforcer(&self) -> Enforcer {
        Enforcer::new(self.policies.clone())
    }
}
