#![allow(dead_code)]

use serde_json::json;
use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
    time::Duration,
};
use trellis::schema::{
    app,
    db::{AppliedMigration, Migration, Schema, SchemaDiff},
};
use trellis_core::{async_trait, Connection, Driver, Error, Result};
use trellis_sql::MigrationPlan;

/// Keeps migration history in memory and records every statement it is
/// asked to run.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    state: Arc<Mutex<State>>,
    delay: Duration,
}

#[derive(Debug, Default)]
pub struct State {
    pub history: Vec<(AppliedMigration, Schema)>,
    pub executed: Vec<String>,

    /// The next apply fails on its first statement
    pub fail_next: bool,
}

#[derive(Debug)]
struct MemoryConnection {
    state: Arc<Mutex<State>>,
    delay: Duration,
}

impl MemoryDriver {
    pub fn new() -> MemoryDriver {
        MemoryDriver::default()
    }

    /// Every apply sleeps for `delay` before recording its migration.
    pub fn with_delay(delay: Duration) -> MemoryDriver {
        MemoryDriver {
            delay,
            ..MemoryDriver::default()
        }
    }

    pub fn fail_next(&self) {
        self.state.lock().unwrap().fail_next = true;
    }

    pub fn applied_ids(&self) -> Vec<u64> {
        let state = self.state.lock().unwrap();
        state.history.iter().map(|(m, _)| m.id()).collect()
    }

    pub fn applied_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .history
            .iter()
            .map(|(m, _)| m.name().to_string())
            .collect()
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed("memory://")
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(MemoryConnection {
            state: self.state.clone(),
            delay: self.delay,
        }))
    }

    fn generate_migration(&self, diff: &SchemaDiff<'_>) -> Migration {
        MigrationPlan::from_diff(diff).to_migration()
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn current_schema(&mut self) -> Result<Option<Schema>> {
        let state = self.state.lock().unwrap();
        Ok(state.history.last().map(|(_, snapshot)| snapshot.clone()))
    }

    async fn applied_migrations(&mut self) -> Result<Vec<AppliedMigration>> {
        let state = self.state.lock().unwrap();
        Ok(state.history.iter().map(|(m, _)| m.clone()).collect())
    }

    async fn apply_migration(
        &mut self,
        id: u64,
        name: String,
        migration: &Migration,
        snapshot: &Schema,
    ) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut state = self.state.lock().unwrap();

        if std::mem::take(&mut state.fail_next) {
            let statement = migration.statements()[0].to_string();
            return Err(trellis_core::err!("disk full").context(Error::migration_failed(statement)));
        }

        state
            .executed
            .extend(migration.statements().into_iter().map(String::from));
        state.history.push((
            AppliedMigration::new(id, name, migration.checksum()),
            snapshot.clone(),
        ));
        Ok(())
    }
}

/// `customers` readable by members of the same organization.
pub fn customers() -> app::Schema {
    declaration(json!([
        { "id": 1, "name": "name", "type": "single-line-text" },
        { "id": 2, "name": "organization_id", "type": "single-line-text" }
    ]))
}

/// [`customers`] with an extra `email` column.
pub fn customers_with_email() -> app::Schema {
    declaration(json!([
        { "id": 1, "name": "name", "type": "single-line-text" },
        { "id": 2, "name": "organization_id", "type": "single-line-text" },
        { "id": 3, "name": "email", "type": "email", "unique": true }
    ]))
}

fn declaration(fields: serde_json::Value) -> app::Schema {
    serde_json::from_value(json!({
        "tables": [{
            "id": 1,
            "name": "customers",
            "fields": fields,
            "permissions": {
                "read": { "type": "organization-scoped" },
                "create": { "type": "roles", "roles": ["member"] }
            }
        }]
    }))
    .unwrap()
}

pub fn parse(value: serde_json::Value) -> app::Schema {
    serde_json::from_value(value).unwrap()
}
