mod rule;
pub use rule::CompiledRule;

mod table;
pub use table::{FieldPolicy, TablePolicy};

use crate::{Principal, RoleHierarchy};

use indexmap::IndexMap;
use std::sync::Arc;
use trellis_core::{
    schema::{app::Operation, db},
    stmt::Record,
    Schema,
};

/// Outcome of a single permission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// The compiled permissions of a whole schema.
///
/// Immutable once built. A recompiled schema produces a new set rather than
/// changing this one, so a set can be shared across any number of
/// concurrent requests.
#[derive(Debug)]
pub struct PolicySet {
    db: Arc<db::Schema>,
    tables: IndexMap<String, TablePolicy>,
    roles: RoleHierarchy,
}

impl PolicySet {
    pub fn compile(schema: &Schema, roles: &RoleHierarchy) -> PolicySet {
        let mut tables = IndexMap::new();

        for app_table in &schema.app.tables {
            let table = schema.table_for(app_table);
            let policy = TablePolicy::compile(app_table, table, roles);

            tracing::debug!(
                table = %policy.name,
                read = ?policy.read,
                create = ?policy.create,
                update = ?policy.update,
                delete = ?policy.delete,
                fields = policy.fields.len(),
                "compiled table policy"
            );

            tables.insert(policy.name.clone(), policy);
        }

        PolicySet {
            db: schema.db.clone(),
            tables,
            roles: roles.clone(),
        }
    }

    /// The compiled relational schema the policies were built against.
    pub fn schema(&self) -> &Arc<db::Schema> {
        &self.db
    }

    pub fn roles(&self) -> &RoleHierarchy {
        &self.roles
    }

    pub fn table(&self, name: &str) -> Option<&TablePolicy> {
        self.tables.get(name)
    }

    pub(crate) fn table_by_id(&self, id: db::TableId) -> Option<&TablePolicy> {
        self.tables.values().find(|policy| policy.id == id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TablePolicy> + '_ {
        self.tables.values()
    }

    /// Decides whether `principal` may perform `op` on `record` in `table`,
    /// optionally narrowed to a single field.
    ///
    /// Without a principal, every operation is denied. Unknown tables deny.
    pub fn decide(
        &self,
        principal: Option<&Principal>,
        record: &Record,
        table: &str,
        op: Operation,
        field: Option<&str>,
    ) -> Decision {
        let (Some(principal), Some(policy)) = (principal, self.table(table)) else {
            return Decision::Deny;
        };

        let principal = self.roles.resolve(principal);

        let allowed = policy.rule(op).evaluate(&principal, record)
            && field.map_or(true, |field| policy.allows_field(&principal, record, op, field));

        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

impl Decision {
    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }
}
