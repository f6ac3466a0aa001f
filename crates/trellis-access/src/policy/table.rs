use super::CompiledRule;
use crate::{Principal, RoleHierarchy};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trellis_core::{
    schema::{
        app::{self, Operation},
        db::{self, TableId},
    },
    stmt::Record,
};

/// Compiled permissions of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePolicy {
    pub id: TableId,

    pub name: String,

    pub read: CompiledRule,
    pub create: CompiledRule,
    pub update: CompiledRule,
    pub delete: CompiledRule,

    /// Field overrides, keyed by column name
    pub fields: IndexMap<String, FieldPolicy>,

    pub allow_partial_field_writes: bool,

    /// Every column, in table order
    pub columns: Vec<String>,

    /// Columns whose values the database produces
    pub read_only: Vec<String>,
}

/// Overrides for a single field. `None` defers to the table rule.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<CompiledRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<CompiledRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<CompiledRule>,
}

impl TablePolicy {
    pub(crate) fn compile(
        app_table: &app::Table,
        table: &db::Table,
        roles: &RoleHierarchy,
    ) -> TablePolicy {
        let compile = |rule: Option<&app::Rule>| rule.map(|rule| CompiledRule::compile(rule, roles));

        let table_rule = |op| match &app_table.permissions {
            Some(permissions) => compile(permissions.rule(op)).unwrap_or(CompiledRule::Deny),
            None => CompiledRule::Authenticated,
        };

        let fields = app_table
            .permissions
            .iter()
            .flat_map(|permissions| &permissions.fields)
            .map(|field| {
                let policy = FieldPolicy {
                    read: compile(field.rule(Operation::Read)),
                    create: compile(field.rule(Operation::Create)),
                    update: compile(field.rule(Operation::Update)),
                };
                (field.field.clone(), policy)
            })
            .collect();

        TablePolicy {
            id: table.id,
            name: table.name.clone(),
            read: table_rule(Operation::Read),
            create: table_rule(Operation::Create),
            update: table_rule(Operation::Update),
            delete: table_rule(Operation::Delete),
            fields,
            allow_partial_field_writes: app_table
                .permissions
                .as_ref()
                .is_some_and(|permissions| permissions.allow_partial_field_writes),
            columns: table
                .columns
                .iter()
                .map(|column| column.name.clone())
                .collect(),
            read_only: table
                .columns
                .iter()
                .filter(|column| column.read_only || column.identity)
                .map(|column| column.name.clone())
                .collect(),
        }
    }

    pub fn rule(&self, op: Operation) -> &CompiledRule {
        match op {
            Operation::Read => &self.read,
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    /// The override for `field` under `op`, if one is declared.
    pub fn field_rule(&self, field: &str, op: Operation) -> Option<&CompiledRule> {
        let policy = self.fields.get(field)?;

        match op {
            Operation::Read => policy.read.as_ref(),
            Operation::Create => policy.create.as_ref(),
            Operation::Update => policy.update.as_ref(),
            Operation::Delete => None,
        }
    }

    /// Whether `field` passes its override. Fields without one pass.
    pub fn allows_field(
        &self,
        principal: &Principal,
        record: &Record,
        op: Operation,
        field: &str,
    ) -> bool {
        self.field_rule(field, op)
            .map_or(true, |rule| rule.evaluate(principal, record))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn is_read_only(&self, name: &str) -> bool {
        self.read_only.iter().any(|column| column == name)
    }
}
