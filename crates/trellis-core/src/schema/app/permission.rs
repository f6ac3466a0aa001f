use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared access rules of a table.
///
/// A table without a permission set requires an authenticated principal for
/// every operation. Once a set is present, operations it does not mention
/// are denied.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Rule>,

    /// Per-field overrides layered over the table rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldPermission>,

    /// When set, forbidden fields in a write payload are dropped instead of
    /// rejecting the whole request.
    #[serde(default)]
    pub allow_partial_field_writes: bool,
}

/// A permission predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Rule {
    /// Any signed-in principal
    Authenticated,

    /// The principal's role is listed, or ranks at least as high as the
    /// lowest listed role
    Roles { roles: Vec<String> },

    /// The principal's identifier equals the value of `field`
    Owner { field: String },

    /// The record's `field` equals the principal's active organization
    OrganizationScoped {
        #[serde(default = "default_organization_field")]
        field: String,
    },
}

/// Field-level overrides. `create` and `update` fall back to `write`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPermission {
    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<Rule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

fn default_organization_field() -> String {
    "organization_id".to_string()
}

impl PermissionSet {
    pub fn rule(&self, op: Operation) -> Option<&Rule> {
        match op {
            Operation::Read => self.read.as_ref(),
            Operation::Create => self.create.as_ref(),
            Operation::Update => self.update.as_ref(),
            Operation::Delete => self.delete.as_ref(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldPermission> {
        self.fields.iter().find(|field| field.field == name)
    }

    /// All rules of the set, table-level first.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        [&self.read, &self.create, &self.update, &self.delete]
            .into_iter()
            .flatten()
            .chain(self.fields.iter().flat_map(FieldPermission::rules))
    }
}

impl FieldPermission {
    /// Effective rule for `op`, or `None` when the table rule applies.
    pub fn rule(&self, op: Operation) -> Option<&Rule> {
        match op {
            Operation::Read => self.read.as_ref(),
            Operation::Create => self.create.as_ref().or(self.write.as_ref()),
            Operation::Update => self.update.as_ref().or(self.write.as_ref()),
            Operation::Delete => None,
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        [&self.read, &self.write, &self.create, &self.update]
            .into_iter()
            .flatten()
    }
}

impl Rule {
    /// The record field the rule reads, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Rule::Owner { field } | Rule::OrganizationScoped { field } => Some(field),
            Rule::Authenticated | Rule::Roles { .. } => None,
        }
    }
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn is_write(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}
