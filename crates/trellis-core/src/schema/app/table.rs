use super::{Field, ForeignKey, Index, PermissionSet, UniqueConstraint, View};

use serde::{Deserialize, Serialize};

/// A declared table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Stable identifier. Survives renames, so a changed `name` with the same
    /// `id` is a rename rather than a drop and create.
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,

    /// Table-level, possibly composite, foreign keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_constraints: Vec<UniqueConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<View>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub fields: Vec<String>,
}

impl Table {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of the primary key columns: the declared primary key, else a
    /// field named `id`, else the implicit `id` column.
    pub fn primary_key_fields(&self) -> Vec<&str> {
        match &self.primary_key {
            Some(pk) => pk.fields.iter().map(String::as_str).collect(),
            None => vec!["id"],
        }
    }

    /// Returns `true` when the table gets a generated `id` identity column.
    pub fn has_implicit_id(&self) -> bool {
        self.primary_key.is_none() && self.field("id").is_none()
    }

    /// Returns `true` if `fields` is exactly the primary key or the field
    /// list of a declared unique constraint, unique index, or unique field.
    pub fn is_unique_key(&self, fields: &[&str]) -> bool {
        let same = |other: &[String]| {
            other.len() == fields.len() && other.iter().zip(fields).all(|(a, b)| a == b)
        };

        if self.primary_key_fields() == fields {
            return true;
        }

        if let [single] = fields {
            if let Some(field) = self.field(single) {
                if field.unique || field.ty.is_autonumber() || field.ty.is_one_to_one() {
                    return true;
                }
            }
        }

        self.unique_constraints.iter().any(|uq| same(&uq.fields))
            || self
                .indexes
                .iter()
                .any(|index| index.unique && same(&index.fields))
    }

    /// The view used when none is requested.
    pub fn default_view(&self) -> Option<&super::View> {
        self.views.iter().find(|view| view.is_default)
    }
}
