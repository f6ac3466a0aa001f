use serde::{Deserialize, Serialize};

/// Options of a `relationship` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub related_table: String,

    /// Referenced column. Defaults to the related table's primary key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_field: Option<String>,

    #[serde(default)]
    pub relation_type: RelationType,

    #[serde(default)]
    pub on_delete: ReferentialAction,

    #[serde(default)]
    pub on_update: ReferentialAction,

    /// Junction table name for many-to-many relationships. Defaults to
    /// `<table>_<field>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_table: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    #[default]
    ManyToOne,
    OneToOne,
    ManyToMany,
}

/// What happens to referencing rows when the referenced row is deleted or
/// its key updated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferentialAction {
    #[default]
    Restrict,
    Cascade,
    SetNull,
}

impl ReferentialAction {
    pub fn is_cascade(self) -> bool {
        matches!(self, Self::Cascade)
    }

    pub fn is_set_null(self) -> bool {
        matches!(self, Self::SetNull)
    }
}

/// A table-level foreign key. `fields` jointly reference `related_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub fields: Vec<String>,

    pub related_table: String,

    pub related_fields: Vec<String>,

    #[serde(default)]
    pub on_delete: ReferentialAction,

    #[serde(default)]
    pub on_update: ReferentialAction,
}
