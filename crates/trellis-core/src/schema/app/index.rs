use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Defaults to `idx_<table>_<fields>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub fields: Vec<String>,

    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueConstraint {
    /// Defaults to `uq_<table>_<fields>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub fields: Vec<String>,
}
