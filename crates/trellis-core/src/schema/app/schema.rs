use super::Table;
use crate::Result;

use serde::{Deserialize, Serialize};

/// A schema declaration: the tables an application wants to exist.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Parses a declaration from a JSON document.
    pub fn from_json(src: &str) -> Result<Schema> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> {
        self.tables.iter()
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn table_by_id(&self, id: u64) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == id)
    }
}
