use super::{ColumnId, Named};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index name is unique within the schema. Generated names are
    /// `idx_<table>_<field>` so an unchanged index keeps its name.
    pub name: String,

    /// Columns included in the index.
    pub columns: Vec<ColumnId>,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

impl Named for Index {
    fn name(&self) -> &str {
        &self.name
    }
}
