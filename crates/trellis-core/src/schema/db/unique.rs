use super::{ColumnId, Named};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unique {
    /// `uq_<table>_<field>` or the declared name
    pub name: String,

    pub columns: Vec<ColumnId>,
}

impl Named for Unique {
    fn name(&self) -> &str {
        &self.name
    }
}
