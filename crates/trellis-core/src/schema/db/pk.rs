use super::ColumnId;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Constraint name, `pk_<table>`
    pub name: String,

    pub columns: Vec<ColumnId>,
}
