use super::{ColumnId, Named, ReferentialAction, TableId};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// `fk_<table>_<field>` or the declared name
    pub name: String,

    /// Referencing columns, on the table owning the constraint
    pub columns: Vec<ColumnId>,

    /// The referenced table
    pub references: TableId,

    /// Referenced columns, in the same order as `columns`
    pub referenced_columns: Vec<ColumnId>,

    pub on_delete: ReferentialAction,

    pub on_update: ReferentialAction,
}

impl Named for ForeignKey {
    fn name(&self) -> &str {
        &self.name
    }
}
