use super::*;

use trellis_core::schema::db::{Index, Table, TableId};

#[derive(Debug, Clone)]
pub struct CreateIndex {
    /// The table to index
    pub table: TableId,

    pub index: Index,
}

impl Statement {
    pub fn create_index(table: &Table, index: &Index) -> Self {
        CreateIndex {
            table: table.id,
            index: index.clone(),
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
