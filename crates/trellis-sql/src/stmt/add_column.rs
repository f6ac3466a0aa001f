use super::*;

use trellis_core::schema::db::{Column, Table};

/// A statement to add a column to a table.
#[derive(Debug, Clone)]
pub struct AddColumn {
    /// Name of the table to add the column to.
    pub table: Name,

    /// Column definition.
    pub column: ColumnDef,

    pub if_not_exists: bool,
}

impl Statement {
    pub fn add_column(table: &Table, column: &Column) -> Self {
        AddColumn {
            table: Name::from(&table.name),
            column: ColumnDef::from_schema(column),
            if_not_exists: true,
        }
        .into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
