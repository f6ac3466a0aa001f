use super::*;

use trellis_core::schema::db::{Column, Table};

/// A statement to drop a column. Indexes and constraints covering only
/// that column are dropped along with it.
#[derive(Debug, Clone)]
pub struct DropColumn {
    /// Name of the table.
    pub table: Name,

    /// Name of the column.
    pub name: Name,

    /// Whether or not to add `IF EXISTS` clauses.
    pub if_exists: bool,
}

impl Statement {
    pub fn drop_column(table: &Table, column: &Column) -> Self {
        DropColumn {
            table: Name::from(&table.name),
            name: Name::from(&column.name),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropColumn> for Statement {
    fn from(value: DropColumn) -> Self {
        Self::DropColumn(value)
    }
}
