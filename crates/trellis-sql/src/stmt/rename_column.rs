use super::*;

use trellis_core::schema::db::{Column, Table};

/// Renames a column. Skipped when the column was already renamed.
#[derive(Debug, Clone)]
pub struct RenameColumn {
    /// Name of the table, after any rename.
    pub table: Name,
    pub from: Name,
    pub to: Name,
}

impl Statement {
    pub fn rename_column(table: &Table, from: &Column, to: &Column) -> Self {
        RenameColumn {
            table: Name::from(&table.name),
            from: Name::from(&from.name),
            to: Name::from(&to.name),
        }
        .into()
    }
}

impl From<RenameColumn> for Statement {
    fn from(value: RenameColumn) -> Self {
        Self::RenameColumn(value)
    }
}
