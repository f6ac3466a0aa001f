use super::*;

use trellis_core::schema::db::{PrimaryKey, Table, TableId};

/// Creates a table with its columns and primary key. Unique, check, and
/// foreign key constraints are added by separate statements once every
/// table exists.
#[derive(Debug, Clone)]
pub struct CreateTable {
    pub table: TableId,

    /// Name of the table
    pub name: Name,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Primary key constraint
    pub primary_key: PrimaryKey,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl Statement {
    pub fn create_table(table: &Table) -> Self {
        CreateTable {
            table: table.id,
            name: Name::from(&table.name),
            columns: table.columns.iter().map(ColumnDef::from_schema).collect(),
            primary_key: table.primary_key.clone(),
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
