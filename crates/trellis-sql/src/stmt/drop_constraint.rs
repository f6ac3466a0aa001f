use super::*;

use trellis_core::schema::db::Table;

#[derive(Debug, Clone)]
pub struct DropConstraint {
    pub table: Name,
    pub name: Name,
}

impl Statement {
    pub fn drop_constraint(table: &Table, name: &str) -> Self {
        DropConstraint {
            table: Name::from(&table.name),
            name: Name::from(name),
        }
        .into()
    }
}

impl From<DropConstraint> for Statement {
    fn from(value: DropConstraint) -> Self {
        Self::DropConstraint(value)
    }
}
