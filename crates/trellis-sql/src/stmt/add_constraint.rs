use super::*;

use trellis_core::schema::db::{Check, ForeignKey, PrimaryKey, Table, TableId, Unique};

/// Adds a named constraint to an existing table unless a constraint with
/// that name is already present.
#[derive(Debug, Clone)]
pub struct AddConstraint {
    pub table: TableId,
    pub constraint: Constraint,
}

#[derive(Debug, Clone)]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    Unique(Unique),
    Check(Check),
    ForeignKey(ForeignKey),
}

impl Constraint {
    pub fn name(&self) -> &str {
        match self {
            Constraint::PrimaryKey(pk) => &pk.name,
            Constraint::Unique(unique) => &unique.name,
            Constraint::Check(check) => &check.name,
            Constraint::ForeignKey(fk) => &fk.name,
        }
    }
}

impl Statement {
    pub fn add_constraint(table: &Table, constraint: impl Into<Constraint>) -> Self {
        AddConstraint {
            table: table.id,
            constraint: constraint.into(),
        }
        .into()
    }
}

impl From<AddConstraint> for Statement {
    fn from(value: AddConstraint) -> Self {
        Self::AddConstraint(value)
    }
}

impl From<&PrimaryKey> for Constraint {
    fn from(value: &PrimaryKey) -> Self {
        Constraint::PrimaryKey(value.clone())
    }
}

impl From<&Unique> for Constraint {
    fn from(value: &Unique) -> Self {
        Constraint::Unique(value.clone())
    }
}

impl From<&Check> for Constraint {
    fn from(value: &Check) -> Self {
        Constraint::Check(value.clone())
    }
}

impl From<&ForeignKey> for Constraint {
    fn from(value: &ForeignKey) -> Self {
        Constraint::ForeignKey(value.clone())
    }
}
