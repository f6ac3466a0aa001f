use super::*;

use trellis_core::schema::db::{Column, ColumnDefault, Table, Type};

/// A statement to alter a single property of a column.
#[derive(Debug, Clone)]
pub struct AlterColumn {
    /// Name of the table, after any rename.
    pub table: Name,

    /// Name of the column, after any rename.
    pub column: Name,

    /// Column type after the change
    pub ty: Type,

    pub change: AlterColumnChange,
}

/// Listed in the order the changes are applied to one column. The identity
/// is dropped before the type changes and added back after the default is
/// cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterColumnChange {
    DropIdentity,

    /// Changes the column type, converting existing values with a cast.
    SetType(Type),

    DropDefault,
    SetDefault(ColumnDefault),

    SetNotNull,
    DropNotNull,

    AddIdentity,
}

impl AlterColumnChange {
    /// The changes taking `from` to `to`, in application order.
    pub fn from_diff(from: &Column, to: &Column) -> Vec<AlterColumnChange> {
        let mut changes = vec![];

        if from.identity && !to.identity {
            changes.push(AlterColumnChange::DropIdentity);
        }

        if from.ty != to.ty {
            changes.push(AlterColumnChange::SetType(to.ty.clone()));
        }

        if from.default != to.default {
            changes.push(match &to.default {
                Some(default) => AlterColumnChange::SetDefault(default.clone()),
                None => AlterColumnChange::DropDefault,
            });
        }

        if from.nullable != to.nullable {
            changes.push(if to.nullable {
                AlterColumnChange::DropNotNull
            } else {
                AlterColumnChange::SetNotNull
            });
        }

        if !from.identity && to.identity {
            changes.push(AlterColumnChange::AddIdentity);
        }

        changes
    }
}

impl Statement {
    pub fn alter_column(table: &Table, column: &Column, change: AlterColumnChange) -> Self {
        AlterColumn {
            table: Name::from(&table.name),
            column: Name::from(&column.name),
            ty: column.ty.clone(),
            change,
        }
        .into()
    }
}

impl From<AlterColumn> for Statement {
    fn from(value: AlterColumn) -> Self {
        Self::AlterColumn(value)
    }
}
