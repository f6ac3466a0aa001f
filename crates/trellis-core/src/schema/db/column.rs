use super::{TableId, Type};
use crate::stmt::Value;

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    pub id: ColumnId,

    /// The name of the column in the database.
    pub name: String,

    /// The database storage type of the column.
    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,

    /// `GENERATED BY DEFAULT AS IDENTITY`
    #[serde(default)]
    pub identity: bool,

    /// True if the column is part of the table's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Values are produced by the database; writes to the column are ignored.
    #[serde(default)]
    pub read_only: bool,
}

/// Identifies a column independently of its name: the owning table and the
/// declared field id. Field id `0` is the implicit `id` column.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct ColumnId {
    pub table: TableId,
    pub field: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDefault {
    /// A literal value
    Value(Value),

    /// `now()`
    Now,

    /// `gen_random_uuid()`
    RandomUuid,
}

impl Column {
    fn has_diff(&self, other: &Column) -> bool {
        self.name != other.name
            || self.ty != other.ty
            || self.nullable != other.nullable
            || self.default != other.default
            || self.identity != other.identity
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({:?}/{})", self.table, self.field)
    }
}

pub struct ColumnsDiff<'a> {
    items: Vec<ColumnsDiffItem<'a>>,
}

impl<'a> ColumnsDiff<'a> {
    /// Columns are matched by id, so a column whose name changed is altered
    /// (renamed) rather than dropped and re-added.
    pub fn from(from: &'a [Column], to: &'a [Column]) -> Self {
        let mut items = vec![];

        let from_map =
            HashMap::<u64, &'a Column>::from_iter(from.iter().map(|from| (from.id.field, from)));
        let to_map = HashMap::<u64, &'a Column>::from_iter(to.iter().map(|to| (to.id.field, to)));

        for from in from {
            match to_map.get(&from.id.field) {
                Some(to) => {
                    if from.has_diff(to) {
                        items.push(ColumnsDiffItem::AlterColumn { from, to });
                    }
                }
                None => items.push(ColumnsDiffItem::DropColumn(from)),
            }
        }

        for to in to {
            if !from_map.contains_key(&to.id.field) {
                items.push(ColumnsDiffItem::AddColumn(to));
            }
        }

        Self { items }
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnsDiffItem<'a>> {
        self.items.iter()
    }
}

pub enum ColumnsDiffItem<'a> {
    AddColumn(&'a Column),
    DropColumn(&'a Column),
    AlterColumn { from: &'a Column, to: &'a Column },
}
