use super::{
    Check, Column, ColumnId, ColumnsDiff, ForeignKey, Index, NamedDiff, PrimaryKey, Unique,
};

use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};

/// A database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    pub primary_key: PrimaryKey,

    #[serde(default)]
    pub indices: Vec<Index>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    #[serde(default)]
    pub checks: Vec<Check>,

    #[serde(default)]
    pub uniques: Vec<Unique>,
}

/// Uniquely identifies a table, independently of its name.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    /// A declared table, by its declared id
    Declared(u64),

    /// The junction table of a many-to-many relationship field
    Junction { table: u64, field: u64 },
}

impl Table {
    pub(crate) fn new(id: TableId, name: String) -> Self {
        Self {
            id,
            name: name.clone(),
            columns: vec![],
            primary_key: PrimaryKey {
                name: format!("pk_{name}"),
                columns: vec![],
            },
            indices: vec![],
            foreign_keys: vec![],
            checks: vec![],
            uniques: vec![],
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.columns
            .iter()
            .find(|column| column.id == id)
            .expect("invalid column ID")
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .columns
            .iter()
            .map(|column_id| self.column(*column_id))
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.id, TableId::Junction { .. })
    }
}

impl TableId {
    /// The declared table this table belongs to.
    pub fn declared(self) -> u64 {
        match self {
            TableId::Declared(id) => id,
            TableId::Junction { table, .. } => table,
        }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableId::Declared(id) => write!(fmt, "TableId({id})"),
            TableId::Junction { table, field } => write!(fmt, "TableId({table}:{field})"),
        }
    }
}

pub struct TablesDiff<'a> {
    items: Vec<TablesDiffItem<'a>>,
}

impl<'a> TablesDiff<'a> {
    /// Tables are matched by id; a matched table whose name changed is a
    /// rename.
    pub fn from(from: &'a [Table], to: &'a [Table]) -> Self {
        let mut items = vec![];

        let from_map = HashMap::<TableId, &'a Table>::from_iter(from.iter().map(|t| (t.id, t)));
        let to_map = HashMap::<TableId, &'a Table>::from_iter(to.iter().map(|t| (t.id, t)));

        // Foreign keys depend on the referenced key constraint. When that
        // constraint is rebuilt the foreign keys pointing at it are rebuilt
        // with it.
        let rekeyed: HashSet<TableId> = from
            .iter()
            .filter(|from| match to_map.get(&from.id) {
                Some(to) => {
                    from.name != to.name
                        || from.primary_key.columns != to.primary_key.columns
                        || from.uniques != to.uniques
                }
                None => true,
            })
            .map(|from| from.id)
            .collect();

        for from in from {
            let Some(to) = to_map.get(&from.id) else {
                items.push(TablesDiffItem::DropTable(from));
                continue;
            };

            let columns = ColumnsDiff::from(&from.columns, &to.columns);
            let primary_key = (from.primary_key.columns != to.primary_key.columns)
                .then_some((&from.primary_key, &to.primary_key));
            let indices = NamedDiff::from(&from.indices, &to.indices);
            let foreign_keys = NamedDiff::from_with(&from.foreign_keys, &to.foreign_keys, |fk| {
                rekeyed.contains(&fk.references)
            });
            let checks = NamedDiff::from(&from.checks, &to.checks);
            let uniques = NamedDiff::from(&from.uniques, &to.uniques);

            if from.name != to.name
                || !columns.is_empty()
                || primary_key.is_some()
                || !indices.is_empty()
                || !foreign_keys.is_empty()
                || !checks.is_empty()
                || !uniques.is_empty()
            {
                items.push(TablesDiffItem::AlterTable {
                    from,
                    to,
                    columns,
                    primary_key,
                    indices,
                    foreign_keys,
                    checks,
                    uniques,
                });
            }
        }

        for to in to {
            if !from_map.contains_key(&to.id) {
                items.push(TablesDiffItem::CreateTable(to));
            }
        }

        Self { items }
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TablesDiffItem<'a>> {
        self.items.iter()
    }
}

pub enum TablesDiffItem<'a> {
    CreateTable(&'a Table),
    DropTable(&'a Table),
    AlterTable {
        from: &'a Table,
        to: &'a Table,
        columns: ColumnsDiff<'a>,
        /// Previous and next primary key, when its columns changed. A rename
        /// of the table renames the constraint along with it.
        primary_key: Option<(&'a PrimaryKey, &'a PrimaryKey)>,
        indices: NamedDiff<'a, Index>,
        foreign_keys: NamedDiff<'a, ForeignKey>,
        checks: NamedDiff<'a, Check>,
        uniques: NamedDiff<'a, Unique>,
    },
}
