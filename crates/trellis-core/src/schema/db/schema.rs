use super::{Column, ColumnId, NamedDiff, Table, TableId, TablesDiff, TablesDiffItem, View, ViewsDiff};
use crate::Result;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The compiled relational schema. Stored after each apply as the baseline
/// the next declaration is diffed against.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,

    #[serde(default)]
    pub views: Vec<View>,
}

impl Schema {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table).column(id)
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        let id = id.into();
        self.tables
            .iter()
            .find(|table| table.id == id)
            .expect("invalid table ID")
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|view| view.name == name)
    }

    /// Views selecting from `table`, in declaration order.
    pub fn views_for(&self, table: TableId) -> impl Iterator<Item = &View> + '_ {
        self.views.iter().filter(move |view| view.table == table)
    }

    /// The default view of `table`, if it declares one.
    pub fn default_view(&self, table: TableId) -> Option<&View> {
        self.views_for(table).find(|view| view.is_default)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(src: &str) -> Result<Schema> {
        serde_json::from_str(src)
            .map_err(|err| crate::Error::invalid_schema(format!("unreadable schema snapshot: {err}")))
    }
}

impl From<u64> for TableId {
    fn from(value: u64) -> Self {
        TableId::Declared(value)
    }
}

pub struct SchemaDiff<'a> {
    previous: &'a Schema,
    next: &'a Schema,
    tables: TablesDiff<'a>,
    views: ViewsDiff<'a>,
}

impl<'a> SchemaDiff<'a> {
    pub fn from(from: &'a Schema, to: &'a Schema) -> Self {
        let tables = TablesDiff::from(&from.tables, &to.tables);

        // A view pins the columns it selects, so views over a table whose
        // columns change are rebuilt around the change.
        let rebuilt: HashSet<TableId> = tables
            .iter()
            .filter_map(|item| match item {
                TablesDiffItem::AlterTable { to, columns, .. } if !columns.is_empty() => {
                    Some(to.id)
                }
                _ => None,
            })
            .collect();

        let views = NamedDiff::from_with(&from.views, &to.views, |view| {
            rebuilt.contains(&view.table)
        });

        Self {
            previous: from,
            next: to,
            tables,
            views,
        }
    }

    pub fn tables(&self) -> &TablesDiff<'a> {
        &self.tables
    }

    pub fn views(&self) -> &ViewsDiff<'a> {
        &self.views
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.views.is_empty()
    }

    pub fn previous(&self) -> &'a Schema {
        self.previous
    }

    pub fn next(&self) -> &'a Schema {
        self.next
    }
}
