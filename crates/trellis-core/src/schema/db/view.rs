use super::{Named, NamedDiff, TableId};
use crate::{
    stmt::{Direction, Expr, Record},
    Result,
};

use serde::{Deserialize, Serialize};

/// A database view compiled from a declared view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Relation name, `<table>_<view-slug>`
    pub name: String,

    /// The table the view selects from
    pub table: TableId,

    /// Identifier of the declared view
    pub source: String,

    pub query: ViewQuery,

    /// The view applied when a table is queried without selecting one
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Visible columns, by name, in output order. Columns not listed cannot
    /// be retrieved through the view.
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expr>,

    /// ORDER BY terms. A group-by column, when declared, comes first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

pub type ViewsDiff<'a> = NamedDiff<'a, View>;

impl Named for View {
    fn name(&self) -> &str {
        &self.name
    }
}

impl View {
    /// Evaluates the view over rows of its base table: filters, orders, then
    /// projects, with the semantics of the database view.
    pub fn apply(&self, records: impl IntoIterator<Item = Record>) -> Result<Vec<Record>> {
        Ok(self
            .select(records)?
            .iter()
            .map(|row| self.project(row))
            .collect())
    }

    /// Rows passing the view filter, in view order, with every column still
    /// present.
    pub fn select(&self, records: impl IntoIterator<Item = Record>) -> Result<Vec<Record>> {
        let mut rows = vec![];

        for record in records {
            let keep = match &self.query.filter {
                Some(filter) => filter.eval_bool(&record)?,
                None => true,
            };

            if keep {
                rows.push(record);
            }
        }

        if !self.query.order_by.is_empty() {
            // Stable, so rows equal on every term keep their input order
            rows.sort_by(|a, b| {
                for term in &self.query.order_by {
                    let lhs = a.get(&term.column);
                    let rhs = b.get(&term.column);
                    let ordering = match term.direction {
                        Direction::Asc => lhs.sort_cmp(rhs),
                        Direction::Desc => rhs.sort_cmp(lhs),
                    };
                    if ordering.is_ne() {
                        return ordering;
                    }
                }
                std::cmp::Ordering::Equal
            });
        }

        Ok(rows)
    }

    /// The columns of `record` visible through the view, in view order.
    pub fn project(&self, record: &Record) -> Record {
        record.project(self.query.columns.iter().map(String::as_str))
    }
}
