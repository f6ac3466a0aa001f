#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::{Ident, Literal};

// Fragment serializers
mod column_def;
mod expr;
mod statement;
mod ty;
mod value;

use crate::stmt::{Arg, Expr, Statement, Value};

use trellis_core::schema::db;

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized. Table and
    /// column ids in statements resolve to names through it.
    schema: &'a db::Schema,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl<'a> Serializer<'a> {
    pub fn postgresql(schema: &'a db::Schema) -> Self {
        Serializer { schema }
    }

    /// Serializes a DDL statement. Literals are inlined; the output carries
    /// no parameters and is terminated by `;`.
    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serializes a boolean expression, as it would appear in a `WHERE` or
    /// `CHECK` clause.
    ///
    /// # Panics
    ///
    /// Panics if `expr` still references an [`Arg`]. Use
    /// [`serialize_bound_expr`](Self::serialize_bound_expr) for filters
    /// built against a principal.
    pub fn serialize_expr(&self, expr: &Expr) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        expr.to_sql(&mut fmt);
        ret
    }

    /// Substitutes `args` into `expr`, then serializes it. Arguments with no
    /// binding render as `NULL`.
    pub fn serialize_bound_expr(&self, expr: &Expr, args: &[(Arg, Value)]) -> String {
        self.serialize_expr(&expr.clone().bind(args))
    }

    fn table(&self, id: impl Into<db::TableId>) -> &'a db::Table {
        self.schema.table(id.into())
    }

    fn table_name(&self, id: impl Into<db::TableId>) -> Ident<&'a str> {
        Ident(&self.table(id).name)
    }

    fn column_name(&self, id: impl Into<db::ColumnId>) -> Ident<&'a str> {
        let column = self.schema.column(id.into());
        Ident(&column.name)
    }
}
