use super::{Formatter, Ident, Literal, ToSql};

use crate::stmt::ColumnDef;
use trellis_core::schema::db::{ColumnDefault, Type};

/// A column default expression.
pub(super) struct DefaultExpr<'a>(pub(super) &'a ColumnDefault, pub(super) &'a Type);

impl ToSql for &ColumnDef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = Ident(&self.name);
        let ty = &self.ty;

        fmt!(f, name " " ty);

        if self.identity {
            fmt!(f, " GENERATED BY DEFAULT AS IDENTITY");
        }

        if self.not_null {
            fmt!(f, " NOT NULL");
        }

        if let Some(default) = &self.default {
            fmt!(f, " DEFAULT " (DefaultExpr(default, ty)));
        }
    }
}

impl ToSql for DefaultExpr<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match (self.0, self.1) {
            (ColumnDefault::Now, _) => fmt!(f, "now()"),
            (ColumnDefault::RandomUuid, _) => fmt!(f, "gen_random_uuid()"),
            // A JSONB column stores scalars and lists as JSON documents
            (ColumnDefault::Value(value), Type::Jsonb) if !value.is_null() => {
                let json = serde_json::Value::from(value.clone());
                fmt!(f, (Literal(json.to_string())) "::JSONB")
            }
            (ColumnDefault::Value(value), _) => fmt!(f, value),
        }
    }
}

