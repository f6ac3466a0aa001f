use super::{Comma, Formatter, Literal, ToSql};

use crate::stmt::Value;

/// A text array literal, `ARRAY['a', 'b']::TEXT[]`.
pub(super) struct TextArray<'a>(pub(super) &'a [Value]);

impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "TRUE"),
            Value::Bool(false) => fmt!(f, "FALSE"),
            Value::I64(v) => fmt!(f, (v.to_string())),
            Value::F64(v) if v.is_finite() => fmt!(f, (v.to_string())),
            Value::F64(v) => fmt!(f, (Literal(v.to_string())) "::NUMERIC"),
            Value::String(v) => fmt!(f, (Literal(v))),
            Value::List(items) => fmt!(f, (TextArray(items))),
            Value::Json(v) => fmt!(f, (Literal(v.to_string())) "::JSONB"),
        }
    }
}

impl ToSql for TextArray<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.0.is_empty() {
            fmt!(f, "'{}'::TEXT[]");
        } else {
            fmt!(f, "ARRAY[" (Comma(self.0)) "]::TEXT[]");
        }
    }
}
