use super::{Formatter, ToSql};

use trellis_core::schema::db::Type;

impl ToSql for &Type {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Type::Boolean => fmt!(f, "BOOLEAN"),
            Type::Integer(2) => fmt!(f, "SMALLINT"),
            Type::Integer(4) => fmt!(f, "INTEGER"),
            Type::Integer(_) => fmt!(f, "BIGINT"),
            Type::Text => fmt!(f, "TEXT"),
            Type::VarChar(size) => fmt!(f, "VARCHAR(" (*size) ")"),
            Type::Numeric(None) => fmt!(f, "NUMERIC"),
            Type::Numeric(Some((precision, scale))) => {
                fmt!(f, "NUMERIC(" (*precision) ", " (*scale) ")")
            }
            Type::Date => fmt!(f, "DATE"),
            Type::Time => fmt!(f, "TIME"),
            Type::Timestamp => fmt!(f, "TIMESTAMP"),
            Type::TimestampTz => fmt!(f, "TIMESTAMPTZ"),
            Type::Uuid => fmt!(f, "UUID"),
            Type::Jsonb => fmt!(f, "JSONB"),
            Type::TextArray => fmt!(f, "TEXT[]"),
        }
    }
}
