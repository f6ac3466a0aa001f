use super::{value::TextArray, Comma, Delimited, Formatter, Ident, Literal, ToSql};

use crate::stmt::{Expr, MatchOp};

impl ToSql for &Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Expr::And(operands) if operands.is_empty() => fmt!(f, "TRUE"),
            Expr::And(operands) => fmt!(f, "(" (Delimited(operands, " AND ")) ")"),
            Expr::Or(operands) if operands.is_empty() => fmt!(f, "FALSE"),
            Expr::Or(operands) => fmt!(f, "(" (Delimited(operands, " OR ")) ")"),
            Expr::Not(expr) => fmt!(f, "NOT (" (&**expr) ")"),
            Expr::Arg(arg) => {
                panic!("argument `{arg:?}` must be bound before the expression is serialized")
            }
            Expr::BinaryOp { lhs, op, rhs } => {
                fmt!(f, (&**lhs) " " (op.to_string()) " " (&**rhs))
            }
            Expr::Column(name) => fmt!(f, (Ident(name))),
            Expr::IsNull(expr) => fmt!(f, (&**expr) " IS NULL"),
            Expr::InList { list, .. } if list.is_empty() => fmt!(f, "FALSE"),
            Expr::InList { expr, list } => fmt!(f, (&**expr) " IN (" (Comma(list)) ")"),
            Expr::Match { expr, op, needle } => {
                let escaped = needle
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                let pattern = match op {
                    MatchOp::Contains => format!("%{escaped}%"),
                    MatchOp::StartsWith => format!("{escaped}%"),
                    MatchOp::EndsWith => format!("%{escaped}"),
                };
                fmt!(f, (&**expr) " LIKE " (Literal(pattern)))
            }
            Expr::ArrayContains { expr, values } => {
                fmt!(f, (&**expr) " @> " (TextArray(values)))
            }
            Expr::ArraySubset { expr, values } => {
                fmt!(f, (&**expr) " <@ " (TextArray(values)))
            }
            Expr::Regex { expr, pattern } => fmt!(f, (&**expr) " ~* " (Literal(pattern))),
            Expr::Value(value) => fmt!(f, value),
        }
    }
}
