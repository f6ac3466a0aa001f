use super::Value;

use std::cmp::Ordering;

impl Value {
    /// SQL-style comparison. Returns `None` when either side is null or the
    /// two values are not comparable.
    pub fn sql_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Bool(lhs), Value::Bool(rhs)) => Some(lhs.cmp(rhs)),
            (Value::I64(lhs), Value::I64(rhs)) => Some(lhs.cmp(rhs)),
            (Value::I64(_) | Value::F64(_), Value::I64(_) | Value::F64(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
            (Value::List(lhs), Value::List(rhs)) if lhs == rhs => Some(Ordering::Equal),
            (Value::Json(lhs), Value::Json(rhs)) if lhs == rhs => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Total order used for sorting records in memory: nulls sort last in
    /// ascending order, matching PostgreSQL's default.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.sql_cmp(other).unwrap_or(Ordering::Equal),
        }
    }
}
