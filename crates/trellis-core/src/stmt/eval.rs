use crate::{
    stmt::{BinaryOp, ConstInput, Expr, Input, MatchOp, Value},
    Error, Result,
};
use std::cmp::Ordering;

impl Expr {
    /// Evaluates the expression with SQL semantics: comparisons involving
    /// null yield null, and AND/OR follow three-valued logic.
    pub fn eval(&self, mut input: impl Input) -> Result<Value> {
        self.eval_ref(&mut input)
    }

    pub fn eval_const(&self) -> Result<Value> {
        self.eval(ConstInput::new())
    }

    /// Evaluates a predicate the way a WHERE clause does: only `true` passes,
    /// null and `false` do not.
    pub fn eval_bool(&self, mut input: impl Input) -> Result<bool> {
        match self.eval_ref(&mut input)? {
            Value::Bool(value) => Ok(value),
            Value::Null => Ok(false),
            value => Err(Error::expression_evaluation_failed(format!(
                "expected a boolean, got `{value}`"
            ))),
        }
    }

    fn eval_ref(&self, input: &mut impl Input) -> Result<Value> {
        match self {
            Expr::And(operands) => {
                let mut unknown = false;
                for operand in operands {
                    match truth(operand.eval_ref(input)?)? {
                        Some(false) => return Ok(Value::Bool(false)),
                        Some(true) => {}
                        None => unknown = true,
                    }
                }
                Ok(if unknown { Value::Null } else { Value::Bool(true) })
            }
            Expr::Or(operands) => {
                let mut unknown = false;
                for operand in operands {
                    match truth(operand.eval_ref(input)?)? {
                        Some(true) => return Ok(Value::Bool(true)),
                        Some(false) => {}
                        None => unknown = true,
                    }
                }
                Ok(if unknown { Value::Null } else { Value::Bool(false) })
            }
            Expr::Not(expr) => Ok(match truth(expr.eval_ref(input)?)? {
                Some(value) => Value::Bool(!value),
                None => Value::Null,
            }),
            Expr::Arg(arg) => input.resolve_arg(*arg).ok_or_else(|| {
                Error::expression_evaluation_failed(format!("unresolved argument {arg:?}"))
            }),
            Expr::BinaryOp { lhs, op, rhs } => {
                let lhs = lhs.eval_ref(input)?;
                let rhs = rhs.eval_ref(input)?;

                if lhs.is_null() || rhs.is_null() {
                    return Ok(Value::Null);
                }

                let Some(ordering) = lhs.sql_cmp(&rhs) else {
                    // Values of different shapes are never equal
                    return match op {
                        BinaryOp::Eq => Ok(Value::Bool(false)),
                        BinaryOp::Ne => Ok(Value::Bool(true)),
                        _ => Err(Error::expression_evaluation_failed(format!(
                            "cannot compare `{lhs}` {op} `{rhs}`"
                        ))),
                    };
                };

                Ok(Value::Bool(match op {
                    BinaryOp::Eq => ordering == Ordering::Equal,
                    BinaryOp::Ne => ordering != Ordering::Equal,
                    BinaryOp::Ge => ordering != Ordering::Less,
                    BinaryOp::Gt => ordering == Ordering::Greater,
                    BinaryOp::Le => ordering != Ordering::Greater,
                    BinaryOp::Lt => ordering == Ordering::Less,
                }))
            }
            Expr::Column(name) => input.resolve_column(name).ok_or_else(|| {
                Error::expression_evaluation_failed(format!("unresolved column `{name}`"))
            }),
            Expr::IsNull(expr) => Ok(Value::Bool(expr.eval_ref(input)?.is_null())),
            Expr::InList { expr, list } => {
                let value = expr.eval_ref(input)?;
                if value.is_null() {
                    return Ok(Value::Null);
                }
                Ok(Value::Bool(list.iter().any(|item| {
                    value.sql_cmp(item) == Some(Ordering::Equal)
                })))
            }
            Expr::Match { expr, op, needle } => match expr.eval_ref(input)? {
                Value::Null => Ok(Value::Null),
                Value::String(haystack) => Ok(Value::Bool(match op {
                    MatchOp::Contains => haystack.contains(needle.as_str()),
                    MatchOp::StartsWith => haystack.starts_with(needle.as_str()),
                    MatchOp::EndsWith => haystack.ends_with(needle.as_str()),
                })),
                value => Err(Error::expression_evaluation_failed(format!(
                    "pattern match on non-text value `{value}`"
                ))),
            },
            Expr::ArrayContains { expr, values } => {
                array_op(expr.eval_ref(input)?, |items| {
                    values.iter().all(|value| items.contains(value))
                })
            }
            Expr::ArraySubset { expr, values } => array_op(expr.eval_ref(input)?, |items| {
                items.iter().all(|item| values.contains(item))
            }),
            Expr::Regex { .. } => Err(Error::expression_evaluation_failed(
                "regular expressions are evaluated by the database only",
            )),
            Expr::Value(value) => Ok(value.clone()),
        }
    }
}

fn truth(value: Value) -> Result<Option<bool>> {
    match value {
        Value::Bool(value) => Ok(Some(value)),
        Value::Null => Ok(None),
        value => Err(Error::expression_evaluation_failed(format!(
            "expected a boolean, got `{value}`"
        ))),
    }
}

fn array_op(value: Value, f: impl FnOnce(&[Value]) -> bool) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::List(items) => Ok(Value::Bool(f(&items))),
        value => Err(Error::expression_evaluation_failed(format!(
            "array operator on non-array value `{value}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::record;
    use crate::stmt::{Arg, Expr, MatchOp, RecordWithArgs, Value};

    #[test]
    fn null_comparisons_are_unknown() {
        let expr = Expr::eq(Expr::column("status"), "active");
        let row = record!("status" => Value::Null);

        assert_eq!(expr.eval(&row).unwrap(), Value::Null);
        assert!(!expr.eval_bool(&row).unwrap());
        assert!(!Expr::not(expr).eval_bool(&row).unwrap());
    }

    #[test]
    fn three_valued_or() {
        let row = record!("a" => Value::Null, "b" => 1);
        let expr = Expr::or_from_vec(vec![
            Expr::eq(Expr::column("a"), 1),
            Expr::eq(Expr::column("b"), 1),
        ]);
        assert!(expr.eval_bool(&row).unwrap());
    }

    #[test]
    fn match_is_case_sensitive() {
        let row = record!("name" => "Widget Pro");
        assert!(Expr::matches(Expr::column("name"), MatchOp::Contains, "Pro")
            .eval_bool(&row)
            .unwrap());
        assert!(!Expr::matches(Expr::column("name"), MatchOp::Contains, "pro")
            .eval_bool(&row)
            .unwrap());
    }

    #[test]
    fn args_resolve_from_input() {
        let row = record!("owner_id" => "u1");
        let args = [(Arg::PrincipalId, Value::from("u1"))];
        let expr = Expr::eq(Expr::column("owner_id"), Arg::PrincipalId);

        assert!(expr.eval_bool(RecordWithArgs::new(&row, &args)).unwrap());
        assert!(!expr.eval_bool(RecordWithArgs::new(&row, &[])).unwrap());
    }

    #[test]
    fn regex_is_not_evaluated_in_memory() {
        let row = record!("email" => "a@b.co");
        let err = Expr::regex(Expr::column("email"), "^.+@.+$")
            .eval(&row)
            .unwrap_err();
        assert!(err.is_expression_evaluation_failed());
    }
}
