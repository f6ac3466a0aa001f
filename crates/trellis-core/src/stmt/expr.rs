use super::{Arg, BinaryOp, Value};

use serde::{Deserialize, Serialize};

/// A boolean or scalar expression over the columns of a single table.
///
/// Expressions appear in CHECK constraints, view filters, and row filters
/// derived from permission rules. The same tree is rendered to SQL by the
/// serializer and evaluated in memory by [`Expr::eval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// AND a set of expressions. An empty set is true.
    And(Vec<Expr>),

    /// OR a set of expressions. An empty set is false.
    Or(Vec<Expr>),

    Not(Box<Expr>),

    /// A value supplied at evaluation time
    Arg(Arg),

    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    /// References a column of the table by name
    Column(String),

    /// Whether an expression is null. This is different from a binary
    /// expression because of how databases treat null comparisons.
    IsNull(Box<Expr>),

    /// Set membership. An empty list never matches.
    InList { expr: Box<Expr>, list: Vec<Value> },

    /// Case-sensitive substring, prefix, or suffix match.
    Match {
        expr: Box<Expr>,
        op: MatchOp,
        needle: String,
    },

    /// The array expression contains every element of `values` (`@>`).
    ArrayContains { expr: Box<Expr>, values: Vec<Value> },

    /// Every element of the array expression is in `values` (`<@`).
    ArraySubset { expr: Box<Expr>, values: Vec<Value> },

    /// Case-insensitive POSIX regular expression match (`~*`). Only the
    /// database evaluates these.
    Regex { expr: Box<Expr>, pattern: String },

    /// Evaluates to a constant value
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOp {
    Contains,
    StartsWith,
    EndsWith,
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub const fn arg(arg: Arg) -> Self {
        Self::Arg(arg)
    }

    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub const fn from_bool(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Self::BinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Self::IsNull(Box::new(expr.into()))
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Self {
        Self::not(Self::is_null(expr))
    }

    pub fn not(expr: impl Into<Expr>) -> Self {
        Self::Not(Box::new(expr.into()))
    }

    /// Builds an AND, flattening nested ANDs. A single operand is returned
    /// as-is.
    pub fn and_from_vec(operands: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Expr::And(nested) => flat.extend(nested),
                operand => flat.push(operand),
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Expr::And(flat)
        }
    }

    /// Builds an OR, flattening nested ORs. A single operand is returned
    /// as-is.
    pub fn or_from_vec(operands: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Expr::Or(nested) => flat.extend(nested),
                operand => flat.push(operand),
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Expr::Or(flat)
        }
    }

    pub fn in_list(expr: impl Into<Expr>, list: Vec<Value>) -> Self {
        Self::InList {
            expr: Box::new(expr.into()),
            list,
        }
    }

    pub fn matches(expr: impl Into<Expr>, op: MatchOp, needle: impl Into<String>) -> Self {
        Self::Match {
            expr: Box::new(expr.into()),
            op,
            needle: needle.into(),
        }
    }

    pub fn array_contains(expr: impl Into<Expr>, values: Vec<Value>) -> Self {
        Self::ArrayContains {
            expr: Box::new(expr.into()),
            values,
        }
    }

    pub fn array_subset(expr: impl Into<Expr>, values: Vec<Value>) -> Self {
        Self::ArraySubset {
            expr: Box::new(expr.into()),
            values,
        }
    }

    pub fn regex(expr: impl Into<Expr>, pattern: impl Into<String>) -> Self {
        Self::Regex {
            expr: Box::new(expr.into()),
            pattern: pattern.into(),
        }
    }

    /// Returns `true` if the expression is the constant `true`
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    /// Returns `true` if the expression is the constant `false`
    pub fn is_false(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(false)))
    }

    /// Returns `true` if the expression references an evaluation-time argument.
    pub fn has_args(&self) -> bool {
        let mut found = false;
        self.walk(&mut |expr| found |= matches!(expr, Expr::Arg(_)));
        found
    }

    /// Names of every column the expression references, in visit order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![];
        self.walk(&mut |expr| {
            if let Expr::Column(name) = expr {
                columns.push(name.as_str());
            }
        });
        columns
    }

    /// Replaces every argument with its value from `args`. Arguments not
    /// listed become null.
    pub fn bind(self, args: &[(Arg, Value)]) -> Expr {
        let bind = |expr: Box<Expr>| Box::new(expr.bind(args));

        match self {
            Expr::Arg(arg) => Expr::Value(
                args.iter()
                    .find(|(a, _)| *a == arg)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default(),
            ),
            Expr::And(operands) => {
                Expr::And(operands.into_iter().map(|e| e.bind(args)).collect())
            }
            Expr::Or(operands) => Expr::Or(operands.into_iter().map(|e| e.bind(args)).collect()),
            Expr::Not(expr) => Expr::Not(bind(expr)),
            Expr::BinaryOp { lhs, op, rhs } => Expr::BinaryOp {
                lhs: bind(lhs),
                op,
                rhs: bind(rhs),
            },
            Expr::IsNull(expr) => Expr::IsNull(bind(expr)),
            Expr::InList { expr, list } => Expr::InList {
                expr: bind(expr),
                list,
            },
            Expr::Match { expr, op, needle } => Expr::Match {
                expr: bind(expr),
                op,
                needle,
            },
            Expr::ArrayContains { expr, values } => Expr::ArrayContains {
                expr: bind(expr),
                values,
            },
            Expr::ArraySubset { expr, values } => Expr::ArraySubset {
                expr: bind(expr),
                values,
            },
            Expr::Regex { expr, pattern } => Expr::Regex {
                expr: bind(expr),
                pattern,
            },
            expr @ (Expr::Column(_) | Expr::Value(_)) => expr,
        }
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);

        match self {
            Expr::And(operands) | Expr::Or(operands) => {
                for operand in operands {
                    operand.walk(f);
                }
            }
            Expr::BinaryOp { lhs, rhs, .. } => {
                lhs.walk(f);
                rhs.walk(f);
            }
            Expr::Not(expr)
            | Expr::IsNull(expr)
            | Expr::InList { expr, .. }
            | Expr::Match { expr, .. }
            | Expr::ArrayContains { expr, .. }
            | Expr::ArraySubset { expr, .. }
            | Expr::Regex { expr, .. } => expr.walk(f),
            Expr::Arg(_) | Expr::Column(_) | Expr::Value(_) => {}
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Arg> for Expr {
    fn from(arg: Arg) -> Self {
        Self::Arg(arg)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}
