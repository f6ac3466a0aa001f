use super::{Arg, Record, Value};

/// Supplies column and argument values to [`Expr::eval`](super::Expr::eval).
pub trait Input {
    fn resolve_column(&mut self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    fn resolve_arg(&mut self, arg: Arg) -> Option<Value> {
        let _ = arg;
        None
    }
}

/// Input with no columns and no arguments; for constant expressions.
#[derive(Debug, Default)]
pub struct ConstInput {}

impl ConstInput {
    pub fn new() -> ConstInput {
        ConstInput {}
    }
}

impl Input for ConstInput {}

/// Columns not present in the record read as null.
impl Input for &Record {
    fn resolve_column(&mut self, name: &str) -> Option<Value> {
        Some(self.get(name).clone())
    }
}

/// A record paired with the evaluation-time arguments of a row filter.
#[derive(Debug, Clone, Copy)]
pub struct RecordWithArgs<'a> {
    record: &'a Record,
    args: &'a [(Arg, Value)],
}

impl<'a> RecordWithArgs<'a> {
    pub fn new(record: &'a Record, args: &'a [(Arg, Value)]) -> Self {
        Self { record, args }
    }
}

/// Arguments not supplied read as null, so predicates on them never match.
impl Input for RecordWithArgs<'_> {
    fn resolve_column(&mut self, name: &str) -> Option<Value> {
        Some(self.record.get(name).clone())
    }

    fn resolve_arg(&mut self, arg: Arg) -> Option<Value> {
        Some(
            self.args
                .iter()
                .find(|(a, _)| *a == arg)
                .map(|(_, value)| value.clone())
                .unwrap_or_default(),
        )
    }
}
