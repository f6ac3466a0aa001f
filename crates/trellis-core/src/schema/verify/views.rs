use super::*;
use crate::{
    schema::{
        app::{Condition, Operator, View},
        name::slug,
    },
    stmt::Value,
};

impl Verify<'_> {
    pub(super) fn verify_views(&mut self, table: &Table) {
        let defaults = table.views.iter().filter(|view| view.is_default).count();
        if defaults > 1 {
            self.table_failure(
                table,
                format!("at most one default view per table (found {defaults})"),
            );
        }

        let slugs: Vec<String> = table.views.iter().map(|view| slug(&view.id)).collect();
        for id in duplicates(slugs.iter().map(String::as_str)) {
            self.table_failure(table, format!("duplicate view id `{id}`"));
        }

        for view in &table.views {
            self.verify_view(table, view);
        }
    }

    fn verify_view(&mut self, table: &Table, view: &View) {
        let label = format!("view `{}`", view.id);

        if view.name.trim().is_empty() {
            self.table_failure(table, format!("{label}: view name must not be empty"));
        }

        if slug(&view.id).is_empty() {
            self.table_failure(
                table,
                format!("{label}: view id must contain a letter or digit"),
            );
        }

        if let Some(filter) = &view.filters {
            for condition in filter.conditions() {
                if let Some(message) = check_condition(table, condition) {
                    self.table_failure(table, format!("{label}: {message}"));
                }
            }
        }

        let ordered = view
            .sorts
            .iter()
            .map(|sort| &sort.field)
            .chain(view.group_by.iter().map(|group| &group.field));

        for field in ordered {
            if !has_column(table, field) {
                self.table_failure(table, format!("{label}: sort field `{field}` does not exist"));
            }
        }

        if let Some(fields) = &view.fields {
            if fields.is_empty() {
                self.table_failure(table, format!("{label}: fields must not be empty"));
            }

            for field in fields {
                if !has_column(table, field) {
                    self.table_failure(table, format!("{label}: field `{field}` does not exist"));
                }
            }

            for field in duplicates(fields.iter().map(String::as_str)) {
                self.table_failure(table, format!("{label}: field `{field}` listed more than once"));
            }
        }
    }
}

/// What a filter value on a column has to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Text,
    Number,
    Boolean,

    /// Dates, times and uuids: written as strings, but not text
    Formatted,

    /// JSON, attachments and relationship columns
    Any,
}

impl Operand {
    fn of(table: &Table, field: &str) -> Operand {
        let Some(field) = table.field(field) else {
            // The implicit `id`
            return Operand::Number;
        };

        match &field.ty {
            ty if ty.is_text() => Operand::Text,
            ty if ty.is_numeric() => Operand::Number,
            FieldTy::Checkbox => Operand::Boolean,
            FieldTy::Date
            | FieldTy::Datetime
            | FieldTy::Time
            | FieldTy::CreatedAt
            | FieldTy::UpdatedAt
            | FieldTy::DeletedAt
            | FieldTy::Uuid => Operand::Formatted,
            _ => Operand::Any,
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Operand::Any, _) => true,
            (Operand::Text | Operand::Formatted, Value::String(_)) => true,
            (Operand::Number, Value::I64(_) | Value::F64(_)) => true,
            (Operand::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

/// Operator and value must agree: unary operators take no value, set
/// operators take an array, substring operators take text. Values must fit
/// the column they are compared with.
fn check_condition(table: &Table, condition: &Condition) -> Option<String> {
    let field = &condition.field;

    if !has_column(table, field) {
        return Some(format!("filter field `{field}` does not exist"));
    }

    let op = condition.operator;
    let value = condition.value.as_ref().filter(|value| !value.is_null());
    let is_array = table.field(field).is_some_and(|f| f.ty.is_array());
    let operand = Operand::of(table, field);

    // Array columns compare element-wise or against whole lists
    let mismatch = |value: &Value| {
        !is_array
            && match value.as_list() {
                Some(items) if op.takes_list() => items.iter().any(|item| !operand.accepts(item)),
                _ => !operand.accepts(value),
            }
    };

    let message = match value {
        Some(_) if op.is_unary() => format!("operator {op:?} on `{field}` takes no value"),
        Some(value) if op.takes_list() && !value.is_list() => {
            format!("operator {op:?} on `{field}` requires an array value")
        }
        _ if op.is_text_match() && !is_array && operand != Operand::Text => {
            format!("operator {op:?} requires a text field; `{field}` is not text")
        }
        Some(value) if op.is_text_match() && value.as_str().is_none() => {
            format!("operator {op:?} on `{field}` requires a text value")
        }
        Some(value) if value.is_list() && !op.takes_list() && !is_array => {
            format!("operator {op:?} on `{field}` does not accept an array")
        }
        _ if op.is_ordering() && operand == Operand::Boolean => {
            format!("operator {op:?} cannot order `{field}`")
        }
        Some(value) if mismatch(value) => {
            format!("value {value} does not match the type of `{field}`")
        }
        None if !op.is_unary() && !matches!(op, Operator::Equals | Operator::NotEquals) => {
            format!("operator {op:?} on `{field}` requires a value")
        }
        _ => return None,
    };

    Some(message)
}
