use super::BuildSchema;
use crate::{
    schema::{
        app::{self, Condition, FieldTy, Filter, Operator},
        db::{self, OrderBy, TableId, ViewQuery},
        name,
    },
    stmt::{Expr, MatchOp, Value},
    Error, Result,
};

impl<'a> BuildSchema<'a> {
    pub(super) fn build_views(&mut self, app_table: &'a app::Table) -> Result<()> {
        let id = TableId::Declared(app_table.id);
        let table = self.table(id);

        let mut views = vec![];

        for view in &app_table.views {
            let columns = match &view.fields {
                Some(fields) => fields.clone(),
                None => table.columns.iter().map(|c| c.name.clone()).collect(),
            };

            let filter = view
                .filters
                .as_ref()
                .map(|filter| compile_filter(app_table, filter))
                .transpose()?;

            let mut order_by = vec![];

            if let Some(group_by) = &view.group_by {
                order_by.push(OrderBy {
                    column: group_by.field.clone(),
                    direction: group_by.direction,
                });
            }

            for sort in &view.sorts {
                order_by.push(OrderBy {
                    column: sort.field.clone(),
                    direction: sort.direction,
                });
            }

            views.push(db::View {
                name: format!("{}_{}", table.name, name::slug(&view.id)),
                table: id,
                source: view.id.clone(),
                query: ViewQuery {
                    columns,
                    filter,
                    order_by,
                    group_by: view.group_by.as_ref().map(|g| g.field.clone()),
                },
                is_default: view.is_default,
            });
        }

        self.views.extend(views);
        Ok(())
    }
}

/// Compiles a filter tree into a predicate over the table's columns.
fn compile_filter(table: &app::Table, filter: &Filter) -> Result<Expr> {
    Ok(match filter {
        Filter::And { and } => Expr::and_from_vec(
            and.iter()
                .map(|f| compile_filter(table, f))
                .collect::<Result<_>>()?,
        ),
        Filter::Or { or } => Expr::or_from_vec(
            or.iter()
                .map(|f| compile_filter(table, f))
                .collect::<Result<_>>()?,
        ),
        Filter::Condition(condition) => compile_condition(table, condition)?,
    })
}

fn compile_condition(table: &app::Table, condition: &Condition) -> Result<Expr> {
    let ty = table.field(&condition.field).map(|field| &field.ty);
    let is_array = ty.is_some_and(FieldTy::is_array);
    let col = || Expr::column(&condition.field);
    let value = condition.value.clone().unwrap_or_default();

    let text = || {
        value.as_str().map(str::to_string).ok_or_else(|| {
            Error::invalid_schema(format!(
                "operator {:?} on `{}` requires a text value",
                condition.operator, condition.field
            ))
        })
    };

    let list = || match &value {
        Value::List(items) => Ok(items.clone()),
        _ => Err(Error::invalid_schema(format!(
            "operator {:?} on `{}` requires an array value",
            condition.operator, condition.field
        ))),
    };

    let is_empty = || {
        if is_array {
            Expr::or_from_vec(vec![Expr::is_null(col()), Expr::eq(col(), Value::List(vec![]))])
        } else if ty.is_some_and(FieldTy::is_text) {
            Expr::or_from_vec(vec![Expr::is_null(col()), Expr::eq(col(), "")])
        } else {
            Expr::is_null(col())
        }
    };

    let contains = || -> Result<Expr> {
        if is_array {
            let needles = match &value {
                Value::List(items) => items.clone(),
                value => vec![value.clone()],
            };
            Ok(Expr::array_contains(col(), needles))
        } else {
            Ok(Expr::matches(col(), MatchOp::Contains, text()?))
        }
    };

    Ok(match condition.operator {
        Operator::Equals if value.is_null() => Expr::is_null(col()),
        Operator::Equals => Expr::eq(col(), value.clone()),
        Operator::NotEquals if value.is_null() => Expr::is_not_null(col()),
        Operator::NotEquals => Expr::ne(col(), value.clone()),
        Operator::Contains => contains()?,
        Operator::NotContains => Expr::not(contains()?),
        Operator::StartsWith => Expr::matches(col(), MatchOp::StartsWith, text()?),
        Operator::EndsWith => Expr::matches(col(), MatchOp::EndsWith, text()?),
        Operator::GreaterThan => Expr::gt(col(), value.clone()),
        Operator::GreaterThanOrEqual => Expr::ge(col(), value.clone()),
        Operator::LessThan => Expr::lt(col(), value.clone()),
        Operator::LessThanOrEqual => Expr::le(col(), value.clone()),
        Operator::IsEmpty => is_empty(),
        Operator::IsNotEmpty => Expr::not(is_empty()),
        Operator::In => Expr::in_list(col(), list()?),
        Operator::NotIn => Expr::not(Expr::in_list(col(), list()?)),
    })
}
