use super::BuildSchema;
use crate::{
    schema::{
        app::{self, FieldTy, Relationship},
        db::{Check, Column, ColumnDefault, ColumnId, Index, Table, TableId, Type, Unique},
    },
    stmt::{Expr, Value},
    Error, Result,
};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";
const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Storage type of a non-relationship logical type.
pub(super) fn storage_ty(ty: &FieldTy) -> Option<Type> {
    Some(match ty {
        FieldTy::SingleLineText { max_length } => Type::VarChar(*max_length),
        FieldTy::LongText | FieldTy::RichText => Type::Text,
        FieldTy::Email | FieldTy::Url | FieldTy::PhoneNumber => Type::VarChar(255),
        FieldTy::Integer { .. } | FieldTy::Autonumber => Type::Integer(4),
        FieldTy::Decimal(opts) | FieldTy::Currency(opts) => {
            Type::Numeric(Some((opts.precision, opts.scale)))
        }
        FieldTy::Percentage { .. } => Type::Numeric(Some((5, 2))),
        FieldTy::Rating { .. } => Type::Integer(2),
        FieldTy::Checkbox => Type::Boolean,
        FieldTy::Date => Type::Date,
        FieldTy::Time => Type::Time,
        FieldTy::Datetime | FieldTy::CreatedAt | FieldTy::UpdatedAt | FieldTy::DeletedAt => {
            Type::TimestampTz
        }
        FieldTy::Uuid => Type::Uuid,
        FieldTy::SingleSelect { .. } | FieldTy::Status { .. } => Type::VarChar(255),
        FieldTy::MultiSelect { .. } => Type::TextArray,
        FieldTy::SingleAttachment | FieldTy::MultipleAttachments | FieldTy::Json => Type::Jsonb,
        FieldTy::Relationship(_) => return None,
    })
}

/// The field a relationship references: `relatedField`, else the related
/// table's single-column primary key.
pub(super) fn referenced_field<'b>(
    rel: &'b Relationship,
    related: &'b app::Table,
) -> Result<&'b str> {
    if let Some(field) = &rel.related_field {
        return Ok(field);
    }

    match related.primary_key_fields().as_slice() {
        [field] => Ok(field),
        _ => Err(Error::invalid_schema(format!(
            "table `{}` has a composite primary key; reference it with a table-level foreign key",
            related.name
        ))),
    }
}

impl<'a> BuildSchema<'a> {
    /// Storage type of a declared column. Relationship columns take the type
    /// of the column they reference.
    pub(super) fn column_type(&self, table: &'a app::Table, field: &str) -> Result<Type> {
        let mut table = table;
        let mut field = field.to_string();

        // Bounded by the number of tables; relationship chains cannot loop
        // back through every table without repeating one.
        for _ in 0..=self.app.tables.len() {
            let Some(declared) = table.field(&field) else {
                if field == "id" && table.has_implicit_id() {
                    return Ok(Type::Integer(8));
                }
                return Err(Error::invalid_schema(format!(
                    "unknown field `{}.{field}`",
                    table.name
                )));
            };

            match &declared.ty {
                FieldTy::Relationship(rel) => {
                    let related = self.related_table(&rel.related_table)?;
                    field = referenced_field(rel, related)?.to_string();
                    table = related;
                }
                ty => return Ok(storage_ty(ty).expect("non-relationship type")),
            }
        }

        Err(Error::invalid_schema(format!(
            "relationship `{}.{field}` does not resolve to a stored column",
            table.name
        )))
    }

    /// Adds the column, checks, unique constraint, and index of one field.
    pub(super) fn build_column(
        &mut self,
        app_table: &'a app::Table,
        field: &app::Field,
        primary_key: bool,
    ) -> Result<()> {
        let id = TableId::Declared(app_table.id);
        let ty = self.column_type(app_table, &field.name)?;
        let table = self.table_mut(id);

        let mut column = Column {
            id: ColumnId {
                table: id,
                field: field.id,
            },
            name: field.name.clone(),
            ty,
            nullable: !field.required && !primary_key,
            default: field.default.clone().map(ColumnDefault::Value),
            identity: false,
            primary_key,
            read_only: field.ty.is_read_only(),
        };

        let col = || Expr::column(&field.name);
        let mut unique = field.unique || field.ty.is_one_to_one();

        match &field.ty {
            FieldTy::Email => push_check(table, field, "format", Expr::regex(col(), EMAIL_PATTERN)),
            FieldTy::Url => push_check(table, field, "format", Expr::regex(col(), URL_PATTERN)),
            FieldTy::PhoneNumber => {
                push_check(table, field, "format", Expr::regex(col(), PHONE_PATTERN))
            }
            FieldTy::Integer { min, max } => {
                let bounds = (min.map(Value::I64), max.map(Value::I64));
                if let Some(expr) = range(col, bounds) {
                    push_check(table, field, "range", expr);
                }
            }
            FieldTy::Decimal(_) | FieldTy::Currency(_) | FieldTy::Percentage { .. } => {
                let (min, max) = field.ty.bounds();
                if let Some(expr) = range(col, (min.map(Value::F64), max.map(Value::F64))) {
                    push_check(table, field, "range", expr);
                }
            }
            FieldTy::Rating { max } => {
                let bounds = (Some(Value::I64(1)), Some(Value::I64((*max).into())));
                if let Some(expr) = range(col, bounds) {
                    push_check(table, field, "range", expr);
                }
            }
            FieldTy::Checkbox => {
                column.nullable = false;
                column
                    .default
                    .get_or_insert(ColumnDefault::Value(Value::Bool(false)));
            }
            FieldTy::CreatedAt | FieldTy::UpdatedAt => {
                column.nullable = false;
                column.default = Some(ColumnDefault::Now);
            }
            FieldTy::DeletedAt => {
                // Null means "not deleted"; a default would delete every row
                column.nullable = true;
                column.default = None;
            }
            FieldTy::Autonumber => {
                column.nullable = false;
                column.identity = true;
                column.default = None;
                unique = true;
            }
            FieldTy::Uuid => {
                column.default.get_or_insert(ColumnDefault::RandomUuid);
            }
            FieldTy::SingleSelect { options } | FieldTy::Status { options } => {
                let options = options.iter().map(|o| Value::from(o.as_str())).collect();
                push_check(table, field, "options", Expr::in_list(col(), options));
            }
            FieldTy::MultiSelect { options } => {
                let options = options.iter().map(|o| Value::from(o.as_str())).collect();
                push_check(table, field, "options", Expr::array_subset(col(), options));
            }
            _ => {}
        }

        if unique && !primary_key {
            push_unique(
                table,
                Unique {
                    name: format!("uq_{}_{}", table.name, field.name),
                    columns: vec![column.id],
                },
            );
        }

        if field.indexed {
            push_index(
                table,
                Index {
                    name: format!("idx_{}_{}", table.name, field.name),
                    columns: vec![column.id],
                    unique: false,
                },
            );
        }

        table.columns.push(column);
        Ok(())
    }
}

/// `col >= min AND col <= max`, with either side optional.
fn range(col: impl Fn() -> Expr, (min, max): (Option<Value>, Option<Value>)) -> Option<Expr> {
    let mut operands = vec![];

    if let Some(min) = min {
        operands.push(Expr::ge(col(), min));
    }

    if let Some(max) = max {
        operands.push(Expr::le(col(), max));
    }

    (!operands.is_empty()).then(|| Expr::and_from_vec(operands))
}

fn push_check(table: &mut Table, field: &app::Field, kind: &str, expr: Expr) {
    let name = format!("ck_{}_{}_{kind}", table.name, field.name);
    table.checks.push(Check { name, expr });
}

/// Adds a unique constraint unless an identical one is already present.
pub(super) fn push_unique(table: &mut Table, unique: Unique) {
    if !table.uniques.iter().any(|uq| uq.name == unique.name) {
        table.uniques.push(unique);
    }
}

pub(super) fn push_index(table: &mut Table, index: Index) {
    if !table.indices.iter().any(|idx| idx.name == index.name) {
        table.indices.push(index);
    }
}
