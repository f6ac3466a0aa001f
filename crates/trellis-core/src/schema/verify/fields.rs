use super::*;
use crate::stmt::Value;

impl Verify<'_> {
    pub(super) fn verify_field_options(&mut self, table: &Table, field: &Field) {
        let name = field.name.as_str();

        if let (Some(min), Some(max)) = field.ty.bounds() {
            if max < min {
                self.field_failure(table, name, format!("max ({max}) is less than min ({min})"));
            }
        }

        match &field.ty {
            FieldTy::SingleLineText { max_length } if *max_length == 0 => {
                self.field_failure(table, name, "maxLength must be at least 1");
            }
            FieldTy::Decimal(opts) | FieldTy::Currency(opts) => {
                if opts.precision == 0 || opts.precision > 1000 {
                    self.field_failure(table, name, "precision must be between 1 and 1000");
                }

                if opts.scale > opts.precision {
                    self.field_failure(
                        table,
                        name,
                        format!(
                            "scale ({}) exceeds precision ({})",
                            opts.scale, opts.precision
                        ),
                    );
                }
            }
            FieldTy::Rating { max } if *max == 0 => {
                self.field_failure(table, name, "rating max must be at least 1");
            }
            FieldTy::DeletedAt if field.required => {
                self.field_failure(table, name, "deleted-at fields cannot be required");
            }
            FieldTy::Autonumber | FieldTy::CreatedAt | FieldTy::UpdatedAt
                if field.default.is_some() =>
            {
                self.field_failure(
                    table,
                    name,
                    format!("{} fields cannot declare a default", field.ty.name()),
                );
            }
            _ => {}
        }

        if let Some(options) = field.ty.options() {
            if options.is_empty() {
                self.field_failure(table, name, "options must not be empty");
            }

            for option in duplicates(options.iter().map(String::as_str)) {
                self.field_failure(table, name, format!("duplicate option `{option}`"));
            }
        }

        if let Some(default) = &field.default {
            if !default_fits(&field.ty, default) {
                self.field_failure(
                    table,
                    name,
                    format!("default `{default}` is not a valid {} value", field.ty.name()),
                );
            }
        }
    }

    pub(super) fn verify_autonumber(&mut self, table: &Table) {
        let count = table.fields.iter().filter(|f| f.ty.is_autonumber()).count();

        if count > 1 {
            self.table_failure(
                table,
                format!("at most one autonumber field per table (found {count})"),
            );
        }
    }
}

fn default_fits(ty: &FieldTy, value: &Value) -> bool {
    if value.is_null() {
        return true;
    }

    match ty {
        FieldTy::Checkbox => matches!(value, Value::Bool(_)),
        FieldTy::Integer { .. } | FieldTy::Rating { .. } => matches!(value, Value::I64(_)),
        FieldTy::Decimal(_) | FieldTy::Currency(_) | FieldTy::Percentage { .. } => {
            value.as_f64().is_some()
        }
        FieldTy::SingleSelect { options } | FieldTy::Status { options } => value
            .as_str()
            .is_some_and(|v| options.iter().any(|o| o == v)),
        FieldTy::MultiSelect { options } => value.as_list().is_some_and(|items| {
            items
                .iter()
                .all(|item| item.as_str().is_some_and(|v| options.iter().any(|o| o == v)))
        }),
        FieldTy::SingleLineText { max_length } => value
            .as_str()
            .is_some_and(|v| v.chars().count() <= *max_length as usize),
        ty if ty.is_text() => value.as_str().is_some(),
        _ => true,
    }
}
