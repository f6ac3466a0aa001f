use super::*;
use crate::schema::{
    app::{ReferentialAction, RelationType},
    name::is_valid_identifier,
};

const NOT_A_KEY: &str = "referenced column must be unique/primary key";

impl Verify<'_> {
    pub(super) fn verify_relationship(&mut self, table: &Table, field: &Field) {
        let Some(rel) = field.ty.as_relationship() else {
            return;
        };

        let name = field.name.as_str();
        let schema = self.schema;

        if rel.on_delete.is_set_null() || rel.on_update.is_set_null() {
            if field.required {
                self.field_failure(table, name, "set-null requires a non-required field");
            }

            if rel.relation_type == RelationType::ManyToMany {
                self.field_failure(
                    table,
                    name,
                    "many-to-many relationships cannot use set-null",
                );
            }
        }

        if let Some(junction) = &rel.junction_table {
            if rel.relation_type != RelationType::ManyToMany {
                self.field_failure(table, name, "junctionTable requires a many-to-many relationship");
            } else if !is_valid_identifier(junction) {
                self.field_failure(
                    table,
                    name,
                    format!("junction table name `{junction}` must match ^[a-z][a-z0-9_]*$"),
                );
            }
        }

        if rel.relation_type == RelationType::ManyToMany && table.primary_key_fields().len() != 1 {
            self.field_failure(
                table,
                name,
                "many-to-many relationships require a single-column primary key",
            );
        }

        let Some(related) = schema.table(&rel.related_table) else {
            self.reference_failure(
                table,
                name,
                format!("related table `{}` does not exist", rel.related_table),
            );
            return;
        };

        let target = match &rel.related_field {
            Some(target) => target.as_str(),
            None => match related.primary_key_fields().as_slice() {
                [target] => *target,
                _ => {
                    self.reference_failure(
                        table,
                        name,
                        format!(
                            "related table `{}` has a composite primary key; use a table-level foreign key",
                            related.name
                        ),
                    );
                    return;
                }
            },
        };

        if !has_column(related, target) {
            self.reference_failure(
                table,
                name,
                format!("related field `{}.{target}` does not exist", related.name),
            );
            return;
        }

        if !related.is_unique_key(&[target]) {
            self.reference_failure(table, name, NOT_A_KEY);
        }
    }

    /// Primary key, index, and unique constraint field lists.
    pub(super) fn verify_keys(&mut self, table: &Table) {
        if let Some(pk) = &table.primary_key {
            self.verify_field_list(table, "primary key", &pk.fields);

            for field in &pk.fields {
                if table.field(field).is_some_and(|f| f.ty == FieldTy::DeletedAt) {
                    self.field_failure(table, field, "deleted-at fields cannot be part of the primary key");
                }
            }
        }

        for index in &table.indexes {
            if let Some(name) = &index.name {
                if !is_valid_identifier(name) {
                    self.table_failure(table, format!("index name `{name}` must match ^[a-z][a-z0-9_]*$"));
                }
            }
            self.verify_field_list(table, "index", &index.fields);
        }

        for unique in &table.unique_constraints {
            self.verify_field_list(table, "unique constraint", &unique.fields);
        }
    }

    /// Composite foreign keys declared at the table level.
    pub(super) fn verify_foreign_keys(&mut self, table: &Table) {
        let schema = self.schema;

        for fk in &table.foreign_keys {
            let label = fk
                .name
                .clone()
                .unwrap_or_else(|| fk.fields.join(", "));

            self.verify_field_list(table, "foreign key", &fk.fields);

            let Some(related) = schema.table(&fk.related_table) else {
                self.reference_failure(
                    table,
                    &label,
                    format!("related table `{}` does not exist", fk.related_table),
                );
                continue;
            };

            if fk.fields.len() != fk.related_fields.len() {
                self.reference_failure(
                    table,
                    &label,
                    format!(
                        "foreign key has {} fields but references {}",
                        fk.fields.len(),
                        fk.related_fields.len()
                    ),
                );
                continue;
            }

            let missing: Vec<_> = fk
                .related_fields
                .iter()
                .filter(|field| !has_column(related, field))
                .collect();

            if !missing.is_empty() {
                for field in missing {
                    self.reference_failure(
                        table,
                        &label,
                        format!("related field `{}.{field}` does not exist", related.name),
                    );
                }
                continue;
            }

            let referenced: Vec<&str> = fk.related_fields.iter().map(String::as_str).collect();
            if !related.is_unique_key(&referenced) {
                self.reference_failure(table, &label, NOT_A_KEY);
            }

            let nulls = [fk.on_delete, fk.on_update].contains(&ReferentialAction::SetNull);
            if nulls && fk.fields.iter().any(|f| table.field(f).is_some_and(|f| f.required)) {
                self.reference_failure(table, &label, "set-null requires non-required fields");
            }
        }
    }

    fn verify_field_list(&mut self, table: &Table, kind: &str, fields: &[String]) {
        if fields.is_empty() {
            self.table_failure(table, format!("{kind} must list at least one field"));
            return;
        }

        for field in fields {
            if !has_column(table, field) {
                self.table_failure(table, format!("{kind} field `{field}` does not exist"));
            }
        }

        for field in duplicates(fields.iter().map(String::as_str)) {
            self.table_failure(table, format!("{kind} lists `{field}` more than once"));
        }
    }
}
