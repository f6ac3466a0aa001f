use super::*;
use crate::schema::name::is_valid_identifier;

const NAME_PATTERN: &str = "^[a-z][a-z0-9_]*$";

impl Verify<'_> {
    pub(super) fn verify_table_names(&mut self) {
        let schema = self.schema;

        for table in &schema.tables {
            if !is_valid_identifier(&table.name) {
                self.table_failure(table, format!("table name must match {NAME_PATTERN}"));
            }
        }

        for name in duplicates(schema.tables.iter().map(|t| t.name.as_str())) {
            self.failures
                .push(Failure::table(name, "duplicate table name"));
        }

        for id in duplicates(schema.tables.iter().map(|t| &t.id)) {
            self.failures
                .push(Failure::schema(format!("duplicate table id {id}")));
        }
    }

    pub(super) fn verify_field_names(&mut self, table: &Table) {
        for field in &table.fields {
            if !is_valid_identifier(&field.name) {
                self.field_failure(
                    table,
                    &field.name,
                    format!("field name must match {NAME_PATTERN}"),
                );
            }

            if field.id == 0 {
                self.field_failure(table, &field.name, "field id 0 is reserved");
            }
        }

        for name in duplicates(table.fields.iter().map(|f| f.name.as_str())) {
            self.field_failure(table, name, "duplicate field name");
        }

        for id in duplicates(table.fields.iter().map(|f| &f.id)) {
            self.table_failure(table, format!("duplicate field id {id}"));
        }
    }
}
