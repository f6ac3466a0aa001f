mod cascade;
mod fields;
mod names;
mod permissions;
mod relations;
mod views;

use super::app::{self, Field, FieldTy, Table};
use crate::{Error, Failure, FailureKind, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a app::Schema,

    /// Every problem found so far. Validation keeps going after a failure so
    /// a declaration is reported in full.
    failures: Vec<Failure>,
}

impl app::Schema {
    /// Checks the declaration without compiling it. Structural problems are
    /// reported together as one `SchemaValidation` error; cascade cycles are
    /// only searched for once the structure is sound.
    pub fn verify(&self) -> Result<()> {
        Verify {
            schema: self,
            failures: vec![],
        }
        .verify()
    }
}

impl Verify<'_> {
    fn verify(mut self) -> Result<()> {
        let schema = self.schema;

        self.verify_table_names();

        for table in &schema.tables {
            self.verify_field_names(table);

            for field in &table.fields {
                self.verify_field_options(table, field);
                self.verify_relationship(table, field);
            }

            self.verify_autonumber(table);
            self.verify_keys(table);
            self.verify_foreign_keys(table);
            self.verify_views(table);
            self.verify_permissions(table);
        }

        if !self.failures.is_empty() {
            return Err(Error::schema_validation(self.failures));
        }

        self.verify_no_cascade_cycles()
    }

    fn table_failure(&mut self, table: &Table, message: impl Into<String>) {
        self.failures.push(Failure::table(&table.name, message));
    }

    fn field_failure(&mut self, table: &Table, field: &str, message: impl Into<String>) {
        self.failures.push(Failure::field(&table.name, field, message));
    }

    fn reference_failure(&mut self, table: &Table, field: &str, message: impl Into<String>) {
        self.failures.push(
            Failure::field(&table.name, field, message).with_kind(FailureKind::ForeignKeyReference),
        );
    }
}

/// Returns `true` if `name` is a column of `table`: a field stored on the
/// table itself, or the implicit `id`.
fn has_column(table: &Table, name: &str) -> bool {
    match table.field(name) {
        Some(field) => field.has_column(),
        None => name == "id" && table.has_implicit_id(),
    }
}

/// Items of `items` appearing more than once, each reported once.
fn duplicates<'a, T: Eq + std::hash::Hash + ?Sized>(
    items: impl IntoIterator<Item = &'a T>,
) -> Vec<&'a T> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    items
        .into_iter()
        .filter(|item| !seen.insert(*item) && reported.insert(*item))
        .collect()
}
