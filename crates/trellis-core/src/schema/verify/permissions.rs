use super::*;
use crate::schema::app::Rule;

impl Verify<'_> {
    pub(super) fn verify_permissions(&mut self, table: &Table) {
        let Some(permissions) = &table.permissions else {
            return;
        };

        for rule in permissions.rules() {
            self.verify_rule(table, rule);
        }

        for field in &permissions.fields {
            if !has_column(table, &field.field) {
                self.table_failure(
                    table,
                    format!("permission for unknown field `{}`", field.field),
                );
            }
        }

        for field in duplicates(permissions.fields.iter().map(|f| f.field.as_str())) {
            self.field_failure(table, field, "permissions declared more than once");
        }
    }

    fn verify_rule(&mut self, table: &Table, rule: &Rule) {
        match rule {
            Rule::Roles { roles } if roles.is_empty() => {
                self.table_failure(table, "roles rule must list at least one role");
            }
            Rule::Owner { field } | Rule::OrganizationScoped { field }
                if !has_column(table, field) =>
            {
                self.table_failure(
                    table,
                    format!("permission rule references unknown field `{field}`"),
                );
            }
            _ => {}
        }
    }
}
