use super::{
    column::{push_index, push_unique},
    field_column_id, BuildSchema,
};
use crate::{
    schema::{
        app,
        db::{Column, ColumnId, Index, Table, TableId, Type, Unique},
    },
    Error, Result,
};

impl<'a> BuildSchema<'a> {
    pub(super) fn build_table(&mut self, app_table: &'a app::Table) -> Result<()> {
        let id = TableId::Declared(app_table.id);
        let name = self.table_name(&app_table.name);
        self.tables.push(Table::new(id, name));

        let pk_fields = app_table.primary_key_fields();

        if app_table.has_implicit_id() {
            self.table_mut(id).columns.push(Column {
                id: ColumnId { table: id, field: 0 },
                name: "id".to_string(),
                ty: Type::Integer(8),
                nullable: false,
                default: None,
                identity: true,
                primary_key: true,
                read_only: true,
            });
        }

        // Relationship columns are added once every table has its own
        // columns.
        for field in &app_table.fields {
            if !field.ty.is_relationship() {
                let primary_key = pk_fields.contains(&field.name.as_str());
                self.build_column(app_table, field, primary_key)?;
            }
        }

        Ok(())
    }

    /// Primary key, declared indexes, and declared unique constraints. Runs
    /// after relationship columns exist, since any of them may name one.
    pub(super) fn build_table_keys(&mut self, app_table: &'a app::Table) -> Result<()> {
        let id = TableId::Declared(app_table.id);

        let pk_columns = resolve_columns(app_table, app_table.primary_key_fields())?;
        let table = self.table_mut(id);
        table.primary_key.columns = pk_columns;

        for index in &app_table.indexes {
            let columns = resolve_columns(app_table, index.fields.iter().map(String::as_str))?;
            let name = index
                .name
                .clone()
                .unwrap_or_else(|| format!("idx_{}_{}", table.name, index.fields.join("_")));
            push_index(
                table,
                Index {
                    name,
                    columns,
                    unique: index.unique,
                },
            );
        }

        for unique in &app_table.unique_constraints {
            let columns = resolve_columns(app_table, unique.fields.iter().map(String::as_str))?;
            let name = unique
                .name
                .clone()
                .unwrap_or_else(|| format!("uq_{}_{}", table.name, unique.fields.join("_")));
            push_unique(table, Unique { name, columns });
        }

        Ok(())
    }
}

pub(super) fn resolve_columns<'b>(
    table: &app::Table,
    fields: impl IntoIterator<Item = &'b str>,
) -> Result<Vec<ColumnId>> {
    fields
        .into_iter()
        .map(|field| {
            field_column_id(table, field).ok_or_else(|| {
                Error::invalid_schema(format!("unknown field `{}.{field}`", table.name))
            })
        })
        .collect()
}
