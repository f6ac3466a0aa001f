use super::{
    column::{push_index, referenced_field},
    table::resolve_columns,
    BuildSchema,
};
use crate::{
    schema::{
        app::{self, ReferentialAction, RelationType, Relationship},
        db::{Column, ColumnId, ForeignKey, Index, Table, TableId},
    },
    Error, Result,
};

impl<'a> BuildSchema<'a> {
    /// Relationship columns, their foreign keys, junction tables, and
    /// table-level foreign keys.
    pub(super) fn build_relations(&mut self, app_table: &'a app::Table) -> Result<()> {
        let id = TableId::Declared(app_table.id);
        let pk_fields = app_table.primary_key_fields();

        for field in &app_table.fields {
            let Some(rel) = field.ty.as_relationship() else {
                continue;
            };

            if rel.relation_type == RelationType::ManyToMany {
                self.build_junction_table(app_table, field, rel)?;
                continue;
            }

            let primary_key = pk_fields.contains(&field.name.as_str());
            self.build_column(app_table, field, primary_key)?;

            let related = self.related_table(&rel.related_table)?;
            let referenced = resolve_columns(related, [referenced_field(rel, related)?])?;

            let table = self.table_mut(id);
            let fk = ForeignKey {
                name: format!("fk_{}_{}", table.name, field.name),
                columns: vec![ColumnId {
                    table: id,
                    field: field.id,
                }],
                references: TableId::Declared(related.id),
                referenced_columns: referenced,
                on_delete: rel.on_delete,
                on_update: rel.on_update,
            };
            table.foreign_keys.push(fk);
        }

        for declared in &app_table.foreign_keys {
            let related = self.related_table(&declared.related_table)?;
            let columns = resolve_columns(app_table, declared.fields.iter().map(String::as_str))?;
            let referenced_columns =
                resolve_columns(related, declared.related_fields.iter().map(String::as_str))?;

            let table = self.table_mut(id);
            let name = declared
                .name
                .clone()
                .unwrap_or_else(|| format!("fk_{}_{}", table.name, declared.fields.join("_")));

            table.foreign_keys.push(ForeignKey {
                name,
                columns,
                references: TableId::Declared(related.id),
                referenced_columns,
                on_delete: declared.on_delete,
                on_update: declared.on_update,
            });
        }

        self.build_table_keys(app_table)
    }

    /// A many-to-many relationship is stored in its own table holding one
    /// foreign key to each side. The pair is the primary key, so each link
    /// exists at most once, and deleting either side removes its links.
    fn build_junction_table(
        &mut self,
        app_table: &'a app::Table,
        field: &app::Field,
        rel: &Relationship,
    ) -> Result<()> {
        let related = self.related_table(&rel.related_table)?;
        let id = TableId::Junction {
            table: app_table.id,
            field: field.id,
        };

        let name = match &rel.junction_table {
            Some(name) => self.table_name(name),
            None => self.table_name(&format!("{}_{}", app_table.name, field.name)),
        };

        let pk_fields = app_table.primary_key_fields();
        let &[source_field] = pk_fields.as_slice() else {
            return Err(Error::invalid_schema(format!(
                "many-to-many field `{}.{}` requires a single-column primary key on `{}`",
                app_table.name, field.name, app_table.name
            )));
        };
        let target_field = referenced_field(rel, related)?;

        let source_name = format!("{}_{source_field}", app_table.name);
        let mut target_name = format!("{}_{target_field}", related.name);
        if target_name == source_name {
            target_name = format!("related_{target_name}");
        }

        let mut table = Table::new(id, name);
        let source = ColumnId { table: id, field: 1 };
        let target = ColumnId { table: id, field: 2 };

        for (column, column_name, ty) in [
            (source, &source_name, self.column_type(app_table, source_field)?),
            (target, &target_name, self.column_type(related, target_field)?),
        ] {
            table.columns.push(Column {
                id: column,
                name: column_name.clone(),
                ty,
                nullable: false,
                default: None,
                identity: false,
                primary_key: true,
                read_only: false,
            });
        }

        table.primary_key.columns = vec![source, target];

        let links = [
            (source, &source_name, app_table, source_field),
            (target, &target_name, related, target_field),
        ];

        for (column, column_name, references, referenced) in links {
            table.foreign_keys.push(ForeignKey {
                name: format!("fk_{}_{column_name}", table.name),
                columns: vec![column],
                references: TableId::Declared(references.id),
                referenced_columns: resolve_columns(references, [referenced])?,
                on_delete: ReferentialAction::Cascade,
                on_update: rel.on_update,
            });
        }

        // The primary key serves lookups by source; this one serves the
        // reverse direction.
        let index = Index {
            name: format!("idx_{}_{target_name}", table.name),
            columns: vec![target],
            unique: false,
        };
        push_index(&mut table, index);

        self.tables.push(table);
        Ok(())
    }
}
