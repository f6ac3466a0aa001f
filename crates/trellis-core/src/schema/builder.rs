mod column;
mod relation;
mod table;
mod view;

use super::{app, db, name, Schema};
use crate::{Error, Result};
use db::{ColumnId, Table, TableId};

use std::{collections::HashSet, sync::Arc};

/// Compiles a declaration into a relational schema.
#[derive(Debug, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    /// The declaration being compiled
    app: &'a app::Schema,

    /// Tables as they are built
    tables: Vec<Table>,

    views: Vec<db::View>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Validates `app` and compiles it. Nothing is compiled when validation
    /// fails, so a rejected declaration never yields DDL.
    pub fn build(&self, app: app::Schema) -> Result<Schema> {
        app.verify()?;

        let mut builder = BuildSchema {
            builder: self,
            app: &app,
            tables: vec![],
            views: vec![],
        };

        // Columns that are not relationships first, so relationship columns
        // can take the type of the column they reference.
        for table in &app.tables {
            builder.build_table(table)?;
        }

        for table in &app.tables {
            builder.build_relations(table)?;
        }

        for table in &app.tables {
            builder.build_views(table)?;
        }

        let db = db::Schema {
            tables: builder.tables,
            views: builder.views,
        };

        verify_identifiers(&db)?;

        for table in &db.tables {
            tracing::debug!(
                table = %table.name,
                columns = table.columns.len(),
                indices = table.indices.len(),
                foreign_keys = table.foreign_keys.len(),
                checks = table.checks.len(),
                "compiled table"
            );
        }

        Ok(Schema {
            db: Arc::new(db),
            app,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BuildSchema<'a> {
    fn table_name(&self, name: &str) -> String {
        match &self.builder.table_name_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    fn table_mut(&mut self, id: TableId) -> &mut Table {
        self.tables
            .iter_mut()
            .find(|table| table.id == id)
            .expect("invalid table ID")
    }

    fn table(&self, id: TableId) -> &Table {
        self.tables
            .iter()
            .find(|table| table.id == id)
            .expect("invalid table ID")
    }

    fn related_table(&self, name: &str) -> Result<&'a app::Table> {
        self.app
            .table(name)
            .ok_or_else(|| Error::invalid_schema(format!("unknown table `{name}`")))
    }
}

/// Column id of a declared field, resolving the implicit `id` column.
fn field_column_id(table: &app::Table, field: &str) -> Option<ColumnId> {
    let id = TableId::Declared(table.id);

    if let Some(field) = table.field(field) {
        return Some(ColumnId {
            table: id,
            field: field.id,
        });
    }

    (field == "id" && table.has_implicit_id()).then_some(ColumnId { table: id, field: 0 })
}

/// Rejects generated identifiers PostgreSQL would truncate and relation
/// names that collide: tables, views, and indexes share one namespace.
fn verify_identifiers(schema: &db::Schema) -> Result<()> {
    let mut relations = HashSet::new();

    let mut check = |kind: &str, ident: &str, relation: bool| -> Result<()> {
        if ident.len() > name::MAX_IDENTIFIER_LEN {
            return Err(Error::invalid_schema(format!(
                "{kind} name `{ident}` exceeds {} characters",
                name::MAX_IDENTIFIER_LEN
            )));
        }

        if relation && !relations.insert(ident.to_string()) {
            return Err(Error::invalid_schema(format!(
                "{kind} name `{ident}` collides with another table, view, or index"
            )));
        }

        Ok(())
    };

    for table in &schema.tables {
        check("table", &table.name, true)?;
        check("constraint", &table.primary_key.name, false)?;

        for column in &table.columns {
            check("column", &column.name, false)?;
        }

        for index in &table.indices {
            check("index", &index.name, true)?;
        }

        let mut constraints = HashSet::new();
        let names = table
            .foreign_keys
            .iter()
            .map(|fk| &fk.name)
            .chain(table.checks.iter().map(|ck| &ck.name))
            .chain(table.uniques.iter().map(|uq| &uq.name));

        for name in names {
            check("constraint", name, false)?;

            if !constraints.insert(name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate constraint name `{name}` on table `{}`",
                    table.name
                )));
            }
        }
    }

    for view in &schema.views {
        check("view", &view.name, true)?;
    }

    Ok(())
}
