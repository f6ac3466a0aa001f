use trellis_core::schema::db::{Column, ColumnDefault, Type};

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub not_null: bool,
    pub default: Option<ColumnDefault>,

    /// `GENERATED BY DEFAULT AS IDENTITY`
    pub identity: bool,
}

impl ColumnDef {
    pub(crate) fn from_schema(column: &Column) -> ColumnDef {
        ColumnDef {
            name: column.name.clone(),
            ty: column.ty.clone(),
            not_null: !column.nullable,
            default: column.default.clone(),
            identity: column.identity,
        }
    }
}
