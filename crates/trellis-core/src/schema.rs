pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

mod name;
pub use name::{is_valid_identifier, slug, MAX_IDENTIFIER_LEN};

mod verify;

use db::{Table, TableId};
use std::sync::Arc;

/// A validated declaration together with the relational schema compiled
/// from it.
#[derive(Debug)]
pub struct Schema {
    /// Declared schema
    pub app: app::Schema,

    /// Database-level schema
    pub db: Arc<db::Schema>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the compiled table for a declared table.
    pub fn table_for(&self, table: &app::Table) -> &Table {
        self.db.table(TableId::Declared(table.id))
    }
}
