use super::*;

use trellis_core::schema::db::Table;

/// Renames a table, and its primary key constraint along with it. Skipped
/// when the table was already renamed.
#[derive(Debug, Clone)]
pub struct RenameTable {
    pub from: Name,
    pub to: Name,

    /// Previous and next primary key constraint names. `None` when the
    /// primary key is rebuilt by the same migration.
    pub primary_key: Option<(Name, Name)>,
}

impl Statement {
    pub fn rename_table(from: &Table, to: &Table, rename_primary_key: bool) -> Self {
        let primary_key = (rename_primary_key && from.primary_key.name != to.primary_key.name)
            .then(|| {
                (
                    Name::from(&from.primary_key.name),
                    Name::from(&to.primary_key.name),
                )
            });

        RenameTable {
            from: Name::from(&from.name),
            to: Name::from(&to.name),
            primary_key,
        }
        .into()
    }
}

impl From<RenameTable> for Statement {
    fn from(value: RenameTable) -> Self {
        Self::RenameTable(value)
    }
}
