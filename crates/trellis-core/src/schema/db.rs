mod check;
pub use check::Check;

mod column;
pub use column::{Column, ColumnDefault, ColumnId, ColumnsDiff, ColumnsDiffItem};

mod diff;
pub use diff::{Named, NamedDiff, NamedDiffItem};

mod fk;
pub use fk::ForeignKey;

mod index;
pub use index::Index;

mod migration;
pub use migration::{AppliedMigration, Migration, BREAKPOINT};

mod pk;
pub use pk::PrimaryKey;

mod schema;
pub use schema::{Schema, SchemaDiff};

mod table;
pub use table::{Table, TableId, TablesDiff, TablesDiffItem};

mod ty;
pub use ty::Type;

mod unique;
pub use unique::Unique;

mod view;
pub use view::{OrderBy, View, ViewQuery, ViewsDiff};

pub use super::app::ReferentialAction;
