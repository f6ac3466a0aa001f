mod add_column;
pub use add_column::AddColumn;

mod add_constraint;
pub use add_constraint::{AddConstraint, Constraint};

mod alter_column;
pub use alter_column::{AlterColumn, AlterColumnChange};

mod column_def;
pub use column_def::ColumnDef;

mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod create_view;
pub use create_view::CreateView;

mod drop_column;
pub use drop_column::DropColumn;

mod drop_constraint;
pub use drop_constraint::DropConstraint;

mod drop_index;
pub use drop_index::DropIndex;

mod drop_table;
pub use drop_table::DropTable;

mod drop_view;
pub use drop_view::DropView;

mod name;
pub use name::Name;

mod rename_column;
pub use rename_column::RenameColumn;

mod rename_table;
pub use rename_table::RenameTable;

pub use trellis_core::stmt::*;

/// A DDL statement.
#[derive(Debug, Clone)]
pub enum Statement {
    AddColumn(AddColumn),
    AddConstraint(AddConstraint),
    AlterColumn(AlterColumn),
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    CreateView(CreateView),
    DropColumn(DropColumn),
    DropConstraint(DropConstraint),
    DropIndex(DropIndex),
    DropTable(DropTable),
    DropView(DropView),
    RenameColumn(RenameColumn),
    RenameTable(RenameTable),
}

impl Statement {
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            Statement::DropColumn(_)
                | Statement::DropConstraint(_)
                | Statement::DropIndex(_)
                | Statement::DropTable(_)
                | Statement::DropView(_)
        )
    }
}
