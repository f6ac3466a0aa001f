use trellis_core::schema::db::{
    ColumnsDiffItem, Migration, Schema, SchemaDiff, Table, TablesDiffItem,
};

use crate::{
    stmt::{AlterColumnChange, Statement},
    Serializer,
};

/// Order in which statements run. Everything that depends on an object is
/// removed before the object, and created after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    DropViews,
    DropForeignKeys,
    DropConstraints,
    DropIndexes,
    DropColumns,
    DropTables,
    RenameTables,
    RenameColumns,
    CreateTables,
    AddColumns,
    AlterColumns,

    /// Primary key and unique constraints. Foreign keys reference these.
    AddUniques,
    AddChecks,
    AddForeignKeys,
    CreateIndexes,
    CreateViews,
}

pub struct MigrationStatement<'a> {
    phase: Phase,
    statement: Statement,

    /// Schema the statement's ids resolve against: the previous schema for
    /// drops, the next one for everything else.
    schema: &'a Schema,
}

/// The statements taking a database from one schema to the next, in
/// execution order.
pub struct MigrationPlan<'a> {
    statements: Vec<MigrationStatement<'a>>,
}

struct Planner<'a> {
    previous: &'a Schema,
    next: &'a Schema,
    statements: Vec<MigrationStatement<'a>>,
}

impl<'a> MigrationStatement<'a> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn to_sql(&self) -> String {
        Serializer::postgresql(self.schema).serialize(&self.statement)
    }
}

impl<'a> MigrationPlan<'a> {
    pub fn from_diff(diff: &SchemaDiff<'a>) -> Self {
        let mut planner = Planner {
            previous: diff.previous(),
            next: diff.next(),
            statements: vec![],
        };

        for item in diff.tables().iter() {
            match item {
                TablesDiffItem::CreateTable(table) => planner.create_table(table),
                TablesDiffItem::DropTable(table) => planner.drop_table(table),
                TablesDiffItem::AlterTable {
                    from,
                    to,
                    columns,
                    primary_key,
                    indices,
                    foreign_keys,
                    checks,
                    uniques,
                } => {
                    for fk in foreign_keys.dropped() {
                        planner.before(
                            Phase::DropForeignKeys,
                            Statement::drop_constraint(from, &fk.name),
                        );
                    }

                    if let Some((previous, _)) = primary_key {
                        planner.before(
                            Phase::DropConstraints,
                            Statement::drop_constraint(from, &previous.name),
                        );
                    }

                    for unique in uniques.dropped() {
                        planner.before(
                            Phase::DropConstraints,
                            Statement::drop_constraint(from, &unique.name),
                        );
                    }

                    for check in checks.dropped() {
                        planner.before(
                            Phase::DropConstraints,
                            Statement::drop_constraint(from, &check.name),
                        );
                    }

                    for index in indices.dropped() {
                        planner.before(Phase::DropIndexes, Statement::drop_index(index));
                    }

                    if from.name != to.name {
                        planner.after(
                            Phase::RenameTables,
                            Statement::rename_table(from, to, primary_key.is_none()),
                        );
                    }

                    for item in columns.iter() {
                        match *item {
                            ColumnsDiffItem::AddColumn(column) => {
                                planner
                                    .after(Phase::AddColumns, Statement::add_column(to, column));
                            }
                            ColumnsDiffItem::DropColumn(column) => {
                                planner.before(
                                    Phase::DropColumns,
                                    Statement::drop_column(from, column),
                                );
                            }
                            ColumnsDiffItem::AlterColumn {
                                from: previous,
                                to: next,
                            } => {
                                if previous.name != next.name {
                                    planner.after(
                                        Phase::RenameColumns,
                                        Statement::rename_column(to, previous, next),
                                    );
                                }

                                for change in AlterColumnChange::from_diff(previous, next) {
                                    planner.after(
                                        Phase::AlterColumns,
                                        Statement::alter_column(to, next, change),
                                    );
                                }
                            }
                        }
                    }

                    if let Some((_, next)) = primary_key {
                        planner.after(Phase::AddUniques, Statement::add_constraint(to, *next));
                    }

                    for unique in uniques.created() {
                        planner.after(Phase::AddUniques, Statement::add_constraint(to, unique));
                    }

                    for check in checks.created() {
                        planner.after(Phase::AddChecks, Statement::add_constraint(to, check));
                    }

                    for fk in foreign_keys.created() {
                        planner.after(Phase::AddForeignKeys, Statement::add_constraint(to, fk));
                    }

                    for index in indices.created() {
                        planner.after(Phase::CreateIndexes, Statement::create_index(to, index));
                    }
                }
            }
        }

        for view in diff.views().dropped() {
            planner.before(Phase::DropViews, Statement::drop_view(view));
        }

        for view in diff.views().created() {
            planner.after(Phase::CreateViews, Statement::create_view(view));
        }

        // Stable, so statements keep their diff order within a phase
        let mut statements = planner.statements;
        statements.sort_by_key(|statement| statement.phase);

        for chunk in statements.chunk_by(|a, b| a.phase == b.phase) {
            tracing::debug!(
                phase = ?chunk[0].phase,
                statements = chunk.len(),
                "planned migration phase"
            );
        }

        MigrationPlan { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MigrationStatement<'a>> + '_ {
        self.statements.iter()
    }

    /// Each statement serialized against its schema.
    pub fn to_sql(&self) -> Vec<String> {
        self.statements.iter().map(MigrationStatement::to_sql).collect()
    }

    /// A migration script running every statement in order, separated by
    /// breakpoints.
    pub fn to_migration(&self) -> Migration {
        Migration::new_sql_with_breakpoints(&self.to_sql())
    }
}

impl<'a> Planner<'a> {
    /// Queues a statement that removes part of the previous schema.
    fn before(&mut self, phase: Phase, statement: Statement) {
        self.statements.push(MigrationStatement {
            phase,
            statement,
            schema: self.previous,
        });
    }

    /// Queues a statement that builds part of the next schema.
    fn after(&mut self, phase: Phase, statement: Statement) {
        self.statements.push(MigrationStatement {
            phase,
            statement,
            schema: self.next,
        });
    }

    fn create_table(&mut self, table: &Table) {
        self.after(Phase::CreateTables, Statement::create_table(table));

        for unique in &table.uniques {
            self.after(Phase::AddUniques, Statement::add_constraint(table, unique));
        }

        for check in &table.checks {
            self.after(Phase::AddChecks, Statement::add_constraint(table, check));
        }

        for fk in &table.foreign_keys {
            self.after(Phase::AddForeignKeys, Statement::add_constraint(table, fk));
        }

        for index in &table.indices {
            self.after(Phase::CreateIndexes, Statement::create_index(table, index));
        }
    }

    fn drop_table(&mut self, table: &Table) {
        // Foreign keys between dropped tables would otherwise dictate the
        // drop order
        for fk in &table.foreign_keys {
            self.before(
                Phase::DropForeignKeys,
                Statement::drop_constraint(table, &fk.name),
            );
        }

        self.before(Phase::DropTables, Statement::drop_table(table));
    }
}

impl<'a, 'b> IntoIterator for &'a MigrationPlan<'b> {
    type Item = &'a MigrationStatement<'b>;
    type IntoIter = std::slice::Iter<'a, MigrationStatement<'b>>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
