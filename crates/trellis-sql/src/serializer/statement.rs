use super::{column_def::DefaultExpr, Comma, Formatter, Ident, Literal, ToSql};

use crate::stmt::{self, AlterColumnChange, Constraint, Statement};
use trellis_core::schema::db::{ColumnId, ReferentialAction};

/// Runs `body` only when `condition` holds. PostgreSQL has no `IF NOT
/// EXISTS` form for constraints, identities, or renames, so those
/// statements check the catalog first.
struct Guarded<C, B> {
    condition: C,
    body: B,
}

impl<C: ToSql, B: ToSql> ToSql for Guarded<C, B> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let condition = self.condition;
        let body = self.body;

        fmt!(f, "DO $trellis$\nBEGIN\n    IF " condition " THEN\n        " body ";\n    END IF;\nEND $trellis$");
    }
}

/// `EXISTS` over `information_schema.columns` for one column of the current
/// schema.
struct ColumnExists<'a> {
    table: &'a str,
    column: &'a str,

    /// Only match identity columns
    identity: bool,
}

impl ToSql for ColumnExists<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = Literal(self.table);
        let column = Literal(self.column);

        fmt!(f, "EXISTS (SELECT 1 FROM information_schema.columns WHERE table_schema = current_schema() AND table_name = " table " AND column_name = " column);

        if self.identity {
            fmt!(f, " AND is_identity = 'YES'");
        }

        fmt!(f, ")");
    }
}

struct Columns<'a>(&'a [ColumnId]);

impl ToSql for Columns<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let serializer = f.serializer;
        let names = Comma(self.0.iter().map(|column| serializer.column_name(*column)));

        fmt!(f, "(" names ")");
    }
}

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::AddColumn(stmt) => stmt.to_sql(f),
            Statement::AddConstraint(stmt) => stmt.to_sql(f),
            Statement::AlterColumn(stmt) => stmt.to_sql(f),
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::CreateView(stmt) => stmt.to_sql(f),
            Statement::DropColumn(stmt) => stmt.to_sql(f),
            Statement::DropConstraint(stmt) => stmt.to_sql(f),
            Statement::DropIndex(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::DropView(stmt) => stmt.to_sql(f),
            Statement::RenameColumn(stmt) => stmt.to_sql(f),
            Statement::RenameTable(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let name = Ident(self.name.as_str());

        fmt!(f, "CREATE TABLE " if_not_exists name " (");

        for column in &self.columns {
            fmt!(f, "\n    " column ",");
        }

        let pk_name = Ident(&self.primary_key.name);
        let pk_columns = Columns(&self.primary_key.columns);

        fmt!(f, "\n    CONSTRAINT " pk_name " PRIMARY KEY " pk_columns "\n)");
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = Ident(self.name.as_str());

        fmt!(f, "DROP TABLE " if_exists name);
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let table = Ident(self.table.as_str());
        let column = &self.column;

        fmt!(f, "ALTER TABLE " table " ADD COLUMN " if_not_exists column);
    }
}

impl ToSql for &stmt::DropColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let table = Ident(self.table.as_str());
        let name = Ident(self.name.as_str());

        fmt!(f, "ALTER TABLE " if_exists table " DROP COLUMN " if_exists name);
    }
}

impl ToSql for &stmt::AlterColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = Ident(self.table.as_str());
        let column = Ident(self.column.as_str());
        let ty = &self.ty;

        let alter = ("ALTER TABLE ", table, " ALTER COLUMN ", column, " ");

        match &self.change {
            AlterColumnChange::DropIdentity => fmt!(f, alter "DROP IDENTITY IF EXISTS"),
            AlterColumnChange::SetType(ty) => fmt!(f, alter "TYPE " ty " USING " column "::" ty),
            AlterColumnChange::DropDefault => fmt!(f, alter "DROP DEFAULT"),
            AlterColumnChange::SetDefault(default) => {
                fmt!(f, alter "SET DEFAULT " (DefaultExpr(default, ty)))
            }
            AlterColumnChange::SetNotNull => fmt!(f, alter "SET NOT NULL"),
            AlterColumnChange::DropNotNull => fmt!(f, alter "DROP NOT NULL"),
            AlterColumnChange::AddIdentity => {
                let identity = ColumnExists {
                    table: self.table.as_str(),
                    column: self.column.as_str(),
                    identity: true,
                };

                fmt!(f, (Guarded {
                    condition: ("NOT ", identity),
                    body: (alter, "ADD GENERATED BY DEFAULT AS IDENTITY"),
                }));
            }
        }
    }
}

impl ToSql for &stmt::RenameTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let from = Ident(self.from.as_str());
        let to = Ident(self.to.as_str());

        let primary_key = self.primary_key.as_ref().map(|(old, new)| {
            (
                ";\n        ALTER TABLE ",
                to,
                " RENAME CONSTRAINT ",
                Ident(old.as_str()),
                " TO ",
                Ident(new.as_str()),
            )
        });

        fmt!(f, (Guarded {
            condition: (
                "to_regclass(", from.as_literal(), ") IS NOT NULL AND to_regclass(", to.as_literal(), ") IS NULL",
            ),
            body: ("ALTER TABLE ", from, " RENAME TO ", to, primary_key),
        }));
    }
}

impl ToSql for &stmt::RenameColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = self.table.as_str();
        let from = ColumnExists {
            table,
            column: self.from.as_str(),
            identity: false,
        };
        let to = ColumnExists {
            table,
            column: self.to.as_str(),
            identity: false,
        };

        fmt!(f, (Guarded {
            condition: (from, " AND NOT ", to),
            body: (
                "ALTER TABLE ",
                Ident(table),
                " RENAME COLUMN ",
                Ident(self.from.as_str()),
                " TO ",
                Ident(self.to.as_str()),
            ),
        }));
    }
}

impl ToSql for &stmt::AddConstraint {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = f.serializer.table_name(self.table);
        let name = self.constraint.name();

        fmt!(f, (Guarded {
            condition: (
                "NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = ",
                Literal(name),
                " AND conrelid = to_regclass(",
                table.as_literal(),
                "))",
            ),
            body: ("ALTER TABLE ", table, " ADD CONSTRAINT ", Ident(name), " ", &self.constraint),
        }));
    }
}

impl ToSql for &Constraint {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Constraint::PrimaryKey(pk) => fmt!(f, "PRIMARY KEY " (Columns(&pk.columns))),
            Constraint::Unique(unique) => fmt!(f, "UNIQUE " (Columns(&unique.columns))),
            Constraint::Check(check) => fmt!(f, "CHECK (" (&check.expr) ")"),
            Constraint::ForeignKey(fk) => {
                let references = f.serializer.table_name(fk.references);
                let columns = Columns(&fk.columns);
                let referenced = Columns(&fk.referenced_columns);
                let on_delete = action(fk.on_delete);
                let on_update = action(fk.on_update);

                fmt!(f, "FOREIGN KEY " columns " REFERENCES " references " " referenced " ON DELETE " on_delete " ON UPDATE " on_update);
            }
        }
    }
}

fn action(action: ReferentialAction) -> &'static str {
    match action {
        ReferentialAction::Restrict => "RESTRICT",
        ReferentialAction::Cascade => "CASCADE",
        ReferentialAction::SetNull => "SET NULL",
    }
}

impl ToSql for &stmt::DropConstraint {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = Ident(self.table.as_str());
        let name = Ident(self.name.as_str());

        fmt!(f, "ALTER TABLE IF EXISTS " table " DROP CONSTRAINT IF EXISTS " name);
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let index_name = Ident(&self.index.name);
        let table_name = f.serializer.table_name(self.table);
        let columns = Columns(&self.index.columns);
        let unique = if self.index.unique { "UNIQUE " } else { "" };

        fmt!(f, "CREATE " unique "INDEX IF NOT EXISTS " index_name " ON " table_name " " columns);
    }
}

impl ToSql for &stmt::DropIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = Ident(self.name.as_str());

        fmt!(f, "DROP INDEX " if_exists name);
    }
}

impl ToSql for &stmt::CreateView {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let view = &self.view;
        let name = Ident(&view.name);
        let table = f.serializer.table_name(view.table);
        let columns = Comma(view.query.columns.iter().map(Ident));

        fmt!(f, "CREATE OR REPLACE VIEW " name " AS SELECT " columns " FROM " table);

        if let Some(filter) = &view.query.filter {
            fmt!(f, " WHERE " filter);
        }

        if !view.query.order_by.is_empty() {
            let order_by = Comma(view.query.order_by.iter().map(|order_by| {
                let direction = if order_by.direction.is_desc() {
                    " DESC"
                } else {
                    " ASC"
                };
                (Ident(&order_by.column), direction)
            }));

            fmt!(f, " ORDER BY " order_by);
        }
    }
}

impl ToSql for &stmt::DropView {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = Ident(self.name.as_str());

        fmt!(f, "DROP VIEW IF EXISTS " name);
    }
}
