use super::{check, HistoryFile, HistoryFileMigration, SnapshotFile};
use crate::{theme, utility::redact_url_password, Config};
use anyhow::Result;
use clap::Parser;
use console::style;
use std::{fs, path::PathBuf};
use trellis::schema::db::{Migration, SchemaDiff};
use trellis_sql::MigrationPlan;

#[derive(Parser, Debug)]
pub struct PlanCommand {
    /// Declaration file (.json, .yaml or .toml)
    declaration: PathBuf,

    /// Save the migration as a script in the migrations directory and
    /// record it in the history file
    #[arg(long)]
    write: bool,
}

impl PlanCommand {
    pub(crate) async fn run(self, config: &Config) -> Result<()> {
        theme::heading("Plan Migration");

        let (declaration, schema) = check::compile(config, &self.declaration)?;

        // Against the database when one is configured, otherwise against the
        // last written snapshot
        let migration = match &config.database_url {
            Some(url) => {
                println!(
                    "  {} Planning against {}",
                    theme::arrow(),
                    style(redact_url_password(url)).dim()
                );
                let db = config.db_builder().connect(url)?;
                db.plan(declaration).await?
            }
            None => {
                let snapshot =
                    SnapshotFile::load_or_default(config.migration.snapshot_file_path())?;
                let diff = SchemaDiff::from(&snapshot.schema, &schema.db);
                MigrationPlan::from_diff(&diff).to_migration()
            }
        };

        if migration.is_empty() {
            println!(
                "  {}",
                style("The declaration matches the current schema. No migration needed.")
                    .magenta()
                    .dim()
            );
            println!();
            return Ok(());
        }

        println!();
        for statement in migration.statements() {
            println!("{statement}");
            println!();
        }

        if self.write {
            write_script(config, &migration, &schema.db)?;
        }

        Ok(())
    }
}

fn write_script(
    config: &Config,
    migration: &Migration,
    schema: &trellis::schema::db::Schema,
) -> Result<()> {
    fs::create_dir_all(&config.migration.path)?;

    let history_path = config.migration.history_file_path();
    let mut history = HistoryFile::load_or_default(&history_path)?;

    let id = history.next_migration_id();
    let name = format!("{id:04}_schema.sql");

    fs::write(
        config.migration.script_path(&name),
        migration.statements().join("\n\n") + "\n",
    )?;

    history.add_migration(HistoryFileMigration {
        id,
        name: name.clone(),
        checksum: migration.checksum(),
    });
    history.save(&history_path)?;

    SnapshotFile::new(schema.clone()).save(config.migration.snapshot_file_path())?;

    tracing::info!(id, %name, "wrote migration script");

    println!(
        "  {} {}",
        theme::success(),
        style(format!("Wrote {}", config.migration.script_path(&name).display())).dim()
    );
    println!();

    Ok(())
}
