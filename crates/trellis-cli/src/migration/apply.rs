use super::{check, SnapshotFile};
use crate::{theme, utility::redact_url_password, Config};
use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use std::{fs, path::PathBuf};
use trellis::Applied;

#[derive(Parser, Debug)]
pub struct ApplyCommand {
    /// Declaration file (.json, .yaml or .toml)
    declaration: PathBuf,
}

impl ApplyCommand {
    pub(crate) async fn run(self, config: &Config) -> Result<()> {
        theme::heading("Apply Declaration");

        let Some(url) = &config.database_url else {
            bail!("no database configured; set `database_url` in Trellis.toml or pass --database-url");
        };

        let (declaration, _) = check::compile(config, &self.declaration)?;

        println!(
            "  {} Applying to {}",
            theme::arrow(),
            style(redact_url_password(url)).dim()
        );

        let db = config.db_builder().connect(url)?;

        match db.apply(declaration).await? {
            Applied::Unchanged => {
                println!(
                    "  {}",
                    style("Database already matches the declaration.")
                        .green()
                        .dim()
                );
            }
            Applied::Migrated {
                id,
                name,
                statements,
            } => {
                println!(
                    "  {} {}",
                    theme::success(),
                    style(format!(
                        "Applied migration {id} `{name}` ({statements} statements)"
                    ))
                    .dim()
                );
            }
        }

        // Keeps offline plans in step with the database
        fs::create_dir_all(&config.migration.path)?;
        let schema = db.schema();
        SnapshotFile::new(trellis::schema::db::Schema::clone(&schema.db))
            .save(config.migration.snapshot_file_path())?;

        println!();
        Ok(())
    }
}
