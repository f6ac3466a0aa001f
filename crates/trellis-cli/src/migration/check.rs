use crate::{load_declaration, theme, Config};
use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use trellis::{schema::app, PolicySet, Schema};

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Declaration file (.json, .yaml or .toml)
    declaration: PathBuf,
}

impl CheckCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        theme::heading("Check Declaration");

        let (_, schema) = compile(config, &self.declaration)?;
        let policies = PolicySet::compile(&schema, &config.roles.hierarchy());

        for table in &schema.db.tables {
            println!(
                "  {} {} {}",
                theme::success(),
                style(&table.name).bold(),
                style(format!(
                    "({} columns, {} foreign keys, {} checks)",
                    table.columns.len(),
                    table.foreign_keys.len(),
                    table.checks.len()
                ))
                .dim()
            );

            for view in schema.db.views_for(table.id) {
                println!("      {} view {}", theme::arrow(), view.name);
            }

            if let Some(policy) = policies.table(&table.name) {
                for (op, rule) in [
                    ("read", &policy.read),
                    ("create", &policy.create),
                    ("update", &policy.update),
                    ("delete", &policy.delete),
                ] {
                    println!(
                        "      {} {op}: {}",
                        theme::arrow(),
                        style(serde_json::to_string(rule)?).dim()
                    );
                }
            }
        }

        println!();
        println!(
            "  {}",
            style(format!(
                "Declaration is valid: {} table(s), {} view(s)",
                schema.db.tables.len(),
                schema.db.views.len()
            ))
            .green()
            .bold()
        );
        println!();

        Ok(())
    }
}

/// Loads and compiles a declaration, listing every validation failure
/// before giving up.
pub(crate) fn compile(config: &Config, path: &Path) -> Result<(app::Schema, Schema)> {
    let declaration = load_declaration(path)?;

    match config.schema_builder().build(declaration.clone()) {
        Ok(schema) => Ok((declaration, schema)),
        Err(err) => {
            let failures = err.failures();

            if failures.is_empty() {
                println!("  {} {err}", theme::failure());
            }

            for failure in failures {
                println!("  {} {failure}", theme::failure());
            }

            println!();
            bail!(err)
        }
    }
}
