mod config;
mod declaration;
mod migration;
mod theme;
mod utility;

pub use config::*;
pub use declaration::load_declaration;
pub use migration::*;

use anyhow::Result;
use clap::Parser;
use std::{borrow::Cow, path::PathBuf};

/// Trellis CLI library for building custom command-line tools
pub struct TrellisCli {
    config: Config,
}

impl TrellisCli {
    /// Create a new TrellisCli instance with the default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a new TrellisCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        let mut config = match &cli.config {
            Some(path) => Cow::Owned(Config::load(path)?),
            None => Cow::Borrowed(&self.config),
        };

        if let Some(url) = cli.database_url {
            config.to_mut().database_url = Some(url);
        }

        match cli.command {
            Command::Check(cmd) => cmd.run(&config),
            Command::Plan(cmd) => cmd.run(&config).await,
            Command::Apply(cmd) => cmd.run(&config).await,
        }
    }
}

impl Default for TrellisCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(about = "Trellis CLI - schema declaration, migration and permission tool")]
#[command(version)]
struct Cli {
    /// Configuration file, instead of `Trellis.toml` in the working directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database to plan against and apply to
    #[arg(long, global = true, env = "TRELLIS_DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Validate a declaration and show what it compiles to
    Check(CheckCommand),

    /// Show the migration a declaration requires
    Plan(PlanCommand),

    /// Migrate the database to a declaration
    Apply(ApplyCommand),
}
