use trellis_cli::{Config, TrellisCli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("trellis=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(Config::FILE_NAME)?;
    TrellisCli::with_config(config).parse_and_run().await
}
