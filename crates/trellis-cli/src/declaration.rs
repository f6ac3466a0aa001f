use anyhow::{bail, Context, Result};
use std::path::Path;
use trellis::schema::app;

/// Reads a declaration, picking the format from the file extension.
pub fn load_declaration(path: impl AsRef<Path>) -> Result<app::Schema> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;

    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    let declaration = match extension {
        "json" => serde_json::from_str(&contents).map_err(anyhow::Error::from),
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(anyhow::Error::from),
        "toml" => toml::from_str(&contents).map_err(anyhow::Error::from),
        _ => bail!(
            "unsupported declaration format `{}`; expected .json, .yaml or .toml",
            path.display()
        ),
    };

    declaration.with_context(|| format!("failed to parse `{}`", path.display()))
}
