use crate::Result;

pub use trellis_core::driver::{Connection, Driver};

use url::Url;

/// Creates the driver for a connection URL, picked by its scheme.
pub fn from_url(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url).map_err(|err| trellis_core::err!("invalid connection URL: {err}"))?;

    match parsed.scheme() {
        "postgresql" | "postgres" => postgresql(url),
        scheme => trellis_core::bail!("unsupported database; scheme={scheme}"),
    }
}

#[cfg(feature = "postgresql")]
fn postgresql(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(trellis_driver_postgresql::PostgreSQL::new(url)?))
}

#[cfg(not(feature = "postgresql"))]
fn postgresql(_url: &str) -> Result<Box<dyn Driver>> {
    trellis_core::bail!("`postgresql` feature not enabled")
}
