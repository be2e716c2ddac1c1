use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the ledger home, its subdirectories and an initial `config.json`
/// holding the default seasonal consumption norms.
///
/// # Arguments
/// - `home` - The directory that will be the root of the ledger home,
///   e.g. `$HOME/waybill`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub fn init(home: &Path) -> Result<Out<()>> {
    let config =
        Config::create(home).context("Unable to create the ledger home and config")?;
    Ok(format!(
        "Successfully created the ledger home at '{}'",
        config.root().display()
    )
    .into())
}
