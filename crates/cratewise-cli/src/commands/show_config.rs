//! `cratewise config` — print, and optionally save, the effective configuration.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{save_config, CliConfig};

/// Run `cratewise config` — print the effective configuration as TOML and,
/// when `write_to` is given, save it there.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or written.
pub fn run_show_config(cfg: &CliConfig, write_to: Option<&Path>) -> Result<()> {
    print!("{}", toml::to_string(cfg)?);
    if let Some(path) = write_to {
        save_config(cfg, path).with_context(|| format!("failed to write {}", path.display()))?;
        println!("# saved to {}", path.display());
    }
    Ok(())
}
