//! Path resolution for config and vault files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_vault_path, read_config, NotevaultConfig};
use crate::constants::env_vars;

/// Resolve the config file path, checking NOTEVAULT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env_vars::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when there is none.
pub fn load_config() -> anyhow::Result<NotevaultConfig> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file; using defaults");
        return Ok(NotevaultConfig::default());
    }
    read_config(&config_path)
}

/// Resolve the vault file path: `--vault`/NOTEVAULT_PATH, then config, then
/// the XDG data default.
pub fn resolve_vault_path(cli: &Cli, config: &NotevaultConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.vault.as_deref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.vault.path.as_deref() {
        return Ok(PathBuf::from(path));
    }
    default_vault_path()
}
