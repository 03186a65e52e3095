use std::path::{Path, PathBuf};

use notevault_core::LockPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotevaultConfig {
    #[serde(default)]
    pub vault: VaultSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VaultSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default)]
    pub lock_policy: LockPolicy,
}

impl NotevaultConfig {
    pub fn new(vault_path: &Path) -> Self {
        Self {
            vault: VaultSection {
                path: Some(vault_path.to_string_lossy().to_string()),
            },
            session: SessionSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.vault"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotevaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotevaultConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notevault"));
        }
    }
    Ok(home_dir()?.join(".config").join("notevault"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notevault"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("notevault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
