//! Application context for the NoteVault CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use notevault_core::SessionGuard;

use crate::cli::Cli;
use crate::config::NotevaultConfig;

use super::password::open_session_with_retry;
use super::resolver::{load_config, resolve_vault_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<NotevaultConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal() && !self.cli.no_input
    }

    /// Get the config file contents, loading them on first use.
    pub fn config(&self) -> anyhow::Result<&NotevaultConfig> {
        self.config.get_or_try_init(load_config)
    }

    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli, self.config()?)
    }

    /// Open and unlock the vault, applying the configured lock policy.
    pub fn open_session(&self) -> anyhow::Result<SessionGuard> {
        let path = self.vault_path()?;
        let mut session = open_session_with_retry(&path, self.interactive())?;
        session.set_lock_policy(self.config()?.session.lock_policy);
        Ok(session)
    }
}
