use std::path::PathBuf;

use notevault_core::{create_vault, VaultOptions};

use crate::app::{prompt_new_password, resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, NotevaultConfig};
use crate::constants::env_vars;
use crate::errors::VaultResultExt;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => ctx.vault_path()?,
    };

    let mut options = VaultOptions::new().lock_policy(ctx.config()?.session.lock_policy);
    if let Some(seconds) = args.timeout {
        options = options.timeout_seconds(seconds);
    }
    if args.protect {
        let password = prompt_new_password(ctx.interactive(), env_vars::PASSWORD)?;
        options = options.password(password.as_str());
    }

    let mut session = create_vault(&target, options).in_vault(&target)?;
    let protected = session.password_protected();
    session.lock().in_vault(&target)?;

    // First vault on this machine: remember where it lives.
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        write_config(&config_path, &NotevaultConfig::new(&target))?;
        tracing::debug!(path = %config_path.display(), "wrote config");
    }

    if !ctx.quiet() {
        println!("Initialized new vault at {}", target.display());
        if protected {
            println!("Password protection: on");
        } else {
            println!("Password protection: off (run `notevault protect` to enable)");
        }
    }
    Ok(())
}
