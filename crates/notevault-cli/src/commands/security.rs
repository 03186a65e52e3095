//! Password protection and auto-lock settings.

use notevault_core::open_vault;

use crate::app::{prompt_new_password, prompt_password, AppContext};
use crate::cli::TimeoutArgs;
use crate::constants::env_vars;
use crate::errors::{CliError, VaultResultExt};

pub fn handle_protect(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    if session.password_protected() {
        return Err(CliError::invalid_input_with_hint(
            "Vault is already password protected",
            "Hint: Run `notevault passwd` to change the password.",
        )
        .into());
    }

    let password = prompt_new_password(ctx.interactive(), env_vars::PASSWORD)?;
    session
        .set_password_protection(true, Some(password.as_str()))
        .in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        println!("Password protection enabled");
    }
    Ok(())
}

pub fn handle_unprotect(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    if !session.password_protected() {
        if !ctx.quiet() {
            println!("Vault is not password protected");
        }
        return Ok(());
    }

    session.set_password_protection(false, None).in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        println!("Password protection disabled; notes are stored as plain text");
    }
    Ok(())
}

pub fn handle_passwd(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.vault_path()?;
    let mut session = open_vault(&path).in_vault(&path)?;
    if !session.password_protected() {
        return Err(CliError::invalid_input_with_hint(
            "Vault is not password protected",
            "Hint: Run `notevault protect` to set a password.",
        )
        .into());
    }
    session.set_lock_policy(ctx.config()?.session.lock_policy);

    let interactive = ctx.interactive();
    let current = prompt_password(interactive, "Current password")?;
    session.unlock(&current).in_vault(&path)?;
    let new_password = prompt_new_password(interactive, env_vars::NEW_PASSWORD)?;
    session
        .change_password(&current, &new_password)
        .in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        println!("Password changed");
    }
    Ok(())
}

pub fn handle_timeout(ctx: &AppContext, args: &TimeoutArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    session.set_timeout(args.seconds).in_vault(&path)?;
    let protected = session.password_protected();
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        if args.seconds == 0 {
            println!("Auto-lock disabled");
        } else {
            println!("Auto-lock after {} seconds of inactivity", args.seconds);
        }
        if !protected {
            println!("Note: auto-lock only applies once password protection is enabled.");
        }
    }
    Ok(())
}
