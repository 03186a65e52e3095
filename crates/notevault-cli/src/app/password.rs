//! Password prompts and opening a vault with retry logic.

use std::path::Path;

use dialoguer::Password;
use notevault_core::{open_vault, SessionGuard, VaultError};
use zeroize::Zeroizing;

use crate::constants::{env_vars, MAX_PASSWORD_ATTEMPTS};
use crate::errors::{vault_error, CliError};

fn read_env(name: &str) -> Option<Zeroizing<String>> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

fn env_password() -> Option<Zeroizing<String>> {
    read_env(env_vars::PASSWORD)
}

/// Prompt for the current password, or read it from NOTEVAULT_PASSWORD.
pub fn prompt_password(interactive: bool, prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = env_password() {
        return Ok(password);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            env_vars::PASSWORD
        ))
        .into());
    }
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a new password with confirmation, or read it from `env_var`.
pub fn prompt_new_password(interactive: bool, env_var: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = read_env(env_var) {
        return Ok(password);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            env_var
        ))
        .into());
    }
    let password = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    if password.trim().is_empty() {
        return Err(CliError::invalid_input("Password cannot be empty").into());
    }
    Ok(password)
}

/// Open the vault at `path` and unlock it if it is protected.
///
/// A password from NOTEVAULT_PASSWORD gets one attempt; interactive prompts
/// get [`MAX_PASSWORD_ATTEMPTS`].
pub fn open_session_with_retry(path: &Path, interactive: bool) -> anyhow::Result<SessionGuard> {
    let mut session = open_vault(path).map_err(|err| vault_error(err, path))?;
    if !session.is_locked() {
        return Ok(session);
    }

    if let Some(password) = env_password() {
        session
            .unlock(&password)
            .map_err(|err| vault_error(err, path))?;
        return Ok(session);
    }

    let max_attempts = if interactive { MAX_PASSWORD_ATTEMPTS } else { 1 };
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let password = prompt_password(interactive, "Password")?;
        match session.unlock(&password) {
            Ok(()) => return Ok(session),
            Err(VaultError::AuthenticationFailure) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if max_attempts == 1 {
                    return Err(CliError::auth_failed("Incorrect password.").into());
                }
                if remaining == 0 {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed password attempts.",
                        "Hint: If you forgot your password, the notes cannot be recovered.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect password. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(vault_error(err, path)),
        }
    }
}
