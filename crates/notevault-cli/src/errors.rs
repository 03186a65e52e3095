//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes so scripts can tell a wrong
//! password from a damaged file.

use std::fmt;
use std::path::Path;

use notevault_core::VaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (vault file, note)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput { message: String, hint: Option<String> },

    /// Vault file is damaged or not a vault
    Unreadable { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::Unreadable { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } | CliError::InvalidInput { message, hint } => {
                match hint {
                    Some(h) => write!(f, "{}\n{}", message, h),
                    None => write!(f, "{}", message),
                }
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error without a hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Translate a core error for the vault at `path` into a user-facing one.
    ///
    /// Errors without a dedicated exit code come back as `Err` unchanged.
    pub fn from_vault_error(err: VaultError, path: &Path) -> Result<Self, VaultError> {
        let cli_error = match err {
            VaultError::AuthenticationFailure => CliError::auth_failed("Incorrect password."),
            VaultError::FileMissing(_) => CliError::not_found(
                format!("No vault found at {}", path.display()),
                missing_vault_hint(),
            ),
            VaultError::Corrupt(_) => CliError::Unreadable {
                message: format!("Vault file is unreadable: {}", path.display()),
                hint: "Hint: The file is damaged or not a vault. Your password was not the problem.\n      Restore the file from a backup.".to_string(),
            },
            VaultError::NotFound(id) => CliError::not_found(
                format!("Note not found: {}", id),
                "Hint: Run `notevault list` to find note IDs.",
            ),
            VaultError::ReadOnly(id) => CliError::invalid_input_with_hint(
                format!("Note {} is read-only", id),
                format!("Hint: Run `notevault read-only {} off` to allow edits.", id),
            ),
            VaultError::AlreadyExists(existing) => CliError::invalid_input(format!(
                "A file already exists at {}",
                existing.display()
            )),
            VaultError::InvalidInput(message) => CliError::invalid_input(message),
            other => return Err(other),
        };
        Ok(cli_error)
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::Unreadable { .. } => exit_codes::UNREADABLE,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

pub fn missing_vault_hint() -> String {
    "Run:\n  notevault init\n\nOr specify a vault path:\n  NOTEVAULT_PATH=/path/to/notes.vault notevault init"
        .to_string()
}

/// Convert a core error into an `anyhow::Error`, typed where possible.
pub fn vault_error(err: VaultError, path: &Path) -> anyhow::Error {
    match CliError::from_vault_error(err, path) {
        Ok(cli_error) => cli_error.into(),
        Err(other) => other.into(),
    }
}

/// Attach the vault path to core errors so they become typed CLI errors.
pub trait VaultResultExt<T> {
    fn in_vault(self, path: &Path) -> anyhow::Result<T>;
}

impl<T> VaultResultExt<T> for notevault_core::Result<T> {
    fn in_vault(self, path: &Path) -> anyhow::Result<T> {
        self.map_err(|err| vault_error(err, path))
    }
}
