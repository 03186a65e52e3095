//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (vault file, note).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Vault file exists but cannot be read as a vault.
    pub const UNREADABLE: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    pub const PASSWORD: &str = "NOTEVAULT_PASSWORD";
    /// Replacement password for `passwd`
    pub const NEW_PASSWORD: &str = "NOTEVAULT_NEW_PASSWORD";
    pub const CONFIG: &str = "NOTEVAULT_CONFIG";
}

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "notevault=warn";

/// Password prompts before giving up in interactive mode.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;
