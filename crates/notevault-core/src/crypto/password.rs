//! Password validation.

use crate::error::{Result, VaultError};

/// Validate a password chosen for vault protection.
///
/// A password must contain at least one non-whitespace character. No other
/// strength rules are enforced.
///
/// # Examples
///
/// ```
/// use notevault_core::crypto::validate_password;
///
/// assert!(validate_password("hunter2").is_ok());
/// assert!(validate_password("   ").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(VaultError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(())
}
