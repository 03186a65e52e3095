//! Error types for NoteVault core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for NoteVault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for NoteVault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Wrong password, or ciphertext that failed authentication.
    ///
    /// Both causes report identically.
    #[error("Incorrect password")]
    AuthenticationFailure,

    /// Structurally invalid vault file (bad JSON, missing field, bad encoding)
    #[error("Vault file unreadable: {0}")]
    Corrupt(String),

    /// No vault exists at the given path
    #[error("Vault file not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// Refused to overwrite an existing vault
    #[error("Vault file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Unknown note id
    #[error("Note not found: {0}")]
    NotFound(Uuid),

    /// Note content requested while the session is locked
    #[error("Vault is locked")]
    Locked,

    /// Edit attempted on a note marked read-only
    #[error("Note is read-only: {0}")]
    ReadOnly(Uuid),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key derivation or cipher setup error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl VaultError {
    /// Whether this error means the password was rejected.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, VaultError::AuthenticationFailure)
    }

    /// Whether this error means the vault file itself could not be read.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, VaultError::Corrupt(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_and_corrupt_messages_differ() {
        let auth = VaultError::AuthenticationFailure.to_string();
        let corrupt = VaultError::Corrupt("missing field `notes`".to_string()).to_string();

        assert_eq!(auth, "Incorrect password");
        assert!(corrupt.starts_with("Vault file unreadable"));
        assert!(corrupt.contains("missing field"));
    }

    #[test]
    fn test_classification_helpers() {
        assert!(VaultError::AuthenticationFailure.is_authentication_failure());
        assert!(!VaultError::Locked.is_authentication_failure());
        assert!(VaultError::Corrupt("x".to_string()).is_corrupt());
        assert!(!VaultError::AuthenticationFailure.is_corrupt());
    }

    #[test]
    fn test_io_error_converts() {
        let err: VaultError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, VaultError::Io { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
