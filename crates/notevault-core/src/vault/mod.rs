//! The vault aggregate and its on-disk file.
//!
//! A [`Vault`] is the sole unit of persistence: security metadata plus the
//! sealed note records. [`file`] translates it to and from JSON; [`rekey`]
//! handles password setup, verification and changes.

pub mod file;
pub mod rekey;

pub use file::{load, save};
pub use rekey::{change_password, change_password_with_kdf, create_protection, unlock_key};

use crate::crypto::{KdfParams, Salt, Verifier};
use crate::store::NoteRecord;

/// Default inactivity timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Password protection state of a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protection {
    Unprotected,
    Password {
        salt: Salt,
        verifier: Verifier,
        kdf: KdfParams,
    },
}

/// Root aggregate persisted to one vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    pub protection: Protection,
    /// Inactivity timeout before auto-lock; 0 disables it
    pub timeout_seconds: u64,
    pub notes: Vec<NoteRecord>,
}

impl Vault {
    /// An empty, unprotected vault.
    pub fn new() -> Self {
        Self {
            protection: Protection::Unprotected,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            notes: Vec::new(),
        }
    }

    pub fn password_protected(&self) -> bool {
        matches!(self.protection, Protection::Password { .. })
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}
