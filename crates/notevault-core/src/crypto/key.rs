//! Key derivation using Argon2id.
//!
//! This module derives encryption keys from passwords using the Argon2id
//! algorithm, which is memory-hard and resistant to GPU-based attacks.

use argon2::Argon2;
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Default Argon2id parameters.
///
/// - Memory: 64 MB (64 * 1024 KB)
/// - Iterations: 3
/// - Parallelism: 1
const ARGON2_MEMORY_KB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;

/// Upper bounds accepted for parameters read back from a vault file.
const MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for XChaCha20-Poly1305).
pub const KEY_LENGTH: usize = 32;

/// Length of the per-vault salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Argon2id cost parameters, persisted alongside the salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfParams {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check that Argon2 accepts these parameters and that they stay within
    /// the bounds this crate will run.
    ///
    /// # Errors
    ///
    /// `VaultError::InvalidInput` naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib > MAX_MEMORY_KIB {
            return Err(VaultError::InvalidInput(format!(
                "KDF memory {} KiB exceeds the limit of {} KiB",
                self.memory_kib, MAX_MEMORY_KIB
            )));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(VaultError::InvalidInput(format!(
                "KDF iterations {} exceed the limit of {}",
                self.iterations, MAX_ITERATIONS
            )));
        }
        if self.parallelism > MAX_PARALLELISM {
            return Err(VaultError::InvalidInput(format!(
                "KDF parallelism {} exceeds the limit of {}",
                self.parallelism, MAX_PARALLELISM
            )));
        }
        self.params().map(|_| ())
    }

    fn params(&self) -> Result<argon2::Params> {
        argon2::Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LENGTH),
        )
        .map_err(|e| VaultError::InvalidInput(format!("Invalid KDF parameters: {}", e)))
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        self.validate()?;
        let params = self.params()?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(ARGON2_MEMORY_KB, ARGON2_ITERATIONS, ARGON2_PARALLELISM)
    }
}

/// Random salt, fixed at [`SALT_LENGTH`] bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Generate a fresh salt from the OS CSPRNG.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SALT_LENGTH];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| VaultError::Crypto(format!("Failed to generate salt: {}", e)))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a salt read from disk. A wrong length means the file is damaged.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SALT_LENGTH] = bytes.try_into().map_err(|_| {
            VaultError::Corrupt(format!(
                "salt must be {} bytes (got {})",
                SALT_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({} bytes)", SALT_LENGTH)
    }
}

/// A cryptographic key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to derive from
/// * `salt` - The vault's salt
/// * `params` - Argon2id cost parameters stored with the vault
///
/// # Security
///
/// - Same password + salt + params always produces the same key
/// - Memory-hard: with default params requires ~64MB RAM per attempt
///
/// # Examples
///
/// ```
/// use notevault_core::crypto::{derive_key, KdfParams, Salt};
///
/// let salt = Salt::from_bytes(*b"unique-salt-16by");
/// let key = derive_key("my-password", &salt, &KdfParams::new(1024, 1, 1)).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(VaultError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let argon2 = params.argon2()?;

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut key_bytes)
        .map_err(|e| VaultError::Crypto(format!("Key derivation failed: {}", e)))?;
    tracing::debug!(
        memory_kib = params.memory_kib,
        iterations = params.iterations,
        "derived vault key"
    );

    Ok(DerivedKey::from_bytes(key_bytes))
}
