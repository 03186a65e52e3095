//! Password setup, verification and changes.

use super::{Protection, Vault};
use crate::crypto::{derive_key, validate_password, KdfParams, Salt, VaultKey, Verifier};
use crate::error::{Result, VaultError};
use crate::store::NoteStore;

/// Build fresh protection metadata for `password`: new salt, derived key and
/// verifier.
pub fn create_protection(password: &str, kdf: KdfParams) -> Result<(Protection, VaultKey)> {
    validate_password(password)?;
    let salt = Salt::generate()?;
    let key = derive_key(password, &salt, &kdf)?;
    let verifier = Verifier::create(&key)?;
    Ok((
        Protection::Password {
            salt,
            verifier,
            kdf,
        },
        VaultKey::Derived(key),
    ))
}

/// Derive the session key for `vault` and check it against the verifier.
///
/// Unprotected vaults always yield [`VaultKey::Implicit`].
///
/// # Errors
///
/// `VaultError::AuthenticationFailure` if the password is wrong.
pub fn unlock_key(vault: &Vault, password: &str) -> Result<VaultKey> {
    match &vault.protection {
        Protection::Unprotected => Ok(VaultKey::Implicit),
        Protection::Password {
            salt,
            verifier,
            kdf,
        } => {
            if password.is_empty() {
                return Err(VaultError::AuthenticationFailure);
            }
            let key = derive_key(password, salt, kdf)?;
            verifier.check(&key)?;
            Ok(VaultKey::Derived(key))
        }
    }
}

/// Re-key a vault.
///
/// Verifies `old_password` (required when the vault is protected), opens
/// every note, then seals them again under a key derived from
/// `new_password` with a newly generated salt. With `new_password = None`
/// protection is removed and notes are stored as plain records.
///
/// The input vault is never modified; on any error it remains valid.
pub fn change_password(
    vault: &Vault,
    old_password: Option<&str>,
    new_password: Option<&str>,
) -> Result<Vault> {
    let kdf = match &vault.protection {
        Protection::Password { kdf, .. } => *kdf,
        Protection::Unprotected => KdfParams::default(),
    };
    change_password_with_kdf(vault, old_password, new_password, kdf)
}

/// [`change_password`] with explicit Argon2id parameters for the new key.
pub fn change_password_with_kdf(
    vault: &Vault,
    old_password: Option<&str>,
    new_password: Option<&str>,
    kdf: KdfParams,
) -> Result<Vault> {
    let old_key = match (&vault.protection, old_password) {
        (Protection::Unprotected, _) => VaultKey::Implicit,
        (Protection::Password { .. }, Some(password)) => unlock_key(vault, password)?,
        (Protection::Password { .. }, None) => {
            return Err(VaultError::InvalidInput(
                "Current password is required".to_string(),
            ))
        }
    };

    let store = NoteStore::import_from_persistence(&vault.notes, &old_key)?;
    let (rekeyed, _key) = rekey_store(&store, vault.timeout_seconds, new_password, kdf)?;
    Ok(rekeyed)
}

/// Seal an in-memory store into a new vault under `new_password`, returning
/// the vault and the key it was sealed with.
pub(crate) fn rekey_store(
    store: &NoteStore,
    timeout_seconds: u64,
    new_password: Option<&str>,
    kdf: KdfParams,
) -> Result<(Vault, VaultKey)> {
    let (protection, key) = match new_password {
        Some(password) => create_protection(password, kdf)?,
        None => (Protection::Unprotected, VaultKey::Implicit),
    };
    let notes = store.export_for_persistence(&key)?;
    tracing::info!(
        protected = key.is_protected(),
        notes = notes.len(),
        "re-keyed vault"
    );
    Ok((
        Vault {
            protection,
            timeout_seconds,
            notes,
        },
        key,
    ))
}
