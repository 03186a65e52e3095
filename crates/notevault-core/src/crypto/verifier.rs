//! Password verifier and the session key handle.

use super::cipher::{decrypt, encrypt, SealedBox};
use super::key::DerivedKey;
use crate::error::{Result, VaultError};

const VERIFIER_MARKER: &[u8] = b"notevault password verifier v1";
const VERIFIER_AAD: &[u8] = b"notevault:verifier";

/// A marker sealed under the vault key.
///
/// Opening it proves the candidate key is correct before any note is
/// decrypted, without the password itself being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier(SealedBox);

impl Verifier {
    pub fn create(key: &DerivedKey) -> Result<Self> {
        Ok(Self(encrypt(key, VERIFIER_MARKER, VERIFIER_AAD)?))
    }

    /// Check `key` against this verifier.
    ///
    /// # Errors
    ///
    /// `VaultError::AuthenticationFailure` if the key does not match.
    pub fn check(&self, key: &DerivedKey) -> Result<()> {
        let marker = decrypt(key, &self.0, VERIFIER_AAD)?;
        if marker.as_slice() != VERIFIER_MARKER {
            return Err(VaultError::AuthenticationFailure);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(SealedBox::from_bytes(bytes)?))
    }
}

/// Key held by an unlocked session.
///
/// `Implicit` is the unprotected path: no secret exists and note bodies are
/// stored as plain records.
#[derive(Debug, Clone)]
pub enum VaultKey {
    Derived(DerivedKey),
    Implicit,
}

impl VaultKey {
    pub fn is_protected(&self) -> bool {
        matches!(self, VaultKey::Derived(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_accepts_matching_key() {
        let key = DerivedKey::from_bytes([9u8; 32]);
        let verifier = Verifier::create(&key).unwrap();
        assert!(verifier.check(&key).is_ok());
    }

    #[test]
    fn test_verifier_rejects_other_key() {
        let verifier = Verifier::create(&DerivedKey::from_bytes([9u8; 32])).unwrap();
        let result = verifier.check(&DerivedKey::from_bytes([8u8; 32]));
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_verifier_bytes_round_trip() {
        let key = DerivedKey::from_bytes([5u8; 32]);
        let verifier = Verifier::create(&key).unwrap();

        let parsed = Verifier::from_bytes(&verifier.to_bytes()).unwrap();
        assert_eq!(parsed, verifier);
        assert!(parsed.check(&key).is_ok());
    }

    #[test]
    fn test_note_ciphertext_is_not_a_verifier() {
        let key = DerivedKey::from_bytes([5u8; 32]);
        let other = encrypt(&key, VERIFIER_MARKER, b"note-aad").unwrap();
        let verifier = Verifier::from_bytes(&other.to_bytes()).unwrap();
        assert!(verifier.check(&key).is_err());
    }

    #[test]
    fn test_vault_key_protection_flag() {
        assert!(VaultKey::Derived(DerivedKey::from_bytes([1u8; 32])).is_protected());
        assert!(!VaultKey::Implicit.is_protected());
    }
}
