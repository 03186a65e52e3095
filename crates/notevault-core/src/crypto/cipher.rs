//! Authenticated encryption with XChaCha20-Poly1305.
//!
//! Key size: 32 bytes. Nonce: 24 bytes, random per call. Tag: 16 bytes.
//! The nonce, ciphertext and tag are kept apart so the vault file can store
//! them as separate fields.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

pub const NONCE_LENGTH: usize = 24;
pub const TAG_LENGTH: usize = 16;

/// Output of one encryption call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    pub nonce: [u8; NONCE_LENGTH],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LENGTH],
}

impl SealedBox {
    /// Concatenated `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LENGTH + self.ciphertext.len() + TAG_LENGTH);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Split `nonce || ciphertext || tag` back into parts.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(VaultError::Corrupt(format!(
                "sealed value too short ({} bytes)",
                bytes.len()
            )));
        }
        let (nonce, rest) = bytes.split_at(NONCE_LENGTH);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LENGTH);
        Self::from_parts(nonce, ciphertext.to_vec(), tag)
    }

    /// Assemble from separately stored parts, checking lengths.
    pub fn from_parts(nonce: &[u8], ciphertext: Vec<u8>, tag: &[u8]) -> Result<Self> {
        let nonce: [u8; NONCE_LENGTH] = nonce.try_into().map_err(|_| {
            VaultError::Corrupt(format!(
                "nonce must be {} bytes (got {})",
                NONCE_LENGTH,
                nonce.len()
            ))
        })?;
        let tag: [u8; TAG_LENGTH] = tag.try_into().map_err(|_| {
            VaultError::Corrupt(format!(
                "tag must be {} bytes (got {})",
                TAG_LENGTH,
                tag.len()
            ))
        })?;
        Ok(Self {
            nonce,
            ciphertext,
            tag,
        })
    }
}

fn cipher_for(key: &DerivedKey) -> XChaCha20Poly1305 {
    XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// `associated_data` is authenticated but not encrypted; the same bytes must
/// be supplied to [`decrypt`].
pub fn encrypt(key: &DerivedKey, plaintext: &[u8], associated_data: &[u8]) -> Result<SealedBox> {
    let mut nonce = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| VaultError::Crypto(format!("RNG failed: {}", e)))?;

    let mut sealed = cipher_for(key)
        .encrypt(
            XNonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )
        .map_err(|e| VaultError::Crypto(format!("Encryption failed: {}", e)))?;

    let tag_start = sealed.len() - TAG_LENGTH;
    let tag: [u8; TAG_LENGTH] = sealed[tag_start..]
        .try_into()
        .map_err(|_| VaultError::Crypto("Cipher produced a short tag".to_string()))?;
    sealed.truncate(tag_start);

    Ok(SealedBox {
        nonce,
        ciphertext: sealed,
        tag,
    })
}

/// Decrypt and authenticate a [`SealedBox`].
///
/// # Errors
///
/// Returns `VaultError::AuthenticationFailure` if the key is wrong or any
/// byte of the nonce, ciphertext, tag or associated data was altered.
pub fn decrypt(
    key: &DerivedKey,
    sealed: &SealedBox,
    associated_data: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let mut combined = Vec::with_capacity(sealed.ciphertext.len() + TAG_LENGTH);
    combined.extend_from_slice(&sealed.ciphertext);
    combined.extend_from_slice(&sealed.tag);

    let plaintext = cipher_for(key)
        .decrypt(
            XNonce::from_slice(&sealed.nonce),
            Payload {
                msg: &combined,
                aad: associated_data,
            },
        )
        .map_err(|_| VaultError::AuthenticationFailure)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; 32])
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = b"Hello, World! This is secret data.";

        let sealed = encrypt(&key(1), plaintext, b"note").unwrap();
        let decrypted = decrypt(&key(1), &sealed, b"note").unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn test_ciphertext_differs_from_plaintext() {
        let plaintext = b"secret data";
        let sealed = encrypt(&key(1), plaintext, b"").unwrap();

        assert_ne!(sealed.ciphertext.as_slice(), plaintext);
        assert_eq!(sealed.ciphertext.len(), plaintext.len());
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let sealed = encrypt(&key(1), b"secret data", b"").unwrap();
        let result = decrypt(&key(2), &sealed, b"");
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_wrong_associated_data_fails() {
        let sealed = encrypt(&key(1), b"secret data", b"note-a").unwrap();
        let result = decrypt(&key(1), &sealed, b"note-b");
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_every_ciphertext_bit_flip_detected() {
        let sealed = encrypt(&key(7), b"flip me", b"").unwrap();

        for byte in 0..sealed.ciphertext.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered.ciphertext[byte] ^= 1 << bit;
                let result = decrypt(&key(7), &tampered, b"");
                assert!(
                    matches!(result, Err(VaultError::AuthenticationFailure)),
                    "flip at byte {} bit {} not detected",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_every_tag_bit_flip_detected() {
        let sealed = encrypt(&key(7), b"flip me", b"").unwrap();

        for byte in 0..TAG_LENGTH {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered.tag[byte] ^= 1 << bit;
                assert!(decrypt(&key(7), &tampered, b"").is_err());
            }
        }
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let first = encrypt(&key(1), b"same plaintext", b"").unwrap();
        let second = encrypt(&key(1), b"same plaintext", b"").unwrap();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = encrypt(&key(3), b"", b"").unwrap();
        assert!(sealed.ciphertext.is_empty());
        let decrypted = decrypt(&key(3), &sealed, b"").unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_bytes_split_back_into_parts() {
        let sealed = encrypt(&key(4), b"packed", b"").unwrap();
        let parsed = SealedBox::from_bytes(&sealed.to_bytes()).unwrap();
        assert_eq!(parsed, sealed);
    }

    #[test]
    fn test_short_bytes_are_corrupt() {
        let result = SealedBox::from_bytes(&[0u8; 10]);
        assert!(matches!(result, Err(VaultError::Corrupt(_))));
    }

    #[test]
    fn test_bad_nonce_length_is_corrupt() {
        let result = SealedBox::from_parts(&[0u8; 12], vec![1, 2, 3], &[0u8; TAG_LENGTH]);
        assert!(matches!(result, Err(VaultError::Corrupt(_))));
    }
}
