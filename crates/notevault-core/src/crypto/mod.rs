//! Cryptographic operations for NoteVault.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited libraries:
//! - **Argon2id**: memory-hard key derivation function
//! - **XChaCha20-Poly1305**: authenticated encryption with random 24-byte nonces
//!
//! ## Security Model
//!
//! - Password-based keys derived with Argon2id and a per-vault salt
//! - A verifier sealed under the key detects a wrong password up front
//! - Every note body sealed with a fresh nonce, bound to its note id
//! - Key material zeroized from memory on drop
//! - No password or password hash stored
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault file
//! - Offline brute-force attacks on the password
//! - Tampering with stored ciphertext
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod cipher;
pub mod key;
pub mod password;
pub mod verifier;

pub use cipher::{decrypt, encrypt, SealedBox};
pub use key::{derive_key, DerivedKey, KdfParams, Salt};
pub use password::validate_password;
pub use verifier::{VaultKey, Verifier};
