//! JSON vault file: structural validation on load, atomic replace on save.
//!
//! Layout:
//!
//! ```text
//! {
//!   "password_protected": true,
//!   "salt": "<base64>",
//!   "verifier": "<base64>",
//!   "kdf": { "memory_kib": 65536, "iterations": 3, "parallelism": 1 },
//!   "timeout_seconds": 60,
//!   "notes": [
//!     { "id": "...",
//!       "title_cipher": { "nonce": "<base64>", "ciphertext": "<base64>", "tag": "<base64>" },
//!       "body_cipher": { "nonce": "<base64>", "ciphertext": "<base64>", "tag": "<base64>" },
//!       "created_at": "2024-01-01T00:00:00Z", "modified_at": "...", "read_only": false }
//!   ]
//! }
//! ```
//!
//! Unprotected vaults omit `salt`, `verifier` and `kdf`, and each note
//! carries `title` and `body_plain` instead of the sealed fields.

use std::collections::HashSet;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Protection, Vault};
use crate::crypto::{KdfParams, Salt, SealedBox, Verifier};
use crate::error::{Result, VaultError};
use crate::store::{NoteRecord, SealedText};

#[derive(Debug, Serialize, Deserialize)]
struct VaultDocument {
    password_protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kdf: Option<KdfParams>,
    timeout_seconds: u64,
    notes: Vec<NoteDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NoteDocument {
    id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title_cipher: Option<CipherDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body_cipher: Option<CipherDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body_plain: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    #[serde(default)]
    read_only: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct CipherDocument {
    nonce: String,
    ciphertext: String,
    tag: String,
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.as_bytes())
        .map_err(|e| VaultError::Corrupt(format!("{} is not valid base64: {}", name, e)))
}

impl CipherDocument {
    fn from_sealed(sealed: &SealedBox) -> Self {
        Self {
            nonce: STANDARD.encode(sealed.nonce),
            ciphertext: STANDARD.encode(&sealed.ciphertext),
            tag: STANDARD.encode(sealed.tag),
        }
    }

    fn into_sealed(self) -> Result<SealedBox> {
        SealedBox::from_parts(
            &decode_field("nonce", &self.nonce)?,
            decode_field("ciphertext", &self.ciphertext)?,
            &decode_field("tag", &self.tag)?,
        )
    }
}

/// Split stored text into its `(*_cipher, plain)` document fields.
fn text_fields(text: &SealedText) -> (Option<CipherDocument>, Option<String>) {
    match text {
        SealedText::Cipher(sealed) => (Some(CipherDocument::from_sealed(sealed)), None),
        SealedText::Plain(plain) => (None, Some(plain.clone())),
    }
}

/// Rebuild stored text from document fields; exactly one must be present.
fn text_from_fields(
    id: &Uuid,
    name: &str,
    cipher: Option<CipherDocument>,
    plain: Option<String>,
) -> Result<SealedText> {
    match (cipher, plain) {
        (Some(cipher), None) => Ok(SealedText::Cipher(cipher.into_sealed()?)),
        (None, Some(plain)) => Ok(SealedText::Plain(plain)),
        (Some(_), Some(_)) => Err(VaultError::Corrupt(format!(
            "note {} has both a sealed and a plain {}",
            id, name
        ))),
        (None, None) => Err(VaultError::Corrupt(format!("note {} has no {}", id, name))),
    }
}

impl VaultDocument {
    fn from_vault(vault: &Vault) -> Self {
        let (salt, verifier, kdf) = match &vault.protection {
            Protection::Unprotected => (None, None, None),
            Protection::Password {
                salt,
                verifier,
                kdf,
            } => (
                Some(STANDARD.encode(salt.as_bytes())),
                Some(STANDARD.encode(verifier.to_bytes())),
                Some(*kdf),
            ),
        };

        Self {
            password_protected: vault.password_protected(),
            salt,
            verifier,
            kdf,
            timeout_seconds: vault.timeout_seconds,
            notes: vault.notes.iter().map(NoteDocument::from_record).collect(),
        }
    }

    fn into_vault(self) -> Result<Vault> {
        let protection = match (self.password_protected, self.salt, self.verifier) {
            (true, Some(salt), Some(verifier)) => {
                let kdf = self.kdf.unwrap_or_default();
                kdf.validate()
                    .map_err(|e| VaultError::Corrupt(format!("kdf: {}", e)))?;
                Protection::Password {
                    salt: Salt::from_slice(&decode_field("salt", &salt)?)?,
                    verifier: Verifier::from_bytes(&decode_field("verifier", &verifier)?)?,
                    kdf,
                }
            }
            (true, _, _) => {
                return Err(VaultError::Corrupt(
                    "protected vault is missing salt or verifier".to_string(),
                ))
            }
            (false, None, None) => Protection::Unprotected,
            (false, _, _) => {
                return Err(VaultError::Corrupt(
                    "unprotected vault carries salt or verifier".to_string(),
                ))
            }
        };

        let mut seen = HashSet::with_capacity(self.notes.len());
        let mut notes = Vec::with_capacity(self.notes.len());
        for document in self.notes {
            if !seen.insert(document.id) {
                return Err(VaultError::Corrupt(format!(
                    "duplicate note id {}",
                    document.id
                )));
            }
            let record = document.into_record()?;
            for (name, text) in [("title", &record.title), ("body", &record.body)] {
                match (&protection, text) {
                    (Protection::Password { .. }, SealedText::Plain(_)) => {
                        return Err(VaultError::Corrupt(format!(
                            "note {} has a plaintext {} in a protected vault",
                            record.id, name
                        )))
                    }
                    (Protection::Unprotected, SealedText::Cipher(_)) => {
                        return Err(VaultError::Corrupt(format!(
                            "note {} has an encrypted {} in an unprotected vault",
                            record.id, name
                        )))
                    }
                    _ => {}
                }
            }
            notes.push(record);
        }

        Ok(Vault {
            protection,
            timeout_seconds: self.timeout_seconds,
            notes,
        })
    }
}

impl NoteDocument {
    fn from_record(record: &NoteRecord) -> Self {
        let (title_cipher, title) = text_fields(&record.title);
        let (body_cipher, body_plain) = text_fields(&record.body);

        Self {
            id: record.id,
            title,
            title_cipher,
            body_cipher,
            body_plain,
            created_at: record.created_at,
            modified_at: record.modified_at,
            read_only: record.read_only,
        }
    }

    fn into_record(self) -> Result<NoteRecord> {
        let title = text_from_fields(&self.id, "title", self.title_cipher, self.title)?;
        let body = text_from_fields(&self.id, "body", self.body_cipher, self.body_plain)?;

        Ok(NoteRecord {
            id: self.id,
            title,
            body,
            created_at: self.created_at,
            modified_at: self.modified_at,
            read_only: self.read_only,
        })
    }
}

/// Parse and structurally validate vault JSON. No decryption happens here.
pub fn from_json(contents: &str) -> Result<Vault> {
    let document: VaultDocument = serde_json::from_str(contents)
        .map_err(|e| VaultError::Corrupt(format!("invalid vault JSON: {}", e)))?;
    document.into_vault()
}

/// Render a vault as pretty-printed JSON.
pub fn to_json(vault: &Vault) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&VaultDocument::from_vault(vault))?)
}

/// Load a vault from disk.
///
/// # Errors
///
/// - `VaultError::FileMissing` if nothing exists at `path`
/// - `VaultError::Corrupt` if the file is not a structurally valid vault
pub fn load(path: &Path) -> Result<Vault> {
    if !path.exists() {
        return Err(VaultError::FileMissing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    let contents = std::str::from_utf8(&bytes)
        .map_err(|_| VaultError::Corrupt("vault file is not valid UTF-8".to_string()))?;
    let vault = from_json(contents)?;
    tracing::debug!(
        path = %path.display(),
        notes = vault.notes.len(),
        protected = vault.password_protected(),
        "loaded vault"
    );
    Ok(vault)
}

/// Save a vault to disk, atomically replacing any existing file.
pub fn save(path: &Path, vault: &Vault) -> Result<()> {
    let data = to_json(vault)?;
    crate::fs::write_atomic(path, &data)
        .map_err(|e| VaultError::Storage(format!("Atomic write failed: {}", e)))?;
    tracing::debug!(
        path = %path.display(),
        notes = vault.notes.len(),
        bytes = data.len(),
        "saved vault"
    );
    Ok(())
}
