//! # NoteVault Core
//!
//! Core library for NoteVault, a password-protected personal notes vault.
//!
//! Notes live in a single JSON file. When protection is enabled every note
//! body is sealed with XChaCha20-Poly1305 under a key derived from the user's
//! password with Argon2id; the password itself is never stored.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, authenticated encryption, password verifier
//! - **store**: in-memory notes of an unlocked session
//! - **vault**: the persisted aggregate and its JSON file
//! - **session**: lock/unlock state machine and inactivity auto-lock
//! - **fs**: atomic file replacement
//!
//! ## Example
//!
//! ```no_run
//! use notevault_core::{create_vault, open_vault, VaultOptions};
//!
//! # fn main() -> notevault_core::Result<()> {
//! let mut session = create_vault("notes.vault", VaultOptions::new().password("hunter2"))?;
//! session.create_note("Groceries", "eggs, milk")?;
//! session.lock()?;
//!
//! let mut session = open_vault("notes.vault")?;
//! session.unlock("hunter2")?;
//! assert_eq!(session.list_notes()?.count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod error;
pub mod fs;
pub mod session;
pub mod store;
pub mod vault;

pub use error::{Result, VaultError};
pub use session::{
    create_vault, open_vault, AutoLock, LockPolicy, SessionGuard, SessionState, SharedSession,
    VaultOptions,
};
pub use store::{Note, NoteStore, NoteSummary, NoteUpdate};
pub use vault::Vault;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
