//! Session access control: lock/unlock and inactivity timeout.
//!
//! A [`SessionGuard`] owns one open vault file. While unlocked it holds the
//! vault key and the plaintext [`NoteStore`]; both exist only inside the
//! unlocked state, so locking drops (and zeroizes) them together.
//!
//! ## State machine
//!
//! - `Locked --unlock(password)--> Unlocked` after the verifier accepts the
//!   password and every note opens.
//! - `Unlocked --activity()--> Unlocked` refreshes the inactivity clock.
//! - `Unlocked --lock() | timeout--> Locked`, flushing unsaved edits first
//!   when the [`LockPolicy`] says so.

pub mod autolock;

pub use autolock::{AutoLock, SharedSession, DEFAULT_CHECK_INTERVAL};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{KdfParams, VaultKey};
use crate::error::{Result, VaultError};
use crate::store::{Note, NoteStore, NoteSummary, NoteUpdate};
use crate::vault::rekey::rekey_store;
use crate::vault::{self, Protection, Vault, DEFAULT_TIMEOUT_SECONDS};

/// What happens to unsaved edits when the session locks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Write unsaved edits to disk before dropping the key
    #[default]
    SaveChanges,
    /// Drop unsaved edits
    DiscardChanges,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

enum Session {
    Locked,
    Unlocked {
        key: VaultKey,
        notes: NoteStore,
        last_activity: Instant,
        dirty: bool,
    },
}

/// Settings for a newly created vault.
#[derive(Debug)]
pub struct VaultOptions {
    pub password: Option<SecretString>,
    pub timeout_seconds: u64,
    pub kdf: KdfParams,
    pub lock_policy: LockPolicy,
}

impl VaultOptions {
    pub fn new() -> Self {
        Self {
            password: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            kdf: KdfParams::default(),
            lock_policy: LockPolicy::default(),
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn lock_policy(mut self, policy: LockPolicy) -> Self {
        self.lock_policy = policy;
        self
    }
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Open an existing vault file.
///
/// Protected vaults start locked; unprotected vaults start unlocked.
pub fn open_vault(path: impl AsRef<Path>) -> Result<SessionGuard> {
    SessionGuard::open(path.as_ref())
}

/// Create a new vault file and return its (unlocked) session.
pub fn create_vault(path: impl AsRef<Path>, options: VaultOptions) -> Result<SessionGuard> {
    SessionGuard::create(path.as_ref(), options)
}

/// Owner of one open vault and its lock state.
pub struct SessionGuard {
    path: PathBuf,
    vault: Vault,
    session: Session,
    lock_policy: LockPolicy,
    kdf: KdfParams,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("path", &self.path)
            .field("state", &self.state())
            .field("protected", &self.vault.password_protected())
            .field("timeout_seconds", &self.vault.timeout_seconds)
            .finish()
    }
}

impl SessionGuard {
    /// Open an existing vault file.
    ///
    /// # Errors
    ///
    /// `FileMissing` if there is no vault at `path`, `Corrupt` if the file is
    /// structurally invalid.
    pub fn open(path: &Path) -> Result<Self> {
        let vault = vault::load(path)?;
        let kdf = match &vault.protection {
            Protection::Password { kdf, .. } => *kdf,
            Protection::Unprotected => KdfParams::default(),
        };
        let mut guard = Self {
            path: path.to_path_buf(),
            vault,
            session: Session::Locked,
            lock_policy: LockPolicy::default(),
            kdf,
        };
        if !guard.vault.password_protected() {
            let notes = NoteStore::import_from_persistence(&guard.vault.notes, &VaultKey::Implicit)?;
            guard.enter_unlocked(VaultKey::Implicit, notes);
        }
        Ok(guard)
    }

    /// Create and persist a new, empty vault at `path`.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a file is already present at `path`.
    pub fn create(path: &Path, options: VaultOptions) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::AlreadyExists(path.to_path_buf()));
        }
        let notes = NoteStore::new(options.password.is_some());
        let (vault, key) = rekey_store(
            &notes,
            options.timeout_seconds,
            options.password.as_ref().map(|p| p.expose_secret()),
            options.kdf,
        )?;
        vault::save(path, &vault)?;
        tracing::info!(path = %path.display(), protected = vault.password_protected(), "created vault");

        let mut guard = Self {
            path: path.to_path_buf(),
            vault,
            session: Session::Locked,
            lock_policy: options.lock_policy,
            kdf: options.kdf,
        };
        guard.enter_unlocked(key, notes);
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted aggregate as of the last load or save.
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Locked => SessionState::Locked,
            Session::Unlocked { .. } => SessionState::Unlocked,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == SessionState::Locked
    }

    pub fn password_protected(&self) -> bool {
        self.vault.password_protected()
    }

    /// Whether the note store has edits not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        matches!(self.session, Session::Unlocked { dirty: true, .. })
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.vault.timeout_seconds {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        }
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }

    pub fn set_lock_policy(&mut self, policy: LockPolicy) {
        self.lock_policy = policy;
    }

    /// Argon2id parameters used when a new password is set.
    pub fn set_kdf_params(&mut self, kdf: KdfParams) {
        self.kdf = kdf;
    }

    /// Unlock the vault with `password`.
    ///
    /// Already-unlocked sessions only record activity.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailure` if the password is wrong or any note fails
    /// authentication; the session stays locked and nothing is retained.
    pub fn unlock(&mut self, password: &str) -> Result<()> {
        if !self.is_locked() {
            self.activity();
            return Ok(());
        }

        let key = vault::unlock_key(&self.vault, password).map_err(|err| {
            if err.is_authentication_failure() {
                tracing::warn!(path = %self.path.display(), "unlock rejected");
            }
            err
        })?;
        let notes = NoteStore::import_from_persistence(&self.vault.notes, &key)?;
        self.enter_unlocked(key, notes);
        tracing::info!(path = %self.path.display(), "vault unlocked");
        Ok(())
    }

    /// Lock the vault, applying the lock policy to unsaved edits.
    ///
    /// The key and all plaintext are released even if flushing fails; the
    /// flush error is returned afterwards.
    pub fn lock(&mut self) -> Result<()> {
        let flush = self.is_dirty() && self.lock_policy == LockPolicy::SaveChanges;
        let flushed = if flush { self.save() } else { Ok(()) };
        if let Err(err) = &flushed {
            tracing::warn!(error = %err, "failed to save edits before locking");
        }

        if let Session::Unlocked { dirty, .. } = std::mem::replace(&mut self.session, Session::Locked)
        {
            if dirty && !flush {
                tracing::info!("discarded unsaved edits on lock");
            }
            tracing::info!(path = %self.path.display(), "vault locked");
        }
        flushed
    }

    /// Record user activity, postponing the inactivity timeout.
    pub fn activity(&mut self) {
        if let Session::Unlocked { last_activity, .. } = &mut self.session {
            *last_activity = Instant::now();
        }
    }

    /// Lock if the inactivity timeout has elapsed. Returns whether it locked.
    pub fn check_timeout(&mut self) -> Result<bool> {
        self.check_timeout_at(Instant::now())
    }

    /// [`SessionGuard::check_timeout`] against an explicit clock reading.
    pub fn check_timeout_at(&mut self, now: Instant) -> Result<bool> {
        if !self.vault.password_protected() {
            return Ok(false);
        }
        let Some(timeout) = self.timeout() else {
            return Ok(false);
        };
        let expired = match &self.session {
            Session::Unlocked { last_activity, .. } => {
                now.saturating_duration_since(*last_activity) >= timeout
            }
            Session::Locked => false,
        };
        if !expired {
            return Ok(false);
        }

        tracing::info!(timeout_seconds = timeout.as_secs(), "inactivity timeout reached");
        self.lock()?;
        Ok(true)
    }

    /// Write the vault to disk.
    ///
    /// While unlocked the note store is sealed first; while locked the last
    /// persisted state is rewritten unchanged.
    pub fn save(&mut self) -> Result<()> {
        match &mut self.session {
            Session::Unlocked {
                key,
                notes,
                last_activity,
                dirty,
            } => {
                let next = Vault {
                    protection: self.vault.protection.clone(),
                    timeout_seconds: self.vault.timeout_seconds,
                    notes: notes.export_for_persistence(key)?,
                };
                vault::save(&self.path, &next)?;
                self.vault = next;
                *dirty = false;
                *last_activity = Instant::now();
            }
            Session::Locked => vault::save(&self.path, &self.vault)?,
        }
        Ok(())
    }

    /// Set the inactivity timeout (0 disables it) and persist it.
    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        self.require_unlocked()?;
        self.vault.timeout_seconds = seconds;
        self.save()
    }

    /// Enable, re-key or disable password protection and persist the result.
    ///
    /// Enabling (or enabling again with a new password) generates a new salt
    /// and re-encrypts every note. Disabling stores every note as plain text.
    pub fn set_password_protection(&mut self, enabled: bool, password: Option<&str>) -> Result<()> {
        let new_password = match (enabled, password) {
            (true, Some(password)) => Some(password),
            (true, None) => {
                return Err(VaultError::InvalidInput(
                    "A password is required to enable protection".to_string(),
                ))
            }
            (false, _) => None,
        };

        let Session::Unlocked {
            key,
            notes,
            last_activity,
            dirty,
        } = &mut self.session
        else {
            return Err(VaultError::Locked);
        };

        let (next, next_key) =
            rekey_store(notes, self.vault.timeout_seconds, new_password, self.kdf)?;
        vault::save(&self.path, &next)?;
        self.vault = next;
        *key = next_key;
        notes.set_protected(enabled);
        *dirty = false;
        *last_activity = Instant::now();
        tracing::info!(protected = enabled, "password protection updated");
        Ok(())
    }

    /// Replace the password after verifying the current one.
    pub fn change_password(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        self.require_unlocked()?;
        vault::unlock_key(&self.vault, old_password)?;
        self.set_password_protection(true, Some(new_password))
    }

    // --- Note operations ---

    /// Read-only access to the unlocked note store.
    pub fn notes(&self) -> Result<&NoteStore> {
        match &self.session {
            Session::Unlocked { notes, .. } => Ok(notes),
            Session::Locked => Err(VaultError::Locked),
        }
    }

    pub fn list_notes(&self) -> Result<impl Iterator<Item = NoteSummary<'_>> + '_> {
        Ok(self.notes()?.list())
    }

    pub fn note(&self, id: &Uuid) -> Result<&Note> {
        self.notes()?.get(id).ok_or(VaultError::NotFound(*id))
    }

    /// Add a note and return its id; read it back through [`SessionGuard::note`].
    pub fn create_note(&mut self, title: impl Into<String>, body: impl Into<String>) -> Result<Uuid> {
        Ok(self.edit()?.create(title, body))
    }

    pub fn create_note_from_text(&mut self, text: &str) -> Result<Uuid> {
        self.edit()?.create_from_text(text)
    }

    pub fn update_note(&mut self, id: &Uuid, update: NoteUpdate) -> Result<()> {
        self.edit()?.update(id, update)
    }

    pub fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        self.edit()?.delete(id)
    }

    pub fn set_read_only(&mut self, id: &Uuid, read_only: bool) -> Result<()> {
        self.edit()?.set_read_only(id, read_only)
    }

    fn enter_unlocked(&mut self, key: VaultKey, notes: NoteStore) {
        self.session = Session::Unlocked {
            key,
            notes,
            last_activity: Instant::now(),
            dirty: false,
        };
    }

    fn require_unlocked(&self) -> Result<()> {
        if self.is_locked() {
            return Err(VaultError::Locked);
        }
        Ok(())
    }

    /// Mutable store access for an edit: counts as activity and marks the
    /// session dirty.
    fn edit(&mut self) -> Result<&mut NoteStore> {
        match &mut self.session {
            Session::Unlocked {
                notes,
                last_activity,
                dirty,
                ..
            } => {
                *last_activity = Instant::now();
                *dirty = true;
                Ok(notes)
            }
            Session::Locked => Err(VaultError::Locked),
        }
    }
}
