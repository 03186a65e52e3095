//! In-memory note collection for an unlocked session.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;
use zeroize::Zeroize;

use super::types::{Note, NoteRecord, NoteSummary, NoteUpdate, SealedText};
use crate::crypto::{decrypt, encrypt, VaultKey};
use crate::error::{Result, VaultError};

/// Plaintext working set of notes.
///
/// Titles and bodies are zeroized by [`NoteStore::purge`] and on drop.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    protected: bool,
}

impl NoteStore {
    /// Create an empty store. `protected` marks new notes as encrypted.
    pub fn new(protected: bool) -> Self {
        Self {
            notes: Vec::new(),
            protected,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub(crate) fn set_protected(&mut self, protected: bool) {
        self.protected = protected;
        for note in &mut self.notes {
            note.encrypted = protected;
        }
    }

    /// Add a note and return its id. The plaintext stays in the store.
    pub fn create(&mut self, title: impl Into<String>, body: impl Into<String>) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.notes.push(Note {
            id,
            title: title.into(),
            body: body.into(),
            created_at: now,
            modified_at: now,
            encrypted: self.protected,
            read_only: false,
        });
        id
    }

    /// Create a note from free text: the first line is the title, the rest
    /// (trimmed) is the body.
    pub fn create_from_text(&mut self, text: &str) -> Result<Uuid> {
        let (title, body) = split_title(text)?;
        Ok(self.create(title, body))
    }

    pub fn update(&mut self, id: &Uuid, update: NoteUpdate) -> Result<()> {
        let note = self.find_mut(id)?;
        if note.read_only {
            return Err(VaultError::ReadOnly(*id));
        }
        if let Some(title) = update.title {
            note.title.zeroize();
            note.title = title;
        }
        if let Some(body) = update.body {
            note.body.zeroize();
            note.body = body;
        }
        note.modified_at = Utc::now();
        Ok(())
    }

    pub fn set_read_only(&mut self, id: &Uuid, read_only: bool) -> Result<()> {
        let note = self.find_mut(id)?;
        note.read_only = read_only;
        Ok(())
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<()> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == *id)
            .ok_or(VaultError::NotFound(*id))?;
        let mut note = self.notes.remove(index);
        wipe(&mut note);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    /// Summaries in insertion order.
    pub fn list(&self) -> impl Iterator<Item = NoteSummary<'_>> + '_ {
        self.notes.iter().map(NoteSummary::from)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Seal every note for writing to disk.
    pub fn export_for_persistence(&self, key: &VaultKey) -> Result<Vec<NoteRecord>> {
        self.notes
            .iter()
            .map(|note| {
                Ok(NoteRecord {
                    id: note.id,
                    title: seal_text(key, &note.id, Field::Title, &note.title)?,
                    body: seal_text(key, &note.id, Field::Body, &note.body)?,
                    created_at: note.created_at,
                    modified_at: note.modified_at,
                    read_only: note.read_only,
                })
            })
            .collect()
    }

    /// Rebuild a store from persisted records.
    ///
    /// All-or-nothing: if any record fails to open, nothing is returned and
    /// whatever was already decrypted is wiped.
    pub fn import_from_persistence(records: &[NoteRecord], key: &VaultKey) -> Result<Self> {
        let mut store = NoteStore::new(key.is_protected());
        let mut seen = HashSet::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id) {
                return Err(VaultError::Corrupt(format!(
                    "duplicate note id {}",
                    record.id
                )));
            }
            let (title, body) = open_record(key, record).map_err(|err| {
                if err.is_authentication_failure() {
                    tracing::warn!(note_id = %record.id, "note failed authentication");
                }
                err
            })?;
            store.notes.push(Note {
                id: record.id,
                title,
                body,
                created_at: record.created_at,
                modified_at: record.modified_at,
                encrypted: key.is_protected(),
                read_only: record.read_only,
            });
        }

        Ok(store)
    }

    /// Zeroize and discard all plaintext.
    pub fn purge(&mut self) {
        for note in &mut self.notes {
            wipe(note);
        }
        self.notes.clear();
    }

    fn find_mut(&mut self, id: &Uuid) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or(VaultError::NotFound(*id))
    }
}

impl Drop for NoteStore {
    fn drop(&mut self) {
        self.purge();
    }
}

fn wipe(note: &mut Note) {
    note.title.zeroize();
    note.body.zeroize();
}

fn split_title(text: &str) -> Result<(String, String)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(VaultError::InvalidInput("Note text is empty".to_string()));
    }
    let (title, rest) = match text.split_once('\n') {
        Some((title, rest)) => (title, rest),
        None => (text, ""),
    };
    Ok((title.trim_end().to_string(), rest.trim().to_string()))
}

/// Which part of a note a sealed value holds. Bound into the associated
/// data so a title cannot be swapped for a body.
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Body,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
        }
    }
}

fn associated_data(id: &Uuid, field: Field) -> Vec<u8> {
    let mut data = id.as_bytes().to_vec();
    data.extend_from_slice(field.name().as_bytes());
    data
}

fn seal_text(key: &VaultKey, id: &Uuid, field: Field, text: &str) -> Result<SealedText> {
    match key {
        VaultKey::Derived(key) => Ok(SealedText::Cipher(encrypt(
            key,
            text.as_bytes(),
            &associated_data(id, field),
        )?)),
        VaultKey::Implicit => Ok(SealedText::Plain(text.to_string())),
    }
}

fn open_text(key: &VaultKey, id: &Uuid, field: Field, sealed: &SealedText) -> Result<String> {
    match (key, sealed) {
        (VaultKey::Derived(key), SealedText::Cipher(sealed)) => {
            let plaintext = decrypt(key, sealed, &associated_data(id, field))?;
            String::from_utf8(plaintext.to_vec()).map_err(|_| {
                VaultError::Corrupt(format!("note {} {} is not valid UTF-8", id, field.name()))
            })
        }
        (VaultKey::Implicit, SealedText::Plain(text)) => Ok(text.clone()),
        (VaultKey::Implicit, SealedText::Cipher(_)) => Err(VaultError::AuthenticationFailure),
        (VaultKey::Derived(_), SealedText::Plain(_)) => Err(VaultError::Corrupt(format!(
            "note {} has a plaintext {} in a protected vault",
            id,
            field.name()
        ))),
    }
}

/// Open both halves of a record. A title already opened is wiped if the
/// body fails.
fn open_record(key: &VaultKey, record: &NoteRecord) -> Result<(String, String)> {
    let mut title = open_text(key, &record.id, Field::Title, &record.title)?;
    match open_text(key, &record.id, Field::Body, &record.body) {
        Ok(body) => Ok((title, body)),
        Err(err) => {
            title.zeroize();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DerivedKey;

    fn protected_key(byte: u8) -> VaultKey {
        VaultKey::Derived(DerivedKey::from_bytes([byte; 32]))
    }

    #[test]
    fn test_create_assigns_unique_ids_and_timestamps() {
        let mut store = NoteStore::new(false);
        let a = store.create("A", "hello");
        let b = store.create("B", "world");

        assert_ne!(a, b);
        let note = store.get(&a).unwrap();
        assert_eq!(note.title, "A");
        assert_eq!(note.created_at, note.modified_at);
        assert!(!note.encrypted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_marks_encrypted_in_protected_store() {
        let mut store = NoteStore::new(true);
        let id = store.create("A", "hello");
        assert!(store.get(&id).unwrap().encrypted);
    }

    #[test]
    fn test_create_from_text_splits_title() {
        let mut store = NoteStore::new(false);
        let id = store
            .create_from_text("Shopping\n\n eggs\nmilk \n")
            .unwrap();

        let note = store.get(&id).unwrap();
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.body, "eggs\nmilk");

        let single = store.create_from_text("  just a title  ").unwrap();
        let single = store.get(&single).unwrap();
        assert_eq!(single.title, "just a title");
        assert_eq!(single.body, "");
    }

    #[test]
    fn test_create_from_blank_text_rejected() {
        let mut store = NoteStore::new(false);
        assert!(matches!(
            store.create_from_text(" \n\t"),
            Err(VaultError::InvalidInput(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_refreshes_modified_at() {
        let mut store = NoteStore::new(false);
        let id = store.create("A", "hello");
        let before = store.get(&id).unwrap().clone();
        std::thread::sleep(std::time::Duration::from_millis(5));

        store
            .update(&id, NoteUpdate::new().body("hello again"))
            .unwrap();

        let updated = store.get(&id).unwrap();
        assert_eq!(updated.title, "A");
        assert_eq!(updated.body, "hello again");
        assert!(updated.modified_at > before.modified_at);
        assert_eq!(updated.created_at, before.created_at);
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let mut store = NoteStore::new(false);
        let id = Uuid::new_v4();
        let result = store.update(&id, NoteUpdate::new().title("x"));
        assert!(matches!(result, Err(VaultError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn test_read_only_note_refuses_update() {
        let mut store = NoteStore::new(false);
        let id = store.create("A", "hello");
        store.set_read_only(&id, true).unwrap();

        let result = store.update(&id, NoteUpdate::new().body("changed"));
        assert!(matches!(result, Err(VaultError::ReadOnly(_))));
        assert_eq!(store.get(&id).unwrap().body, "hello");

        store.set_read_only(&id, false).unwrap();
        store
            .update(&id, NoteUpdate::new().body("changed"))
            .unwrap();
        assert_eq!(store.get(&id).unwrap().body, "changed");
    }

    #[test]
    fn test_delete() {
        let mut store = NoteStore::new(false);
        let id = store.create("A", "hello");

        store.delete(&id).unwrap();
        assert!(store.get(&id).is_none());
        assert!(matches!(store.delete(&id), Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = NoteStore::new(false);
        store.create("first", "");
        store.create("second", "");
        store.create("third", "");

        let titles: Vec<&str> = store.list().map(|summary| summary.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_protected_export_import_round_trip() {
        let key = protected_key(3);
        let mut store = NoteStore::new(true);
        let a = store.create("A", "hello");
        store.create("B", "world");
        store.set_read_only(&a, true).unwrap();
        let created_at = store.get(&a).unwrap().created_at;

        let records = store.export_for_persistence(&key).unwrap();
        assert!(records.iter().all(|record| {
            matches!(record.title, SealedText::Cipher(_))
                && matches!(record.body, SealedText::Cipher(_))
        }));

        let restored = NoteStore::import_from_persistence(&records, &key).unwrap();
        let note = restored.get(&a).unwrap();
        assert_eq!(note.title, "A");
        assert_eq!(note.body, "hello");
        assert!(note.read_only);
        assert!(note.encrypted);
        assert_eq!(note.created_at, created_at);
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_implicit_key_exports_plain_text() {
        let mut store = NoteStore::new(false);
        store.create("A", "hello");

        let records = store.export_for_persistence(&VaultKey::Implicit).unwrap();
        assert_eq!(records[0].title, SealedText::Plain("A".to_string()));
        assert_eq!(records[0].body, SealedText::Plain("hello".to_string()));

        let restored = NoteStore::import_from_persistence(&records, &VaultKey::Implicit).unwrap();
        assert!(!restored.is_protected());
        assert_eq!(restored.list().next().unwrap().title, "A");
    }

    #[test]
    fn test_import_wrong_key_is_all_or_nothing() {
        let mut store = NoteStore::new(true);
        store.create("A", "hello");
        store.create("B", "world");
        let records = store.export_for_persistence(&protected_key(1)).unwrap();

        let result = NoteStore::import_from_persistence(&records, &protected_key(2));
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_import_fails_if_any_record_tampered() {
        let key = protected_key(1);
        let mut store = NoteStore::new(true);
        store.create("A", "hello");
        store.create("B", "world");
        let mut records = store.export_for_persistence(&key).unwrap();

        if let SealedText::Cipher(sealed) = &mut records[1].body {
            sealed.ciphertext[0] ^= 0x01;
        }

        let result = NoteStore::import_from_persistence(&records, &key);
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_tampered_title_fails_authentication() {
        let key = protected_key(1);
        let mut store = NoteStore::new(true);
        store.create("A", "hello");
        let mut records = store.export_for_persistence(&key).unwrap();

        if let SealedText::Cipher(sealed) = &mut records[0].title {
            sealed.tag[0] ^= 0x80;
        }

        let result = NoteStore::import_from_persistence(&records, &key);
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_swapped_bodies_fail_authentication() {
        let key = protected_key(1);
        let mut store = NoteStore::new(true);
        store.create("A", "hello");
        store.create("B", "world");
        let mut records = store.export_for_persistence(&key).unwrap();

        let first = records[0].body.clone();
        records[0].body = records[1].body.clone();
        records[1].body = first;

        assert!(NoteStore::import_from_persistence(&records, &key).is_err());
    }

    #[test]
    fn test_title_and_body_cannot_be_swapped() {
        let key = protected_key(1);
        let mut store = NoteStore::new(true);
        store.create("A", "hello");
        let mut records = store.export_for_persistence(&key).unwrap();

        let record = &mut records[0];
        std::mem::swap(&mut record.title, &mut record.body);

        let result = NoteStore::import_from_persistence(&records, &key);
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_import_duplicate_ids_corrupt() {
        let mut store = NoteStore::new(false);
        store.create("A", "hello");
        let mut records = store.export_for_persistence(&VaultKey::Implicit).unwrap();
        records.push(records[0].clone());

        let result = NoteStore::import_from_persistence(&records, &VaultKey::Implicit);
        assert!(matches!(result, Err(VaultError::Corrupt(_))));
    }

    #[test]
    fn test_plain_record_rejected_under_password_key() {
        let mut store = NoteStore::new(false);
        store.create("A", "hello");
        let records = store.export_for_persistence(&VaultKey::Implicit).unwrap();

        let result = NoteStore::import_from_persistence(&records, &protected_key(1));
        assert!(matches!(result, Err(VaultError::Corrupt(_))));
    }

    #[test]
    fn test_purge_removes_all_content() {
        let mut store = NoteStore::new(true);
        let id = store.create("A", "hello");

        store.purge();

        assert!(store.is_empty());
        assert!(store.get(&id).is_none());
        assert_eq!(store.list().count(), 0);
    }

    #[test]
    fn test_set_protected_updates_flags() {
        let mut store = NoteStore::new(false);
        let id = store.create("A", "hello");

        store.set_protected(true);

        assert!(store.is_protected());
        assert!(store.get(&id).unwrap().encrypted);
    }
}
