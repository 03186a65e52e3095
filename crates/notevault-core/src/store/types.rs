//! Core data types for the note store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::crypto::SealedBox;

/// A plaintext note held by an unlocked session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier, stable across save/load
    pub id: Uuid,

    pub title: String,

    pub body: String,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update
    pub modified_at: DateTime<Utc>,

    /// Whether this note is sealed with the session key on save
    pub encrypted: bool,

    /// Updates are refused while set
    pub read_only: bool,
}

/// Read-only listing view of a note (no body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSummary<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub encrypted: bool,
    pub read_only: bool,
}

impl<'a> From<&'a Note> for NoteSummary<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: note.id,
            title: &note.title,
            created_at: note.created_at,
            modified_at: note.modified_at,
            encrypted: note.encrypted,
            read_only: note.read_only,
        }
    }
}

/// Partial update for a note. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

/// Stored form of a note title or body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealedText {
    /// Authenticated ciphertext (protected vaults)
    Cipher(SealedBox),
    /// Plain text (unprotected vaults only)
    Plain(String),
}

/// Persistence form of a note, as exchanged with the vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: Uuid,
    pub title: SealedText,
    pub body: SealedText,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub read_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_update_builder() {
        let update = NoteUpdate::new().title("Groceries").body("eggs");
        assert_eq!(update.title.as_deref(), Some("Groceries"));
        assert_eq!(update.body.as_deref(), Some("eggs"));
        assert!(!update.is_empty());
        assert!(NoteUpdate::new().is_empty());
    }

    #[test]
    fn test_summary_omits_body() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: "A".to_string(),
            body: "hello".to_string(),
            created_at: now,
            modified_at: now,
            encrypted: true,
            read_only: false,
        };

        let summary = NoteSummary::from(&note);
        assert_eq!(summary.id, note.id);
        assert_eq!(summary.title, "A");
        assert!(summary.encrypted);
    }
}
