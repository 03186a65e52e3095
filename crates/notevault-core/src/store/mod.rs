//! Note storage for an unlocked session.
//!
//! `NoteStore` is the only component that exposes plaintext note content.
//! It converts to and from [`NoteRecord`]s, the sealed form the vault file
//! persists.

pub mod notes;
pub mod types;

pub use notes::NoteStore;
pub use types::{Note, NoteRecord, NoteSummary, NoteUpdate, SealedText};
