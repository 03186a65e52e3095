//! JSON output formatting for notes.

use notevault_core::{Note, NoteSummary};

/// Convert a full note to JSON for output.
pub fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "body": note.body,
        "created_at": note.created_at,
        "modified_at": note.modified_at,
        "encrypted": note.encrypted,
        "read_only": note.read_only,
    })
}

/// Convert a listing row to JSON (no body).
pub fn summary_json(summary: &NoteSummary<'_>) -> serde_json::Value {
    serde_json::json!({
        "id": summary.id,
        "title": summary.title,
        "created_at": summary.created_at,
        "modified_at": summary.modified_at,
        "encrypted": summary.encrypted,
        "read_only": summary.read_only,
    })
}
