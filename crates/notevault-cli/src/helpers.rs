//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use uuid::Uuid;

use crate::errors::CliError;

/// Parse a note ID argument.
pub fn parse_note_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| {
        CliError::invalid_input_with_hint(
            format!("Invalid note ID: {}", e),
            "Hint: Run `notevault list` to find note IDs.",
        )
        .into()
    })
}

/// Read piped stdin, if any. Returns `None` when stdin is a terminal.
pub fn read_stdin() -> anyhow::Result<Option<String>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    let trimmed = buffer.trim_end();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

/// Note content for `add`: either an explicit title/body pair or free text
/// whose first line is the title.
pub enum NoteInput {
    Parts { title: String, body: String },
    Text(String),
}

/// Resolve `add` input from flags, falling back to stdin.
pub fn read_note_input(title: Option<String>, body: Option<String>) -> anyhow::Result<NoteInput> {
    match (title, body) {
        (Some(title), Some(body)) => Ok(NoteInput::Parts { title, body }),
        (Some(title), None) => {
            let body = read_stdin()?.unwrap_or_default();
            Ok(NoteInput::Parts { title, body })
        }
        (None, Some(text)) => Ok(NoteInput::Text(text)),
        (None, None) => read_stdin()?.map(NoteInput::Text).ok_or_else(|| {
            CliError::invalid_input_with_hint(
                "No note content provided",
                "Hint: Use --title/--body or pipe note text via stdin.",
            )
            .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_note_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_note_id(&format!(" {} ", id)).unwrap(), id);
        assert!(parse_note_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_explicit_title_and_body() {
        let input = read_note_input(Some("A".to_string()), Some("hello".to_string())).unwrap();
        assert!(matches!(input, NoteInput::Parts { title, body } if title == "A" && body == "hello"));
    }

    #[test]
    fn test_body_without_title_is_free_text() {
        let input = read_note_input(None, Some("A\nhello".to_string())).unwrap();
        assert!(matches!(input, NoteInput::Text(text) if text == "A\nhello"));
    }
}
