//! Text and table output formatting for notes.

use chrono::{DateTime, Utc};
use notevault_core::{Note, NoteSummary};

use crate::ui::{table, OutputMode};

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn flags(encrypted: bool, read_only: bool) -> String {
    let mut flags = Vec::new();
    if encrypted {
        flags.push("encrypted");
    }
    if read_only {
        flags.push("read-only");
    }
    flags.join(",")
}

/// Print the note listing in table or plain form.
pub fn print_note_list(summaries: &[NoteSummary<'_>], mode: OutputMode, quiet: bool) {
    if summaries.is_empty() {
        if !quiet {
            println!("No notes.");
        }
        return;
    }

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|summary| {
            vec![
                summary.id.to_string(),
                timestamp(&summary.modified_at),
                summary.title.to_string(),
                flags(summary.encrypted, summary.read_only),
            ]
        })
        .collect();
    println!(
        "{}",
        table(mode, &["ID", "Modified", "Title", "Flags"], &rows)
    );
}

/// Print a single note with its metadata header.
pub fn print_note(note: &Note, quiet: bool) {
    if !quiet {
        println!("ID: {}", note.id);
        println!("Created: {}", note.created_at.to_rfc3339());
        println!("Modified: {}", note.modified_at.to_rfc3339());
        let flags = flags(note.encrypted, note.read_only);
        if !flags.is_empty() {
            println!("Flags: {}", flags);
        }
        println!();
    }
    println!("{}", note.title);
    if !note.body.is_empty() {
        println!();
        println!("{}", note.body);
    }
}
