//! Output formatting helpers for the CLI.
//!
//! Notes are printed as JSON, a table, or plain lines.

mod json;
mod text;

pub use json::{note_json, summary_json};
pub use text::{print_note, print_note_list};
