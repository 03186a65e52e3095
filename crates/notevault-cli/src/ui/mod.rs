//! Terminal rendering for the CLI.

mod mode;

pub use mode::OutputMode;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

/// Render rows as a bordered table (pretty) or tab-separated lines (plain).
pub fn table(mode: OutputMode, headers: &[&str], rows: &[Vec<String>]) -> String {
    if mode == OutputMode::Pretty {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());
        for row in rows {
            table.add_row(row.clone());
        }
        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_table_is_tab_separated_without_header() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        assert_eq!(table(OutputMode::Plain, &["X", "Y"], &rows), "a\tb");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let rendered = table(OutputMode::Pretty, &["X", "Y"], &rows);
        assert!(rendered.contains('X'));
        assert!(rendered.contains('a'));
    }
}
