use std::cmp::Reverse;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::errors::VaultResultExt;
use crate::output::{print_note_list, summary_json};
use crate::ui::OutputMode;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let mode = OutputMode::detect(args.json, args.format.as_deref())?;
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();

    {
        let mut summaries: Vec<_> = session.list_notes().in_vault(&path)?.collect();
        summaries.sort_by_key(|summary| Reverse(summary.modified_at));

        if mode == OutputMode::Json {
            let rows: Vec<_> = summaries.iter().map(summary_json).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_note_list(&summaries, mode, ctx.quiet());
        }
    }

    session.lock().in_vault(&path)
}
