use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::VaultResultExt;
use crate::helpers::parse_note_id;
use crate::output::{note_json, print_note};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_note_id(&args.id)?;
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();

    {
        let note = session.note(&id).in_vault(&path)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&note_json(note))?);
        } else {
            print_note(note, ctx.quiet());
        }
    }

    session.lock().in_vault(&path)
}
