use crate::app::AppContext;
use crate::cli::ReadOnlyArgs;
use crate::errors::VaultResultExt;
use crate::helpers::parse_note_id;

pub fn handle_read_only(ctx: &AppContext, args: &ReadOnlyArgs) -> anyhow::Result<()> {
    let id = parse_note_id(&args.id)?;
    let read_only = args.state.enabled();

    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    session.set_read_only(&id, read_only).in_vault(&path)?;
    session.save().in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        let state = if read_only { "read-only" } else { "editable" };
        println!("Note {} is now {}", id, state);
    }
    Ok(())
}
