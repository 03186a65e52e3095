use dialoguer::Confirm;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::{CliError, VaultResultExt};
use crate::helpers::parse_note_id;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_note_id(&args.id)?;
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();

    let title = session.note(&id).in_vault(&path)?.title.clone();

    if !args.force {
        if !ctx.interactive() {
            return Err(CliError::invalid_input_with_hint(
                "Refusing to delete without confirmation",
                "Hint: Pass --force to delete non-interactively.",
            )
            .into());
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete note '{}'?", title))
            .default(false)
            .interact()?;
        if !confirmed {
            if !ctx.quiet() {
                println!("Cancelled");
            }
            return session.lock().in_vault(&path);
        }
    }

    session.delete_note(&id).in_vault(&path)?;
    session.save().in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        println!("Deleted note '{}'", title);
    }
    Ok(())
}
