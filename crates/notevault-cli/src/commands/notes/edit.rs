use notevault_core::NoteUpdate;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::{CliError, VaultResultExt};
use crate::helpers::{parse_note_id, read_stdin};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let id = parse_note_id(&args.id)?;

    let mut update = NoteUpdate::new();
    if let Some(title) = args.title.clone() {
        if title.trim().is_empty() {
            return Err(CliError::invalid_input("--title cannot be empty").into());
        }
        update = update.title(title);
    }
    let body = match args.body.clone() {
        Some(body) => Some(body),
        None if args.title.is_none() => read_stdin()?,
        None => None,
    };
    if let Some(body) = body {
        update = update.body(body);
    }
    if update.is_empty() {
        return Err(CliError::invalid_input_with_hint(
            "Nothing to change",
            "Hint: Use --title/--body or pipe the new body via stdin.",
        )
        .into());
    }

    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    session.update_note(&id, update).in_vault(&path)?;
    session.save().in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if !ctx.quiet() {
        println!("Edited note {}", id);
    }
    Ok(())
}
