use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::VaultResultExt;
use crate::helpers::{read_note_input, NoteInput};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let input = read_note_input(args.title.clone(), args.body.clone())?;

    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    let id = match input {
        NoteInput::Parts { title, body } => session.create_note(title, body),
        NoteInput::Text(text) => session.create_note_from_text(&text),
    }
    .in_vault(&path)?;
    session.save().in_vault(&path)?;
    session.lock().in_vault(&path)?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Added note {}", id);
    }
    Ok(())
}
