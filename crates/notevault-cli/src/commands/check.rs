use crate::app::AppContext;
use crate::errors::VaultResultExt;

/// Opening the vault already validates its structure, the password
/// verifier and every note's authentication tag.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let path = session.path().to_path_buf();
    let notes = session.notes().in_vault(&path)?.len();

    if !ctx.quiet() {
        println!("Vault check: OK");
        println!("- path: {}", path.display());
        println!("- notes: {}", notes);
        println!(
            "- password protection: {}",
            if session.password_protected() { "on" } else { "off" }
        );
        match session.timeout() {
            Some(timeout) => println!("- auto-lock after: {}s", timeout.as_secs()),
            None => println!("- auto-lock: disabled"),
        }
    }
    session.lock().in_vault(&path)
}
