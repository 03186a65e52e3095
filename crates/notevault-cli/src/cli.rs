use clap::{Args, Parser, Subcommand, ValueEnum};

use notevault_core::VERSION;

/// NoteVault - a password-protected personal notes vault
#[derive(Parser)]
#[command(name = "notevault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(short, long, global = true, env = "NOTEVAULT_PATH")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Protect the new vault with a password
    #[arg(long)]
    pub protect: bool,

    /// Inactivity timeout in seconds (0 disables auto-lock)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title (without it, the first line of the text is the title)
    #[arg(long)]
    pub title: Option<String>,

    /// Note body (overrides stdin)
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body (overrides stdin)
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// On/off switch for the `read-only` command
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

/// Arguments for the `read-only` command
#[derive(Args)]
pub struct ReadOnlyArgs {
    /// Note ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(value_enum, value_name = "STATE")]
    pub state: Toggle,
}

/// Arguments for the `timeout` command
#[derive(Args)]
pub struct TimeoutArgs {
    /// Seconds of inactivity before the vault locks (0 disables auto-lock)
    #[arg(value_name = "SECONDS")]
    pub seconds: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init(InitArgs),

    /// Add a note
    Add(AddArgs),

    /// List notes
    List(ListArgs),

    /// Show a note by ID
    Show(ShowArgs),

    /// Edit a note's title or body
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Prevent or allow edits to a note
    ReadOnly(ReadOnlyArgs),

    /// Enable password protection
    Protect,

    /// Disable password protection (notes are stored as plain text)
    Unprotect,

    /// Change the vault password
    Passwd,

    /// Set the inactivity timeout
    Timeout(TimeoutArgs),

    /// Verify the vault opens and every note authenticates
    Check,
}
