//! NoteVault CLI - a password-protected personal notes vault
//!
//! This is the command-line interface for NoteVault. Every invocation opens
//! the vault, unlocks it if needed, runs one command and locks it again.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::constants::DEFAULT_LOG_FILTER;
use crate::errors::CliError;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);
    match &cli.command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Edit(args) => commands::handle_edit(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::ReadOnly(args) => commands::handle_read_only(&ctx, args),
        Commands::Protect => commands::handle_protect(&ctx),
        Commands::Unprotect => commands::handle_unprotect(&ctx),
        Commands::Passwd => commands::handle_passwd(&ctx),
        Commands::Timeout(args) => commands::handle_timeout(&ctx, args),
        Commands::Check => commands::handle_check(&ctx),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        if let Some(cli_error) = err.downcast_ref::<CliError>() {
            cli_error.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
