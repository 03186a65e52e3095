//! Application-level utilities for the NoteVault CLI.
//!
//! This module provides:
//! - Path resolution for config and vault files
//! - Password prompts with retry logic
//! - The per-invocation [`AppContext`]

mod context;
mod password;
mod resolver;

pub use context::AppContext;
pub use password::{prompt_new_password, prompt_password};
pub use resolver::resolve_config_path;
