//! Command handlers, one per subcommand.

pub mod check;
pub mod init;
pub mod notes;
pub mod security;

pub use check::handle_check;
pub use init::handle_init;
pub use notes::{
    handle_add, handle_delete, handle_edit, handle_list, handle_read_only, handle_show,
};
pub use security::{handle_passwd, handle_protect, handle_timeout, handle_unprotect};
