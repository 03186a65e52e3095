mod add;
mod delete;
mod edit;
mod list;
mod read_only;
mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use read_only::handle_read_only;
pub use show::handle_show;
