mod commands;
mod handlers;

pub use commands::{Cli, Commands, Format};
pub use handlers::{
    handle_add, handle_convert, handle_done, handle_get, handle_list, handle_remove,
};
