mod admin;
mod callbacks;
mod commands;

pub use admin::{handle_admin_forward, is_admin_forward};
pub use callbacks::callback_handler;
pub use commands::command_handler;
