mod create;
mod info;
mod show_data;

pub use create::{CreateArgs, cmd_create_item, cmd_create_layout};
pub use info::cmd_info;
pub use show_data::cmd_show_data;
