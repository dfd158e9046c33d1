mod cli;
mod tui;

pub(crate) use cli::{as_cli, default_export_path, parse_add_args, shellexpand};
pub(crate) use tui::as_tui;
