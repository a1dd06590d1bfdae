//! CLI command handlers. Each command is in its own file.

mod check;
mod config_path;
mod generate;

pub use check::{run_check, CheckOptions};
pub use config_path::run_config_path;
pub use generate::{run_completions, run_manpage};
