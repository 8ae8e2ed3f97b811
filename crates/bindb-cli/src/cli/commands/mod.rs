//! CLI command handlers, one per file.

mod config_path;
mod path;
mod update;

pub use config_path::run_config_path;
pub use path::run_path;
pub use update::{run_update, UpdateOverrides};
