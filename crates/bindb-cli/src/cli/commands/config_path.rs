//! `bindb-update config-path` – show which config file is read.

use anyhow::Result;
use bindb_core::config;
use std::path::Path;

pub fn run_config_path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    let state = if path.exists() { "present" } else { "absent, using defaults" };
    println!("{} ({})", path.display(), state);
    Ok(())
}
