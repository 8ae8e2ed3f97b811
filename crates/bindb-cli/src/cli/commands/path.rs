//! `bindb-update path` – show where an update would install the table.

use anyhow::Result;
use bindb_core::config::UpdaterConfig;
use bindb_core::destination;

pub fn run_path(cfg: &UpdaterConfig) -> Result<()> {
    let dest = destination::default_destination(cfg)?;
    println!("{} ({})", dest.path().display(), dest.kind());
    Ok(())
}
