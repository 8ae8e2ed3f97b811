//! Installing fetched bytes at the destination.
//!
//! Parent directories are created as needed. `Atomic` writes a `.part` file
//! next to the destination, syncs it and renames it over the old file.
//! `Direct` removes the old file and writes the new one in place.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// How an existing destination file is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Write to `<dest>.part`, then rename into place.
    #[default]
    Atomic,
    /// Remove the old file, then create and write the new one.
    Direct,
}

/// Path for the temp file: appends `.part` to the final path (e.g. `bin_data.csv` → `bin_data.csv.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Replace whatever is at `dest` with exactly `body`.
pub fn install(dest: &Path, body: &[u8], mode: ReplaceMode) -> Result<()> {
    ensure_parent_dir(dest)?;
    match mode {
        ReplaceMode::Atomic => install_atomic(dest, body),
        ReplaceMode::Direct => install_direct(dest, body),
    }
}

fn ensure_parent_dir(dest: &Path) -> Result<()> {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}

fn remove_existing(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed existing {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

fn write_new(path: &Path, body: &[u8], create_new: bool) -> Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(create_new)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(body)
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync {}", path.display()))?;
    Ok(())
}

fn install_direct(dest: &Path, body: &[u8]) -> Result<()> {
    remove_existing(dest)?;
    write_new(dest, body, true)
}

fn install_atomic(dest: &Path, body: &[u8]) -> Result<()> {
    let tmp = temp_path(dest);
    // A stale .part from an interrupted run is overwritten.
    let result = write_new(&tmp, body, false).and_then(|()| {
        fs::rename(&tmp, dest).with_context(|| {
            format!("failed to rename {} to {}", tmp.display(), dest.display())
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
