//! Destination path resolution.
//!
//! The system-wide location wins when it already exists on disk; otherwise the
//! table goes into a `data` directory next to the program's install directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::UpdaterConfig;

/// System-wide install location of the BIN table.
pub const DEFAULT_SYSTEM_PATH: &str = "/usr/share/bin_lookup/bin_data.csv";

/// Directory (sibling of the install dir) used when the system path is absent.
pub const DATA_DIR: &str = "data";

/// File name of the installed table.
pub const FILE_NAME: &str = "bin_data.csv";

/// Existence check used for resolution; swapped for a fake in tests.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl PathProbe for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Where the table will be written, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The system path existed before the run.
    System(PathBuf),
    /// The system path was missing; path relative to the install dir.
    Fallback(PathBuf),
    /// Given on the command line; no resolution performed.
    Explicit(PathBuf),
}

impl Destination {
    pub fn path(&self) -> &Path {
        match self {
            Destination::System(p) | Destination::Fallback(p) | Destination::Explicit(p) => p,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Destination::System(_) => "system",
            Destination::Fallback(_) => "fallback",
            Destination::Explicit(_) => "explicit",
        }
    }
}

/// Pick `system_path` if the probe reports it exists, else `fallback`.
pub fn resolve_destination<P: PathProbe + ?Sized>(
    probe: &P,
    system_path: &Path,
    fallback: &Path,
) -> Destination {
    if probe.exists(system_path) {
        Destination::System(system_path.to_path_buf())
    } else {
        Destination::Fallback(fallback.to_path_buf())
    }
}

/// `<exe dir>/../data/bin_data.csv`, computed lexically.
///
/// For `/usr/local/bin/bindb-update` this is `/usr/local/data/bin_data.csv`.
pub fn fallback_path(exe: &Path) -> PathBuf {
    let install_dir = match exe.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let base = if install_dir == Path::new(".") {
        PathBuf::from("..")
    } else {
        match install_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => install_dir.to_path_buf(),
        }
    };
    base.join(DATA_DIR).join(FILE_NAME)
}

/// Resolve against the real filesystem and the running executable's location.
pub fn default_destination(cfg: &UpdaterConfig) -> Result<Destination> {
    let exe = std::env::current_exe().context("cannot determine executable location")?;
    let dest = resolve_destination(&RealFs, &cfg.system_path, &fallback_path(&exe));
    tracing::debug!(
        "resolved {} destination {}",
        dest.kind(),
        dest.path().display()
    );
    Ok(dest)
}
