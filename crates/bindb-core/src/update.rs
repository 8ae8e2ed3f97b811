//! The update operation: fetch the table, then install it.
//!
//! A failed download is an outcome, not an error: it is logged and reported
//! back with its cause, and the destination is left as it was. Filesystem
//! faults during installation propagate as errors.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::fetch::{Fetch, FetchError};
use crate::storage::{self, ReplaceMode};

/// Process exit status for a failed download.
pub const EXIT_DOWNLOAD_FAILED: i32 = 1;

#[derive(Debug)]
pub enum UpdateOutcome {
    Installed { path: PathBuf, bytes: u64 },
    DownloadFailed(FetchError),
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Installed { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateOutcome::Installed { .. } => 0,
            UpdateOutcome::DownloadFailed(_) => EXIT_DOWNLOAD_FAILED,
        }
    }
}

/// Fetch `url` once and replace `destination` with the response body.
pub fn download_and_install<F: Fetch + ?Sized>(
    fetcher: &F,
    url: &str,
    destination: &Path,
    mode: ReplaceMode,
) -> Result<UpdateOutcome> {
    tracing::info!("downloading {} to {}", url, destination.display());
    let body = match fetcher.fetch(url) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("download of {} failed: {}", url, e);
            return Ok(UpdateOutcome::DownloadFailed(e));
        }
    };

    storage::install(destination, &body, mode)?;
    tracing::info!(
        "installed {} bytes at {} ({:?})",
        body.len(),
        destination.display(),
        mode
    );
    Ok(UpdateOutcome::Installed {
        path: destination.to_path_buf(),
        bytes: body.len() as u64,
    })
}
