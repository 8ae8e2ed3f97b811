//! `bindb-update [update]` – fetch the table and install it.

use anyhow::Result;
use bindb_core::config::UpdaterConfig;
use bindb_core::destination::{self, Destination};
use bindb_core::fetch::CurlFetcher;
use bindb_core::update::{download_and_install, UpdateOutcome};
use std::path::PathBuf;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct UpdateOverrides {
    pub url: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub direct: bool,
}

impl UpdateOverrides {
    pub fn apply(&self, mut cfg: UpdaterConfig) -> UpdaterConfig {
        if let Some(url) = &self.url {
            cfg.url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.timeout_secs = secs;
        }
        if self.direct {
            cfg.atomic_replace = false;
        }
        cfg
    }
}

/// Returns the process exit status: 0 when installed, 1 when the download failed.
pub fn run_update(cfg: UpdaterConfig, overrides: UpdateOverrides) -> Result<i32> {
    let cfg = overrides.apply(cfg);
    cfg.validate()?;
    let dest = match overrides.output {
        Some(path) => Destination::Explicit(path),
        None => destination::default_destination(&cfg)?,
    };

    println!("Downloading BIN DB from {}...", cfg.url);
    let fetcher = CurlFetcher::from_config(&cfg);
    let outcome = download_and_install(&fetcher, &cfg.url, dest.path(), cfg.replace_mode())?;
    match &outcome {
        UpdateOutcome::Installed { path, .. } => println!("BIN DB saved to {}", path.display()),
        UpdateOutcome::DownloadFailed(e) => println!("Failed to download BIN DB: {}", e),
    }
    Ok(outcome.exit_code())
}
