//! CLI for the BIN database updater.

mod commands;

use anyhow::Result;
use bindb_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_config_path, run_path, run_update, UpdateOverrides};

/// Exit status for errors other than a failed download (filesystem, config).
pub const EXIT_FATAL: i32 = 2;

/// Download the BIN lookup table and install it locally.
#[derive(Debug, Parser)]
#[command(name = "bindb-update", version)]
#[command(about = "Download the BIN lookup table and install it locally", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/bindb/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Defaults to `update` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    /// Download the table and replace the installed copy.
    Update {
        /// Fetch from this URL instead of the configured one.
        #[arg(long)]
        url: Option<String>,
        /// Write here instead of the resolved system/fallback path.
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
        /// Request timeout in seconds.
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
        /// Remove the old file and write in place instead of rename-into-place.
        #[arg(long)]
        direct: bool,
    },

    /// Print the destination path an update would write to.
    Path,

    /// Print where the config file is looked up.
    ConfigPath,
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Update {
            url: None,
            output: None,
            timeout_secs: None,
            direct: false,
        }
    }
}

impl Cli {
    /// Parse arguments, run the command and return the process exit status.
    pub fn run_from_args() -> Result<i32> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<i32> {
        let command = self.command.unwrap_or_default();
        if command == CliCommand::ConfigPath {
            run_config_path(self.config.as_deref())?;
            return Ok(0);
        }

        let cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match command {
            CliCommand::Update {
                url,
                output,
                timeout_secs,
                direct,
            } => {
                let overrides = UpdateOverrides {
                    url,
                    output,
                    timeout_secs,
                    direct,
                };
                run_update(cfg, overrides)
            }
            CliCommand::Path => {
                run_path(&cfg)?;
                Ok(0)
            }
            CliCommand::ConfigPath => Ok(0),
        }
    }
}
