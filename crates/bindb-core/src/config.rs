use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::destination::DEFAULT_SYSTEM_PATH;
use crate::storage::ReplaceMode;

/// Upstream location of the BIN table.
pub const DEFAULT_URL: &str =
    "https://raw.githubusercontent.com/Junaid433/LibBIN/main/data/bin_data.csv";

/// Request timeout used when the config does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Updater configuration, optionally loaded from `~/.config/bindb/config.toml`.
///
/// Every field may be omitted from the file; missing fields take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// URL of the CSV to fetch.
    pub url: String,
    /// Whole-request timeout in seconds. Must be non-zero.
    pub timeout_secs: u64,
    /// System-wide install location, used when it already exists.
    pub system_path: PathBuf,
    /// Write to a `.part` file and rename into place instead of removing and rewriting.
    pub atomic_replace: bool,
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            system_path: PathBuf::from(DEFAULT_SYSTEM_PATH),
            atomic_replace: true,
            user_agent: format!("bindb/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl UpdaterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn replace_mode(&self) -> ReplaceMode {
        if self.atomic_replace {
            ReplaceMode::Atomic
        } else {
            ReplaceMode::Direct
        }
    }

    /// Reject values that would make the run misbehave silently.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            anyhow::bail!("config: url must not be empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("config: timeout_secs must be greater than zero");
        }
        if self.system_path.as_os_str().is_empty() {
            anyhow::bail!("config: system_path must not be empty");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bindb")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration.
///
/// With an explicit path the file must exist. Without one, the XDG config file is
/// read when present and built-in defaults are used otherwise; nothing is written.
pub fn load(explicit: Option<&Path>) -> Result<UpdaterConfig> {
    let cfg = match explicit {
        Some(path) => load_from(path)?,
        None => {
            let path = config_path()?;
            if path.exists() {
                load_from(&path)?
            } else {
                tracing::debug!("no config at {}, using defaults", path.display());
                UpdaterConfig::default()
            }
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from(path: &Path) -> Result<UpdaterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: UpdaterConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = UpdaterConfig::default();
        assert_eq!(cfg.url, DEFAULT_URL);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.system_path, PathBuf::from("/usr/share/bin_lookup/bin_data.csv"));
        assert_eq!(cfg.replace_mode(), ReplaceMode::Atomic);
        assert!(cfg.user_agent.starts_with("bindb/"));
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: UpdaterConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, UpdaterConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            url = "https://mirror.example.com/bin_data.csv"
            timeout_secs = 5
            system_path = "/opt/bins/bin_data.csv"
            atomic_replace = false
        "#;
        let cfg: UpdaterConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.url, "https://mirror.example.com/bin_data.csv");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.system_path, PathBuf::from("/opt/bins/bin_data.csv"));
        assert_eq!(cfg.replace_mode(), ReplaceMode::Direct);
        assert_eq!(cfg.user_agent, UpdaterConfig::default().user_agent);
    }

    #[test]
    fn validate_rejects_zero_timeout_and_empty_url() {
        let mut cfg = UpdaterConfig::default();
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = UpdaterConfig::default();
        cfg.url = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 12\n").unwrap();
        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.timeout_secs, 12);
        assert_eq!(cfg.url, DEFAULT_URL);
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read config"));
    }

    #[test]
    fn load_explicit_invalid_values_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").unwrap();
        assert!(load(Some(&path)).is_err());
        fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
