//! Single blocking HTTP GET of the BIN table.
//!
//! Uses one libcurl easy handle per request: redirects followed, whole-request
//! timeout, body buffered in memory. Any network error, timeout or non-2xx
//! status is a `FetchError`.

use crate::config::UpdaterConfig;
use std::time::Duration;

/// Why a download failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Rejected before any network I/O.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// libcurl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Transfer completed with a non-2xx status.
    #[error("HTTP {status} for url: {url}")]
    Http { status: u32, url: String },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }

    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Source of the remote bytes. The curl implementation is the only production one.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetcher backed by a libcurl easy handle.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    user_agent: String,
}

impl CurlFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(cfg: &UpdaterConfig) -> Self {
        Self::new(cfg.timeout(), cfg.user_agent.clone())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Only absolute http/https URLs are fetched.
fn check_url(url: &str) -> Result<(), FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {:?}", other))),
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        check_url(url)?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.timeout(self.timeout)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }
        tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}
