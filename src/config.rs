//! Configuration for news sources and the proxy.
//!
//! Settings come from an optional YAML file and are then overridden by CLI
//! flags / environment variables (see [`crate::cli`]). The upstream key lives
//! in the [`NewsConfig`] handed to a single source or proxy instance; there
//! is no process-wide key.
//!
//! ```yaml
//! base_url: https://newsapi.org/v2
//! api_key: ...
//! sort_by: popularity
//! lookback_days: 0
//! completeness: require-both
//! dates: raw
//! ```

use crate::normalize::{Completeness, DatePolicy, Normalizer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Where a `NewsSource` gets its articles from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Call the news API directly with a key held by this process.
    Upstream,
    /// Call the same-origin proxy; no key needed.
    Proxy,
    /// Answer from the bundled catalog.
    Mock,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_sort_by() -> String {
    "popularity".to_string()
}

#[derive(Clone, Deserialize, Serialize)]
pub struct NewsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub backend: Option<BackendKind>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Days before today the search window starts at (0 = today only).
    #[serde(default)]
    pub lookback_days: i64,
    #[serde(default)]
    pub completeness: Completeness,
    #[serde(default)]
    pub dates: DatePolicy,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            proxy_url: None,
            backend: None,
            sort_by: default_sort_by(),
            lookback_days: 0,
            completeness: Completeness::default(),
            dates: DatePolicy::default(),
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("proxy_url", &self.proxy_url)
            .field("backend", &self.backend)
            .field("sort_by", &self.sort_by)
            .field("lookback_days", &self.lookback_days)
            .field("completeness", &self.completeness)
            .field("dates", &self.dates)
            .finish()
    }
}

impl NewsConfig {
    /// Load from a YAML file, or defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        info!(path = %shown, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// The backend to use: explicit choice, else proxy if configured, else
    /// upstream if a key is present, else the mock catalog.
    pub fn resolved_backend(&self) -> BackendKind {
        if let Some(kind) = self.backend {
            return kind;
        }
        if self.proxy_url.is_some() {
            BackendKind::Proxy
        } else if self.api_key.is_some() {
            BackendKind::Upstream
        } else {
            BackendKind::Mock
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.completeness, self.dates)
    }
}
