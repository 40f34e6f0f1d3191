//! Bootstrap configuration for nostalgia-yd
//!
//! Resolution priority: command line → environment → TOML file → built-in
//! defaults. Every TOML field is optional; a missing file yields defaults.
//!
//! ```toml
//! port = 5001
//! storage = "sqlite"
//!
//! [logging]
//! level = "debug"
//!
//! [rate_limit]
//! max_requests = 10
//! window_seconds = 60
//!
//! [[sources.sites]]
//! name = "Google"
//! url = "http://google.com"
//! ```

use axum::http::HeaderName;
use nostalgia_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{YearKey, MAX_WEBSITES};

/// Module name used for config file and log identification
pub const MODULE_NAME: &str = "nostalgia-yd";

/// Top-level service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    /// Folder holding the SQLite database (see `RootFolderResolver`)
    pub root_folder: Option<PathBuf>,
    pub storage: StorageBackend,
    pub logging: LoggingConfig,
    pub identity: IdentityConfig,
    pub rate_limit: RateLimitConfig,
    pub sources: SourceConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5001,
            root_folder: None,
            storage: StorageBackend::default(),
            logging: LoggingConfig::default(),
            identity: IdentityConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sources: SourceConfig::default(),
        }
    }
}

/// Where cached year records are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Process-lifetime only
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Request header carrying the caller identity
    pub header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            header: "x-user-id".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// One site whose archived front page is looked up
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackedSite {
    pub name: String,
    pub url: String,
}

impl TrackedSite {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// External source endpoints
///
/// `chart_url` and `article_url` contain a `{year}` placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub chart_url: String,
    pub article_url: String,
    pub availability_url: String,
    pub page_timeout_secs: u64,
    pub snapshot_timeout_secs: u64,
    pub user_agent: String,
    /// Looked up in this order; output order follows it
    pub sites: Vec<TrackedSite>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            chart_url: "https://www.billboard.com/charts/year-end/{year}/hot-100-songs/".to_string(),
            article_url: "https://en.wikipedia.org/wiki/{year}".to_string(),
            availability_url: "https://archive.org/wayback/available".to_string(),
            page_timeout_secs: 10,
            snapshot_timeout_secs: 5,
            user_agent: format!("{}/{}", MODULE_NAME, env!("CARGO_PKG_VERSION")),
            sites: vec![
                TrackedSite::new("Google", "http://google.com"),
                TrackedSite::new("YouTube", "http://youtube.com"),
                TrackedSite::new("Facebook", "http://facebook.com"),
            ],
        }
    }
}

impl SourceConfig {
    pub fn chart_url_for(&self, year: YearKey) -> String {
        self.chart_url.replace("{year}", &year.to_string())
    }

    pub fn article_url_for(&self, year: YearKey) -> String {
        self.article_url.replace("{year}", &year.to_string())
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn snapshot_timeout(&self) -> Duration {
        Duration::from_secs(self.snapshot_timeout_secs)
    }
}

impl ServiceConfig {
    /// Load from TOML and validate; `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(config) = nostalgia_common::config::load_toml_config::<Self>(path)? else {
            return Ok(None);
        };
        config.validate()?;
        Ok(Some(config))
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.max_requests == 0 {
            return Err(Error::Config("rate_limit.max_requests must be at least 1".to_string()));
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(Error::Config("rate_limit.window_seconds must be at least 1".to_string()));
        }
        if self.sources.page_timeout_secs == 0 || self.sources.snapshot_timeout_secs == 0 {
            return Err(Error::Config("source timeouts must be at least 1 second".to_string()));
        }
        if self.sources.sites.is_empty() || self.sources.sites.len() > MAX_WEBSITES {
            return Err(Error::Config(format!(
                "sources.sites must list between 1 and {} sites, got {}",
                MAX_WEBSITES,
                self.sources.sites.len()
            )));
        }
        HeaderName::try_from(self.identity.header.as_str()).map_err(|e| {
            Error::Config(format!("identity.header '{}' invalid: {}", self.identity.header, e))
        })?;
        Ok(())
    }
}
