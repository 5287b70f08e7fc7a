//! Configuration management for the khabar service
//!
//! Configuration is loaded from environment variables (the deployment
//! surface) or from a TOML file, then validated before anything else starts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Literal credential value treated as "not configured"
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyed headline API configuration
    pub api: NewsApiConfig,

    /// Upstream fetch configuration
    pub fetch: FetchConfig,

    /// Scheduled refresh configuration
    pub scheduler: SchedulerConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Snapshot persistence configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Keyed headline API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsApiConfig {
    /// API credential; `None` disables the keyed adapter entirely
    pub key: Option<String>,

    /// Country filter for top headlines
    pub country: String,

    /// Page size requested from the headline endpoint
    pub page_size: u32,
}

/// Upstream fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-call timeout in seconds, applied uniformly to all upstreams
    pub request_timeout_secs: u64,
}

/// Scheduled refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Refresh cadence in seconds
    pub refresh_interval_secs: u64,

    /// Delay before the first run after process start, in seconds
    pub startup_delay_secs: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,
}

/// Snapshot persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the single persisted snapshot record
    pub snapshot_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            country: String::from("in"),
            page_size: 20,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 300,
            startup_delay_secs: 2,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("daily-news.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("NEWS_API_KEY")
            .ok()
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_API_KEY);

        let country = std::env::var("KHABAR_COUNTRY").unwrap_or_else(|_| String::from("in"));

        let page_size = std::env::var("KHABAR_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(20);

        let request_timeout_secs = std::env::var("KHABAR_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let refresh_interval_secs = std::env::var("KHABAR_REFRESH_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(300);

        let startup_delay_secs = std::env::var("KHABAR_STARTUP_DELAY")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2);

        let host = std::env::var("KHABAR_HOST").unwrap_or_else(|_| String::from("0.0.0.0"));

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let snapshot_path = std::env::var("KHABAR_SNAPSHOT_PATH")
            .unwrap_or_else(|_| String::from("daily-news.json"))
            .into();

        let level = std::env::var("KHABAR_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format = std::env::var("KHABAR_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            api: NewsApiConfig {
                key,
                country,
                page_size,
            },
            fetch: FetchConfig {
                request_timeout_secs,
            },
            scheduler: SchedulerConfig {
                refresh_interval_secs,
                startup_delay_secs,
            },
            server: ServerConfig { host, port },
            storage: StorageConfig { snapshot_path },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        // A placeholder credential in the file counts as absent too
        if config
            .api
            .key
            .as_deref()
            .is_some_and(|k| k.is_empty() || k == PLACEHOLDER_API_KEY)
        {
            config.api.key = None;
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.scheduler.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be greater than 0");
        }

        if self.api.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        if self.api.country.is_empty() {
            anyhow::bail!("country must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be \"text\" or \"json\"");
        }

        Ok(())
    }

    /// Whether the keyed headline adapter is enabled
    #[must_use]
    pub fn keyed_api_enabled(&self) -> bool {
        self.api.key.is_some()
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.request_timeout_secs)
    }

    /// Get refresh cadence as Duration
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.refresh_interval_secs)
    }

    /// Get startup delay as Duration
    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.scheduler.startup_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "NEWS_API_KEY",
            "KHABAR_COUNTRY",
            "KHABAR_PAGE_SIZE",
            "KHABAR_REQUEST_TIMEOUT",
            "KHABAR_REFRESH_INTERVAL",
            "KHABAR_STARTUP_DELAY",
            "KHABAR_HOST",
            "PORT",
            "KHABAR_SNAPSHOT_PATH",
            "KHABAR_LOG_LEVEL",
            "KHABAR_LOG_FORMAT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert!(config.api.key.is_none());
        assert!(!config.keyed_api_enabled());
        assert_eq!(config.api.country, "in");
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.refresh_interval(), Duration::from_secs(300));
        assert_eq!(config.startup_delay(), Duration::from_secs(2));
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.snapshot_path, PathBuf::from("daily-news.json"));
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_placeholder_key_treated_as_unconfigured() {
        clear_env();
        std::env::set_var("NEWS_API_KEY", PLACEHOLDER_API_KEY);
        let config = Config::from_env().unwrap();
        assert!(!config.keyed_api_enabled());

        std::env::set_var("NEWS_API_KEY", "real-key-123");
        let config = Config::from_env().unwrap();
        assert!(config.keyed_api_enabled());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_port_override() {
        clear_env();
        std::env::set_var("PORT", "8080");
        let config = Config::from_env().unwrap();
        assert_eq!(config.server.port, 8080);
        clear_env();
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("khabar.toml");
        std::fs::write(
            &path,
            r#"
[api]
key = "file-key"
country = "in"

[scheduler]
refresh_interval_secs = 60

[storage]
snapshot_path = "/var/lib/khabar/daily-news.json"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.key.as_deref(), Some("file-key"));
        assert_eq!(config.scheduler.refresh_interval_secs, 60);
        assert_eq!(config.api.page_size, 20);
        assert_eq!(
            config.storage.snapshot_path,
            PathBuf::from("/var/lib/khabar/daily-news.json")
        );
    }

    #[test]
    fn test_from_file_placeholder_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("khabar.toml");
        std::fs::write(&path, "[api]\nkey = \"your_api_key_here\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.keyed_api_enabled());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.fetch.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = String::from("xml");
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scheduler.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }
}
