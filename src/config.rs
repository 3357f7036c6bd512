//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::PathBuf;

use crate::format::DisplayZone;
use crate::model::Bucket;

/// Host serving the Syntech analytics API
pub const DEFAULT_BASE_URL: &str =
    "https://projectsyntech-dzb2g7dbebe0amde.southindia-01.azurewebsites.net";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the five analytics buckets are fetched from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Per-request timeout. Unset leaves the HTTP client defaults in place.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoints: EndpointsConfig::default(),
            request_timeout_secs: None,
        }
    }
}

impl SourceConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Absolute URL of a bucket, with each path segment percent-encoded
    pub fn url(&self, bucket: Bucket) -> String {
        let path = self.endpoints.path(bucket);
        let encoded: Vec<String> = path
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(|seg| {
                let decoded = urlencoding::decode(seg)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| seg.to_string());
                urlencoding::encode(&decoded).into_owned()
            })
            .collect();

        format!("{}/{}", self.base_url.trim_end_matches('/'), encoded.join("/"))
    }
}

/// Endpoint paths, relative to the base URL
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_total_path")]
    pub total: String,

    #[serde(default = "default_red_listed_path")]
    pub red_listed: String,

    #[serde(default = "default_unlisted_path")]
    pub unlisted: String,

    #[serde(default = "default_approved_path")]
    pub approved: String,

    #[serde(default = "default_rejected_path")]
    pub rejected: String,
}

fn default_total_path() -> String {
    "/api/Analytics/Total Analytics".to_string()
}

fn default_red_listed_path() -> String {
    "/api/Analytics/RedListed Analytics".to_string()
}

fn default_unlisted_path() -> String {
    "/api/Analytics/UNListed Analytics".to_string()
}

fn default_approved_path() -> String {
    "/api/Analytics/approved".to_string()
}

fn default_rejected_path() -> String {
    "/api/Analytics/rejected".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            total: default_total_path(),
            red_listed: default_red_listed_path(),
            unlisted: default_unlisted_path(),
            approved: default_approved_path(),
            rejected: default_rejected_path(),
        }
    }
}

impl EndpointsConfig {
    pub fn path(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Total => &self.total,
            Bucket::RedListed => &self.red_listed,
            Bucket::Unlisted => &self.unlisted,
            Bucket::Approved => &self.approved,
            Bucket::Rejected => &self.rejected,
        }
    }
}

/// Terminal rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub timezone: DisplayZone,

    #[serde(default = "default_color")]
    pub color: bool,

    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    #[serde(default = "default_chart_height")]
    pub chart_height: usize,
}

fn default_color() -> bool {
    true
}

fn default_chart_width() -> usize {
    60
}

fn default_chart_height() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: DisplayZone::default(),
            color: default_color(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("syntech-analytics").join("config.toml")),
            Some(PathBuf::from("./syntech-analytics.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SYNTECH_ANALYTICS_BASE_URL") {
            self.source.base_url = url;
        }

        if let Ok(tz) = std::env::var("SYNTECH_ANALYTICS_TIMEZONE") {
            match tz.parse() {
                Ok(zone) => self.display.timezone = zone,
                Err(e) => tracing::warn!("Ignoring SYNTECH_ANALYTICS_TIMEZONE: {}", e),
            }
        }

        if let Ok(level) = std::env::var("SYNTECH_ANALYTICS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SYNTECH_ANALYTICS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Syntech Analytics Configuration
#
# Environment variables override these settings:
# - SYNTECH_ANALYTICS_BASE_URL
# - SYNTECH_ANALYTICS_TIMEZONE
# - SYNTECH_ANALYTICS_LOG_LEVEL
# - SYNTECH_ANALYTICS_LOG_FORMAT

[source]
# Analytics API host
base_url = "{base_url}"

# Per-request timeout in seconds (unset: HTTP client default)
# request_timeout_secs = 30

[source.endpoints]
total = "{total}"
red_listed = "{red_listed}"
unlisted = "{unlisted}"
approved = "{approved}"
rejected = "{rejected}"

[display]
# Time zone for chart dates: utc, local or an offset such as +05:30
timezone = "local"

# Colour chart lines with their stroke colours
color = true

# Chart size in terminal cells
chart_width = 60
chart_height = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        base_url = DEFAULT_BASE_URL,
        total = default_total_path(),
        red_listed = default_red_listed_path(),
        unlisted = default_unlisted_path(),
        approved = default_approved_path(),
        rejected = default_rejected_path(),
    )
}
