//! Configuration management for the console and the microsite
//!
//! Settings come from environment variables or a TOML file and are
//! validated before any client is built.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Microsite server configuration
    #[serde(default)]
    pub site: SiteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API endpoints and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Admin API base URL
    pub base_url: String,

    /// Public API base URL
    pub public_base_url: String,

    /// Value sent in the `X-Admin-Key` header
    pub admin_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Name stamped as `published_by` when the console publishes
    pub published_by: String,
}

/// Microsite server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,

    /// Canonical public origin, used in robots.txt and sitemaps
    pub site_url: String,

    /// Revalidation interval for hospital lookups
    pub hospital_ttl_secs: u64,

    /// Revalidation interval for content lists and details
    pub content_ttl_secs: u64,

    /// Maximum cached entries per resource
    pub cache_capacity: u64,

    /// Hospitals listed in the root sitemap index
    pub sitemap_slugs: Vec<String>,
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

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000/api/v1"),
            public_base_url: String::from("http://localhost:8000/api/v1/public"),
            admin_key: String::new(),
            timeout_secs: 30,
            published_by: String::from("AE"),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0:3000"),
            site_url: String::from("https://reputation.co.kr"),
            hospital_ttl_secs: 3600,
            content_ttl_secs: 1800,
            cache_capacity: 1000,
            sitemap_slugs: Vec::new(),
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
        let defaults = Self::default();

        let env_or = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let timeout_secs = std::env::var("REPUTATION_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.api.timeout_secs);

        let sitemap_slugs = std::env::var("REPUTATION_SITEMAP_SLUGS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api: ApiConfig {
                base_url: env_or("REPUTATION_API_URL", &defaults.api.base_url),
                public_base_url: env_or(
                    "REPUTATION_PUBLIC_API_URL",
                    &defaults.api.public_base_url,
                ),
                admin_key: env_or("REPUTATION_ADMIN_KEY", ""),
                timeout_secs,
                published_by: env_or("REPUTATION_PUBLISHED_BY", &defaults.api.published_by),
            },
            site: SiteConfig {
                bind_address: env_or("REPUTATION_SITE_BIND", &defaults.site.bind_address),
                site_url: env_or("REPUTATION_SITE_URL", &defaults.site.site_url),
                sitemap_slugs,
                ..defaults.site
            },
            logging: LoggingConfig {
                level: env_or("REPUTATION_LOG_LEVEL", &defaults.logging.level),
                format: env_or("REPUTATION_LOG_FORMAT", &defaults.logging.format),
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        for (key, value) in [
            ("api.base_url", &self.api.base_url),
            ("api.public_base_url", &self.api.public_base_url),
            ("site.site_url", &self.site.site_url),
        ] {
            Url::parse(value)
                .map_err(|e| Error::config(format!("{key} is not a valid URL: {value} ({e})")))?;
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be greater than 0"));
        }

        if self.site.hospital_ttl_secs == 0 || self.site.content_ttl_secs == 0 {
            return Err(Error::config("site cache TTLs must be greater than 0"));
        }

        if self.site.cache_capacity == 0 {
            return Err(Error::config("site.cache_capacity must be greater than 0"));
        }

        if self.api.published_by.trim().is_empty() {
            return Err(Error::config("api.published_by must not be empty"));
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl SiteConfig {
    /// `site_url` without a trailing slash
    pub fn origin(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    #[must_use]
    pub fn hospital_ttl(&self) -> Duration {
        Duration::from_secs(self.hospital_ttl_secs)
    }

    #[must_use]
    pub fn content_ttl(&self) -> Duration {
        Duration::from_secs(self.content_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.site.hospital_ttl(), Duration::from_secs(3600));
        assert_eq!(config.site.content_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost:8000 api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = Config::default();
        config.site.content_ttl_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("TTL")));
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            admin_key = "secret"

            [site]
            sitemap_slugs = ["jangpyeonhan"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.admin_key, "secret");
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.site.sitemap_slugs, vec!["jangpyeonhan"]);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_origin_trims_slash() {
        let site = SiteConfig {
            site_url: "https://reputation.co.kr/".into(),
            ..SiteConfig::default()
        };
        assert_eq!(site.origin(), "https://reputation.co.kr");
    }
}
