//! Configuration types for the SearchGate core library
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional config file, then `SEARCHGATE__*` environment variables, then the
//! conventional deployment variables (`PORT`, `REDIS_URL`,
//! `ELASTICSEARCH_NODE`, `APP_ENV`/`NODE_ENV`).

use crate::{types::DeploymentMode, GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, time::Duration};
use url::Url;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "SEARCHGATE";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Cache store settings
    pub cache: CacheSettings,
    /// Search engine settings
    pub search: SearchSettings,
    /// Deployment mode
    pub mode: DeploymentMode,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Which cache store implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

/// Cache store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// Redis connection URL
    pub url: String,
    /// Lifetime of a cached result
    pub ttl_seconds: u64,
    /// Entry limit for the in-memory backend
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: "redis://127.0.0.1:6379".to_string(),
            ttl_seconds: 60,
            max_capacity: 10_000,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Search engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Elasticsearch node URL; checked on first use, not at startup
    pub url: Option<String>,
    /// Index holding the searchable items
    pub index: String,
    /// Field matched against the query text
    pub match_field: String,
    pub timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: None,
            index: "items".to_string(),
            match_field: "name".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration from an optional file and an explicit environment
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        let mode = env
            .get("APP_ENV")
            .or_else(|| env.get("NODE_ENV"))
            .map(|value| match value.parse::<DeploymentMode>() {
                Ok(mode) => mode.as_str().to_string(),
                // Anything that is not explicitly production behaves like development
                Err(_) => DeploymentMode::Development.as_str().to_string(),
            });

        builder = builder
            .set_override_option("server.port", env.get("PORT").cloned())?
            .set_override_option("cache.url", env.get("REDIS_URL").cloned())?
            .set_override_option("search.url", env.get("ELASTICSEARCH_NODE").cloned())?
            .set_override_option("mode", mode)?;

        let config: GatewayConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::validation("Port cannot be 0"));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(GatewayError::validation("Cache TTL cannot be 0"));
        }

        if self.cache.backend == CacheBackend::Redis {
            let url = Url::parse(&self.cache.url).map_err(|e| {
                GatewayError::validation(format!("Invalid cache URL {}: {}", self.cache.url, e))
            })?;
            if !matches!(url.scheme(), "redis" | "rediss") {
                return Err(GatewayError::validation(
                    "Cache URL must use redis or rediss scheme",
                ));
            }
        }

        if let Some(search_url) = &self.search.url {
            let url = Url::parse(search_url).map_err(|e| {
                GatewayError::validation(format!("Invalid search URL {}: {}", search_url, e))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(GatewayError::validation(
                    "Search URL must use http or https scheme",
                ));
            }
        }

        if self.search.index.is_empty() {
            return Err(GatewayError::validation("Search index cannot be empty"));
        }

        if self.search.match_field.is_empty() {
            return Err(GatewayError::validation("Match field cannot be empty"));
        }

        let valid_formats = ["json", "pretty", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(GatewayError::validation(format!(
                "Unknown log format: {}. Valid formats: {}",
                self.logging.format,
                valid_formats.join(", ")
            )));
        }

        Ok(())
    }
}
