//! Error handling for the SearchGate core library

use std::fmt;
use thiserror::Error;

/// Result type alias for SearchGate operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for SearchGate operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Redis client errors
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Cache store errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Search engine errors
    #[error("Search engine error: {message}")]
    Search { message: String },

    /// A required setting was never provided
    #[error("Configuration missing: {key} is not set")]
    ConfigurationMissing { key: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl GatewayError {
    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a search engine error
    pub fn search<S: Into<String>>(message: S) -> Self {
        Self::Search {
            message: message.into(),
        }
    }

    /// Create a configuration missing error
    pub fn configuration_missing<S: Into<String>>(key: S) -> Self {
        Self::ConfigurationMissing { key: key.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if the error came from a downstream service
    pub fn is_downstream(&self) -> bool {
        matches!(
            self,
            Self::Cache { .. } | Self::Search { .. } | Self::Http(_) | Self::Redis(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Io,
            Self::Http(_) | Self::Search { .. } => ErrorCategory::SearchEngine,
            Self::Redis(_) | Self::Cache { .. } => ErrorCategory::CacheStore,
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Config(_) | Self::ConfigurationMissing { .. } => ErrorCategory::Configuration,
            Self::Validation { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Io,
    SearchEngine,
    CacheStore,
    Serialization,
    Configuration,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::SearchEngine => write!(f, "search_engine"),
            Self::CacheStore => write!(f, "cache_store"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Validation => write!(f, "validation"),
        }
    }
}
