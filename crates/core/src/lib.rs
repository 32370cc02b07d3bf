//! SearchGate Core Library
//!
//! Core functionality for the SearchGate search gateway: the cache-aside
//! query handler, the cache store and search engine clients it sequences,
//! configuration, and logging setup.

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod search;
pub mod seed;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use cache::{CacheStore, MemoryCache, RedisCache};
pub use config::{CacheBackend, GatewayConfig};
pub use error::{GatewayError, Result};
pub use gateway::{QueryError, SearchGateway};
pub use health::{HealthReport, HealthStatus, ServiceState};
pub use search::{ElasticsearchClient, LazySearchClient, SearchIndex};
pub use seed::{demo_items, SeedError};
pub use types::{DeploymentMode, Item, Query, SearchResponse, SearchSource};

/// Initialize logging with custom configuration
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "text" | "pretty" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => {
            return Err(GatewayError::validation(format!(
                "Unknown log format: {}",
                format
            )));
        }
    };

    result.map_err(|e| GatewayError::validation(format!("Failed to initialize logger: {}", e)))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
