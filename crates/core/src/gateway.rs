//! Cache-aside query handling
//!
//! [`SearchGateway`] answers a query from the cache when it can and falls
//! back to the search index otherwise, writing the fresh result back to the
//! cache for a short time.
//!
//! # Examples
//!
//! ```rust,no_run
//! use searchgate_core::{GatewayConfig, SearchGateway};
//!
//! # async fn example() -> searchgate_core::Result<()> {
//! let config = GatewayConfig::load(None)?;
//! let gateway = SearchGateway::from_config(&config)?;
//!
//! match gateway.search("iphone").await {
//!     Ok(response) => println!("{} items from {}", response.data.len(), response.source),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

use crate::{
    cache::{CacheStore, MemoryCache, RedisCache},
    config::{CacheBackend, GatewayConfig},
    search::{LazySearchClient, SearchIndex},
    types::{DeploymentMode, Item, Query, SearchResponse, SearchSource},
    GatewayError, Result,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default lifetime of a cached result
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default collection holding the searchable items
pub const DEFAULT_INDEX: &str = "items";

/// Default field matched against the query text
pub const DEFAULT_MATCH_FIELD: &str = "name";

/// Failure of a single search request
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query text was missing or empty
    #[error("Missing query param q")]
    BadRequest,

    /// The cache lookup or the search engine failed
    #[error("Search failed: {0}")]
    SearchFailed(#[source] GatewayError),
}

/// Orchestrates the cache store and the search index for each request
///
/// Holds no per-request state; clone the `Arc` handles freely.
#[derive(Clone)]
pub struct SearchGateway {
    pub(crate) cache: Arc<dyn CacheStore>,
    pub(crate) search: Arc<dyn SearchIndex>,
    index: String,
    match_field: String,
    ttl: Duration,
    pub(crate) mode: DeploymentMode,
}

impl SearchGateway {
    /// Create a gateway over explicit collaborators with default settings
    pub fn new(cache: Arc<dyn CacheStore>, search: Arc<dyn SearchIndex>) -> Self {
        Self {
            cache,
            search,
            index: DEFAULT_INDEX.to_string(),
            match_field: DEFAULT_MATCH_FIELD.to_string(),
            ttl: DEFAULT_CACHE_TTL,
            mode: DeploymentMode::default(),
        }
    }

    /// Build the collaborators described by `config`
    ///
    /// No connection is opened here; both clients connect on first use.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let cache: Arc<dyn CacheStore> = match config.cache.backend {
            CacheBackend::Redis => Arc::new(RedisCache::new(&config.cache.url)?),
            CacheBackend::Memory => Arc::new(MemoryCache::new(config.cache.max_capacity)),
        };
        let search: Arc<dyn SearchIndex> = Arc::new(LazySearchClient::from_settings(&config.search));

        debug!(
            "Gateway configured: cache={:?}, index={}, ttl={}s, mode={}",
            config.cache.backend, config.search.index, config.cache.ttl_seconds, config.mode
        );

        Ok(Self::new(cache, search)
            .with_index(config.search.index.clone())
            .with_match_field(config.search.match_field.clone())
            .with_ttl(config.cache.ttl())
            .with_mode(config.mode))
    }

    /// Set the collection queried and seeded
    pub fn with_index<S: Into<String>>(mut self, index: S) -> Self {
        self.index = index.into();
        self
    }

    /// Set the field matched against the query text
    pub fn with_match_field<S: Into<String>>(mut self, field: S) -> Self {
        self.match_field = field.into();
        self
    }

    /// Set the lifetime of cached results
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the deployment mode
    pub fn with_mode(mut self, mode: DeploymentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    /// Answer `text` from the cache, or from the search index on a miss
    ///
    /// # Errors
    ///
    /// Returns `QueryError::BadRequest` for an empty query without touching
    /// either collaborator, and `QueryError::SearchFailed` when the cache
    /// lookup or the search itself fails. A failed cache write after a
    /// successful search is logged and does not fail the request.
    pub async fn search(&self, text: &str) -> std::result::Result<SearchResponse, QueryError> {
        let query = Query::new(text).ok_or(QueryError::BadRequest)?;
        let key = query.as_str();

        let cached = self
            .cache
            .get(key)
            .await
            .map_err(QueryError::SearchFailed)?;

        if let Some(payload) = cached {
            match serde_json::from_str::<Vec<Item>>(&payload) {
                Ok(data) => {
                    debug!("Cache hit for {:?} ({} items)", key, data.len());
                    return Ok(SearchResponse {
                        source: SearchSource::Cache,
                        data,
                    });
                }
                Err(e) => {
                    warn!("Ignoring unreadable cache entry for {:?}: {}", key, e);
                }
            }
        } else {
            debug!("Cache miss for {:?}", key);
        }

        let data = self
            .search
            .search(&self.index, &self.match_field, key)
            .await
            .map_err(QueryError::SearchFailed)?;

        info!(
            "Search engine returned {} items for {:?}",
            data.len(),
            key
        );

        self.store(key, &data).await;

        Ok(SearchResponse {
            source: SearchSource::SearchEngine,
            data,
        })
    }

    async fn store(&self, key: &str, data: &[Item]) {
        let payload = match serde_json::to_string(data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize results for {:?}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &payload, self.ttl).await {
            warn!("Failed to cache results for {:?}: {}", key, e);
        }
    }
}
