//! Cache store clients
//!
//! The gateway only needs three operations from a cache store, so the store
//! sits behind the [`CacheStore`] trait. Two implementations are provided:
//! - [`RedisCache`] - Redis-backed store used in deployments
//! - [`MemoryCache`] - moka-backed in-process store for local runs and tests

pub mod memory;
pub mod redis_cache;

use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use self::memory::MemoryCache;
pub use self::redis_cache::RedisCache;

/// Key-value store holding serialized search results
///
/// A missing key is `Ok(None)`; `Err` always means the store itself failed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;
}
