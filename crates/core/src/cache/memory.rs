//! In-process cache store backed by moka
//!
//! Each entry expires after the TTL it was written with, matching the
//! `SET key value EX ttl` semantics of the Redis store.
//!
//! # Examples
//!
//! ```rust
//! use searchgate_core::cache::{CacheStore, MemoryCache};
//! use std::time::Duration;
//!
//! # async fn example() -> searchgate_core::Result<()> {
//! let cache = MemoryCache::new(1000);
//! cache.set("iphone", "[]", Duration::from_secs(60)).await?;
//! assert_eq!(cache.get("iphone").await?, Some("[]".to_string()));
//! # Ok(())
//! # }
//! ```

use super::CacheStore;
use crate::Result;
use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Clone)]
struct StoredValue {
    payload: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    // Overwriting a key restarts its lifetime
    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// moka-backed [`CacheStore`]
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<String, StoredValue>,
}

impl MemoryCache {
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }

    /// Number of live entries, after pending maintenance has run
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.cache.get(key).await.map(|v| v.payload);
        trace!(key, hit = value.is_some(), "memory cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.cache
            .insert(
                key.to_string(),
                StoredValue {
                    payload: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
