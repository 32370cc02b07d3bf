//! Redis-backed cache store
//!
//! Opening the client does no I/O. The multiplexed connection is created on
//! first use, so the gateway can start while Redis is still unreachable.

use super::CacheStore;
use crate::{GatewayError, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

// One connection attempt per request; a failure fails the request
const RECONNECT_EXPONENT_BASE: u64 = 2;
const RECONNECT_FACTOR_MS: u64 = 100;
const RECONNECT_RETRIES: usize = 0;

/// Redis [`CacheStore`]
pub struct RedisCache {
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Create a client for `url` without connecting
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| GatewayError::validation(format!("Invalid Redis URL {}: {}", url, e)))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                debug!("Opening Redis connection");
                let manager = ConnectionManager::new_with_backoff(
                    self.client.clone(),
                    RECONNECT_EXPONENT_BASE,
                    RECONNECT_FACTOR_MS,
                    RECONNECT_RETRIES,
                )
                .await?;
                info!("Connected to Redis");
                Ok::<_, redis::RedisError>(manager)
            })
            .await
            .map_err(|e| GatewayError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(manager.clone())
    }
}

/// `SET key value EX ttl`; `EX` takes whole seconds and rejects 0
fn set_command(key: &str, value: &str, ttl: Duration) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value).arg("EX").arg(ttl.as_secs().max(1));
    cmd
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(|e| GatewayError::cache(format!("GET failed: {}", e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;

        set_command(key, value, ttl)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| GatewayError::cache(format!("SET failed: {}", e)))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;

        let reply = redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| GatewayError::cache(format!("PING failed: {}", e)))?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(GatewayError::cache(format!("Unexpected PING reply: {}", reply)))
        }
    }
}
