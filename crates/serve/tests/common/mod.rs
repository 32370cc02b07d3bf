//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use searchgate_core::{
    config::ServerSettings, CacheStore, DeploymentMode, GatewayError, Item, MemoryCache, Result,
    SearchGateway, SearchIndex,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tower::ServiceExt;

/// Memory cache that counts calls and can be switched off
#[derive(Clone)]
pub struct CountingCache {
    inner: MemoryCache,
    pub gets: Arc<AtomicUsize>,
    pub sets: Arc<AtomicUsize>,
    pub down: Arc<AtomicBool>,
}

impl CountingCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(100),
            gets: Arc::new(AtomicUsize::new(0)),
            sets: Arc::new(AtomicUsize::new(0)),
            down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn unavailable() -> Self {
        let cache = Self::new();
        cache.down.store(true, Ordering::SeqCst);
        cache
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for CountingCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(GatewayError::cache("connection refused"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(GatewayError::cache("connection refused"));
        }
        self.inner.set(key, value, ttl).await
    }

    async fn ping(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(GatewayError::cache("connection refused"))
        } else {
            Ok(())
        }
    }
}

/// Search index answering every query with a fixed list
#[derive(Clone)]
pub struct StubIndex {
    items: Vec<Item>,
    pub fail: Arc<AtomicBool>,
    pub searches: Arc<AtomicUsize>,
    pub indexed: Arc<Mutex<Vec<Item>>>,
}

impl StubIndex {
    pub fn returning(items: Vec<Item>) -> Self {
        Self {
            items,
            fail: Arc::new(AtomicBool::new(false)),
            searches: Arc::new(AtomicUsize::new(0)),
            indexed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        let index = Self::returning(Vec::new());
        index.fail.store(true, Ordering::SeqCst);
        index
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn indexed(&self) -> Vec<Item> {
        self.indexed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for StubIndex {
    async fn search(&self, _collection: &str, _field: &str, _text: &str) -> Result<Vec<Item>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::search("connection refused"));
        }
        Ok(self.items.clone())
    }

    async fn index(&self, _collection: &str, item: &Item) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::search("connection refused"));
        }
        self.indexed.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(GatewayError::search("connection refused"))
        } else {
            Ok(())
        }
    }
}

pub fn iphones() -> Vec<Item> {
    vec![
        Item::new("iPhone 14", "phone"),
        Item::new("iPhone 15 Pro", "phone"),
    ]
}

/// Router wired to the given doubles
pub fn router(cache: &CountingCache, index: &StubIndex, mode: DeploymentMode) -> Router {
    let gateway =
        SearchGateway::new(Arc::new(cache.clone()), Arc::new(index.clone())).with_mode(mode);
    searchgate_serve::create_app(
        &ServerSettings::default(),
        searchgate_serve::AppState::new(gateway),
    )
}

/// Helper to make GET request
pub async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    (status, value)
}
