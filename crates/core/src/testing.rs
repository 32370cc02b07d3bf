//! Test doubles for the cache store and the search index

use crate::{
    cache::{CacheStore, MemoryCache},
    search::SearchIndex,
    types::Item,
    GatewayError, Result,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

/// Memory-backed cache that counts calls and can be told to fail
pub(crate) struct FakeCache {
    inner: MemoryCache,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub down: AtomicBool,
    pub last_ttl: Mutex<Option<Duration>>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(100),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            down: AtomicBool::new(false),
            last_ttl: Mutex::new(None),
        }
    }

    pub fn down() -> Self {
        let cache = Self::new();
        cache.down.store(true, Ordering::SeqCst);
        cache.fail_get.store(true, Ordering::SeqCst);
        cache.fail_set.store(true, Ordering::SeqCst);
        cache
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }

    pub async fn put_raw(&self, key: &str, value: &str) {
        self.inner
            .set(key, value, Duration::from_secs(60))
            .await
            .ok();
    }
}

#[async_trait]
impl CacheStore for FakeCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(GatewayError::cache("connection refused"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        *self.last_ttl.lock().unwrap() = Some(ttl);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(GatewayError::cache("connection reset"));
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

/// In-memory index that answers every query with a fixed item list
pub(crate) struct FakeSearch {
    items: Vec<Item>,
    pub fail: AtomicBool,
    pub searches: AtomicUsize,
    pub last_query: Mutex<Option<(String, String, String)>>,
    pub indexed: Mutex<Vec<(String, Item)>>,
}

impl FakeSearch {
    pub fn returning(items: Vec<Item>) -> Self {
        Self {
            items,
            fail: AtomicBool::new(false),
            searches: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            indexed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let search = Self::returning(Vec::new());
        search.fail.store(true, Ordering::SeqCst);
        search
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn indexed(&self) -> Vec<(String, Item)> {
        self.indexed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for FakeSearch {
    async fn search(
        &self,
        collection: &str,
        match_field: &str,
        match_text: &str,
    ) -> Result<Vec<Item>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some((
            collection.to_string(),
            match_field.to_string(),
            match_text.to_string(),
        ));
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::search("connection refused"));
        }
        Ok(self.items.clone())
    }

    async fn index(&self, collection: &str, item: &Item) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::search("connection refused"));
        }
        self.indexed
            .lock()
            .unwrap()
            .push((collection.to_string(), item.clone()));
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

pub(crate) fn iphones() -> Vec<Item> {
    vec![
        Item::new("iPhone 14", "phone"),
        Item::new("iPhone 15 Pro", "phone"),
    ]
}
