//! In-memory cache implementation.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use super::traits::CacheStorage;

/// In-memory cache with optional TTL support.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            data,
            expires_at: ttl.map(|d| Instant::now() + d),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Instant::now() > e)
    }
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove expired entries.
    pub fn cleanup(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|_, v| !v.is_expired());
    }
}

#[async_trait]
impl CacheStorage for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().unwrap();
        entries.get(key).and_then(|entry| {
            if entry.is_expired() {
                None
            } else {
                Some(entry.data.clone())
            }
        })
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_owned(), CacheEntry::new(value.to_vec(), ttl));
    }

    async fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
    }
}
