//! File-backed cache storage.
//!
//! The CLI is a short-lived process, so conveniences like recent
//! search terms need to outlive it. This backend keeps the cache map
//! in a JSON file and satisfies the library's [`CacheStorage`] trait.

use async_trait::async_trait;
use eduhub::cache::CacheStorage;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Cache backend persisted to a JSON file.
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    entries: RwLock<HashMap<String, FileEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    data: Vec<u8>,
    /// Expiry as Unix seconds; `None` means no TTL.
    expires_at: Option<u64>,
}

impl FileEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| now_secs() > e)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl FileCache {
    /// Open a cache file, starting empty if it is missing or unreadable.
    pub fn open(path: PathBuf) -> Self {
        let entries = fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Best-effort write-back; a failed write only loses convenience
    /// data, so it is logged rather than surfaced.
    fn persist(&self) {
        let entries = self.entries.read().unwrap();
        match serde_json::to_vec(&*entries) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&self.path, bytes) {
                    warn!("failed to write cache file {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("failed to serialize cache: {e}"),
        }
    }
}

#[async_trait]
impl CacheStorage for FileCache {
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
        {
            let mut entries = self.entries.write().unwrap();
            entries.insert(
                key.to_owned(),
                FileEntry {
                    data: value.to_vec(),
                    expires_at: ttl.map(|d| now_secs() + d.as_secs()),
                },
            );
        }
        self.persist();
    }

    async fn remove(&self, key: &str) {
        {
            let mut entries = self.entries.write().unwrap();
            entries.remove(key);
        }
        self.persist();
    }

    async fn clear(&self) {
        {
            let mut entries = self.entries.write().unwrap();
            entries.clear();
        }
        self.persist();
    }
}
