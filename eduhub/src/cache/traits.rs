//! Cache storage trait definitions.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Trait for client-side cache backends.
///
/// The browser app kept small conveniences (recent search terms,
/// session tokens) in local storage; this trait is the pluggable
/// equivalent for library consumers.
#[async_trait]
pub trait CacheStorage: Send + Sync + std::fmt::Debug {
    /// Get a value by key.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Set a value with optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>);

    /// Remove a value by key.
    async fn remove(&self, key: &str);

    /// Clear all cached values.
    async fn clear(&self);
}

/// Extension trait for cache storage with typed operations.
#[async_trait]
pub trait CacheStorageExt: CacheStorage {
    /// Get a JSON-deserialized value.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let data = self.get(key).await?;
        serde_json::from_slice(&data).ok()
    }

    /// Set a JSON-serialized value.
    async fn set_json<T: serde::Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let data = serde_json::to_vec(value).map_err(crate::error::Error::Json)?;
        self.set(key, &data, ttl).await;
        Ok(())
    }
}

// Blanket implementation
impl<T: ?Sized + CacheStorage> CacheStorageExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SessionStub {
        uid: String,
    }

    #[tokio::test]
    async fn test_cache_ext_roundtrip() {
        let cache = MemoryCache::new();
        let value = SessionStub { uid: "42".into() };

        cache.set_json("session", &value, None).await.unwrap();
        let result: Option<SessionStub> = cache.get_json("session").await;
        assert_eq!(result, Some(value));
    }
}
