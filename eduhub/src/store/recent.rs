//! Recent search terms.

use std::sync::Arc;

use crate::cache::{CacheStorage, CacheStorageExt};
use crate::error::Result;

/// Cache key for the recent-search list.
const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// Maximum number of terms kept.
const MAX_RECENT_SEARCHES: usize = 10;

/// Small most-recent-first list of search terms, persisted through a
/// [`CacheStorage`] backend (the browser app kept these in local
/// storage).
pub struct RecentSearches {
    cache: Arc<dyn CacheStorage>,
}

impl RecentSearches {
    /// Create a recent-search list over the given cache.
    pub fn new(cache: Arc<dyn CacheStorage>) -> Self {
        Self { cache }
    }

    /// All terms, most recent first.
    pub async fn all(&self) -> Vec<String> {
        self.cache
            .get_json(RECENT_SEARCHES_KEY)
            .await
            .unwrap_or_default()
    }

    /// Record a search term.
    ///
    /// Blank terms are ignored; an existing term (case-insensitive)
    /// moves to the front instead of duplicating; the list is capped.
    pub async fn push(&self, term: &str) -> Result<()> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let mut terms = self.all().await;
        terms.retain(|t| !t.eq_ignore_ascii_case(term));
        terms.insert(0, term.to_owned());
        terms.truncate(MAX_RECENT_SEARCHES);

        self.cache.set_json(RECENT_SEARCHES_KEY, &terms, None).await
    }

    /// Forget all terms.
    pub async fn clear(&self) {
        self.cache.remove(RECENT_SEARCHES_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use pretty_assertions::assert_eq;

    fn searches() -> RecentSearches {
        RecentSearches::new(Arc::new(MemoryCache::new()))
    }

    #[tokio::test]
    async fn test_push_most_recent_first() {
        let recent = searches();
        recent.push("algebra").await.unwrap();
        recent.push("geometry").await.unwrap();

        assert_eq!(recent.all().await, vec!["geometry", "algebra"]);
    }

    #[tokio::test]
    async fn test_push_dedupes_case_insensitive() {
        let recent = searches();
        recent.push("Algebra").await.unwrap();
        recent.push("geometry").await.unwrap();
        recent.push("algebra").await.unwrap();

        assert_eq!(recent.all().await, vec!["algebra", "geometry"]);
    }

    #[tokio::test]
    async fn test_push_ignores_blank_and_caps() {
        let recent = searches();
        recent.push("   ").await.unwrap();
        assert!(recent.all().await.is_empty());

        for i in 0..15 {
            recent.push(&format!("term {i}")).await.unwrap();
        }
        let all = recent.all().await;
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], "term 14");
    }

    #[tokio::test]
    async fn test_clear() {
        let recent = searches();
        recent.push("algebra").await.unwrap();
        recent.clear().await;
        assert!(recent.all().await.is_empty());
    }
}
