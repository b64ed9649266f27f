//! In-memory TTL cache for assessments
//!
//! Entries expire lazily: a read past the deadline evicts the entry and
//! reports a miss. Good enough for a single-process engine; a shared cache
//! would implement the same port against an external store.

use async_trait::async_trait;
use greenlight_application::{AssessmentCache, CacheError};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|deadline| now >= deadline).unwrap_or(false)
    }
}

/// TTL cache backed by a `HashMap`
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AssessmentCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Expired: evict under the write lock and report a miss.
        self.entries.write().await.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let expires_at = if ttl_seconds == 0 {
            None
        } else {
            Some(Instant::now() + std::time::Duration::from_secs(ttl_seconds))
        };
        self.entries.write().await.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear_by_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

/// No-op cache for cache-disabled operation
pub struct NullCache;

#[async_trait]
impl AssessmentCache for NullCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear_by_prefix(&self, _prefix: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let cache = MemoryCache::new();
        cache.set("assess:story:abc", "{}", 60).await.unwrap();
        assert_eq!(
            cache.get("assess:story:abc").await.unwrap(),
            Some("{}".to_string())
        );
        assert_eq!(cache.get("assess:story:other").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache.set("key", "value", 10).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.get("key").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("key").await.unwrap(), None);
        // The expired entry was evicted, not just hidden.
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let cache = MemoryCache::new();
        cache.set("key", "value", 0).await.unwrap();

        tokio::time::advance(Duration::from_secs(86_400)).await;
        assert!(cache.get("key").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_by_prefix_removes_only_matches() {
        let cache = MemoryCache::new();
        cache.set("assess:story:a", "1", 60).await.unwrap();
        cache.set("assess:story:b", "2", 60).await.unwrap();
        cache.set("assess:visual:c", "3", 60).await.unwrap();

        cache.clear_by_prefix("assess:story:").await.unwrap();
        assert_eq!(cache.get("assess:story:a").await.unwrap(), None);
        assert_eq!(cache.get("assess:story:b").await.unwrap(), None);
        assert!(cache.get("assess:visual:c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = MemoryCache::new();
        cache.set("key", "value", 60).await.unwrap();
        cache.delete("key").await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_cache_never_stores() {
        let cache = NullCache;
        cache.set("key", "value", 60).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), None);
    }
}
