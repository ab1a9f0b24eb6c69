use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Key-value cache with per-entry expiry, injected into services rather than
/// accessed as global state. Values are pre-serialized JSON strings so the
/// backend can be swapped for a networked cache without touching callers.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String, ttl: Duration);
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache over a read/write-locked map. Concurrent population of
/// the same key is tolerated; the last writer wins.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        // Fast path: read lock only.
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().await.remove(key);
        }
        None
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_stored_value() {
        let cache = MemoryCache::new();
        cache
            .set("movies:1:10", "payload".to_string(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get("movies:1:10").await.as_deref(), Some("payload"));
        assert_eq!(cache.get("movies:2:10").await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache
            .set("k", "v".to_string(), Duration::from_millis(10))
            .await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_entry() {
        let cache = MemoryCache::new();
        cache
            .set("k", "old".to_string(), Duration::from_secs(60))
            .await;
        cache
            .set("k", "new".to_string(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get("k").await.as_deref(), Some("new"));
    }
}
