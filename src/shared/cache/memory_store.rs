use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::cache_store::{CacheError, CacheStore};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local store with per-entry expiry.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|k, _| !k.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expired_entries_read_as_missing() {
        let store = InMemoryCacheStore::new();
        store
            .set("k", "v".to_string(), Duration::from_millis(20))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn delete_prefix_leaves_other_keys() {
        let store = InMemoryCacheStore::new();
        let ttl = Duration::from_secs(60);
        store.set("p:listing_queries:a", "1".into(), ttl).await.unwrap();
        store.set("p:listing_queries:b", "2".into(), ttl).await.unwrap();
        store.set("p:autocomplete:a", "3".into(), ttl).await.unwrap();

        let removed = store.delete_prefix("p:listing_queries:").await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.get("p:autocomplete:a").await.unwrap(), Some("3".into()));
        assert_eq!(store.get("p:listing_queries:a").await.unwrap(), None);
    }
}
