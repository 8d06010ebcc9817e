use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::cache_key::{CacheKey, CacheNamespace};
use super::cache_store::CacheStore;

/// Memoizes query results per [`CacheKey`].
///
/// The store is advisory: read failures and undecodable entries count as a
/// miss, write and sweep failures are logged and dropped. Only `compute`
/// can fail a `fetch`.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    key_prefix: String,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    pub async fn fetch<T, E, F, Fut>(&self, key: &CacheKey, ttl: Duration, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let storage_key = key.storage_key(&self.key_prefix);

        match self.store.get(&storage_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(key = %storage_key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(key = %storage_key, error = %e, "discarding undecodable cache entry");
                }
            },
            Ok(None) => tracing::debug!(key = %storage_key, "cache miss"),
            Err(e) => {
                tracing::warn!(key = %storage_key, error = %e, "cache read failed");
            }
        }

        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&storage_key, raw, ttl).await {
                    tracing::warn!(key = %storage_key, error = %e, "cache write failed");
                }
            }
            Err(e) => {
                tracing::warn!(key = %storage_key, error = %e, "cache value not serializable");
            }
        }

        Ok(value)
    }

    /// Sweeps every entry under each namespace. Never fails the caller.
    pub async fn invalidate(&self, namespaces: &[CacheNamespace]) {
        for namespace in namespaces {
            let prefix = namespace.storage_prefix(&self.key_prefix);
            match self.store.delete_prefix(&prefix).await {
                Ok(removed) => {
                    tracing::debug!(namespace = namespace.as_str(), removed, "cache namespace swept");
                }
                Err(e) => {
                    tracing::warn!(namespace = namespace.as_str(), error = %e, "cache invalidation failed");
                }
            }
        }
    }
}
