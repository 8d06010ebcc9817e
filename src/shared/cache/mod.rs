mod cache_config;
mod cache_key;
mod cache_store;
mod memory_store;
mod redis_store;
mod result_cache;

pub use cache_config::{CacheBackend, CacheConfig};
pub use cache_key::{CacheKey, CacheKeyBuilder, CacheNamespace};
pub use cache_store::{CacheError, CacheStore};
pub use memory_store::InMemoryCacheStore;
pub use redis_store::RedisCacheStore;
pub use result_cache::ResultCache;
