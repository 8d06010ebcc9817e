use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub key_prefix: String,
    pub listing_ttl: Duration,
    pub autocomplete_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            key_prefix: "bizdir".to_string(),
            listing_ttl: Duration::from_secs(5 * 60),
            autocomplete_ttl: Duration::from_secs(10 * 60),
        }
    }
}

impl CacheConfig {
    fn parse_secs(key: &str, default: u64) -> Duration {
        let secs = env::var(key)
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .unwrap_or_else(|_| panic!("Invalid {} value", key))
            })
            .unwrap_or(default);

        if secs == 0 {
            panic!("{} must be greater than zero", key);
        }

        Duration::from_secs(secs)
    }

    /// Load cache configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = match env::var("CACHE_BACKEND").as_deref() {
            Ok("memory") => CacheBackend::Memory,
            Ok("redis") | Err(_) => CacheBackend::Redis,
            Ok(other) => panic!("CACHE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        };

        let key_prefix = env::var("CACHE_KEY_PREFIX")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.key_prefix);

        Self {
            backend,
            key_prefix,
            listing_ttl: Self::parse_secs("CACHE_LISTING_TTL_SECS", 300),
            autocomplete_ttl: Self::parse_secs("CACHE_AUTOCOMPLETE_TTL_SECS", 600),
        }
    }
}
