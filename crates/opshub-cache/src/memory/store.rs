//! In-memory cache implementation using the moka crate.
//!
//! Used by tests and single-node development deployments; the Redis
//! provider is the production backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use opshub_core::config::cache::MemoryCacheConfig;
use opshub_core::result::AppResult;
use opshub_core::traits::cache::CacheProvider;

/// A cached value together with its requested lifetime.
type Entry = (String, Duration);

/// Per-entry TTL policy: each entry expires after the duration it was
/// inserted with.
struct PerEntryTtl;

impl moka::Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

/// In-memory cache provider using moka.
#[derive(Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Create a provider with defaults, for tests.
    pub fn for_tests() -> Self {
        Self::new(&MemoryCacheConfig::default(), 300)
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.0))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(key.to_string(), (value.to_string(), ttl))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn get_del(&self, key: &str) -> AppResult<Option<String>> {
        // moka's remove returns the evicted value atomically, which is
        // what makes rotation single-use on this backend too.
        Ok(self.cache.remove(key).await.map(|entry| entry.0))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // get-then-insert is not perfectly atomic, acceptable for the
        // single-node development backend.
        if self.cache.contains_key(key) {
            return Ok(false);
        }
        self.cache
            .insert(key.to_string(), (value.to_string(), ttl))
            .await;
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        MemoryCacheProvider::for_tests()
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_get_del_returns_value_once() {
        let provider = make_provider();
        provider
            .set("token", "subject", Duration::from_secs(60))
            .await
            .unwrap();

        let first = provider.get_del("token").await.unwrap();
        assert_eq!(first, Some("subject".to_string()));

        let second = provider.get_del("token").await.unwrap();
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn test_set_nx() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let provider = make_provider();
        provider
            .set("ephemeral", "v", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(provider.get("ephemeral").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
