mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use redis_store::RedisCacheStore;

/// Site settings and block instance configuration change rarely.
pub const CONFIG_CACHE_TTL: Duration = Duration::from_secs(300);
/// Leaderboards tolerate a short staleness window.
pub const RANKING_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled,
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let CacheBackend::Redis(store) = &self.backend else {
            return Ok(None);
        };

        match store.get(key).await? {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let CacheBackend::Redis(store) = &self.backend else {
            return Ok(());
        };

        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;
        store.set(key, payload, ttl.as_secs().max(1)).await
    }

    pub async fn del(&self, keys: &[String]) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.del(keys).await,
        }
    }

    /// Serve `key` from the cache, or run `loader` and store its result.
    ///
    /// Cache failures are logged and never fail the caller.
    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(?e, cache_key = key, "cache get failed; loading from database"),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(?e, cache_key = key, "cache set failed; returning database value");
        }

        Ok(loaded)
    }
}

pub fn settings_key(cache: &CacheService) -> String {
    cache.key("settings")
}

pub fn block_config_key(cache: &CacheService, course_id: u64) -> String {
    cache.key(format!("block_config:course:{course_id}"))
}

pub fn ranking_key(cache: &CacheService, scope: &str, limit: u32) -> String {
    cache.key(format!("ranking:{scope}:{limit}"))
}

pub async fn invalidate_settings(cache: &CacheService) -> anyhow::Result<()> {
    cache.del(&[settings_key(cache)]).await
}

pub async fn invalidate_block_config(cache: &CacheService, course_id: u64) -> anyhow::Result<()> {
    cache.del(&[block_config_key(cache, course_id)]).await
}

#[cfg(test)]
mod tests {
    use super::{CacheService, block_config_key, ranking_key, settings_key};

    #[test]
    fn keys_carry_the_prefix() {
        let cache = CacheService::disabled("ludifica:test");
        assert_eq!(settings_key(&cache), "ludifica:test:settings");
        assert_eq!(
            block_config_key(&cache, 7),
            "ludifica:test:block_config:course:7"
        );
        assert_eq!(ranking_key(&cache, "site", 10), "ludifica:test:ranking:site:10");
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = CacheService::disabled("ludifica:test");
        assert!(!cache.is_redis_enabled());

        let value: u64 = cache
            .get_or_load_json("k", super::CONFIG_CACHE_TTL, || async { Ok(5) })
            .await
            .expect("loader result");
        assert_eq!(value, 5);
        assert!(cache.get_json::<u64>("k").await.expect("get").is_none());
    }
}
