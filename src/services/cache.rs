use crate::services::repository::ProfileSnapshot;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const SNAPSHOT_KEY: &str = "profiles:all";

/// Time-bounded cache for the profile snapshot fetched from the store
///
/// Concurrent misses share one fetch; a failed fetch is not cached.
#[derive(Clone)]
pub struct SnapshotCache {
    cache: moka::future::Cache<String, ProfileSnapshot>,
    ttl_secs: u64,
}

impl SnapshotCache {
    pub fn new(ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Cached snapshot, if one is still live
    pub async fn get(&self) -> Option<ProfileSnapshot> {
        self.cache.get(SNAPSHOT_KEY).await
    }

    /// Return the cached snapshot or run `fetch` to populate it
    pub async fn get_or_fetch<F, E>(&self, fetch: F) -> Result<ProfileSnapshot, Arc<E>>
    where
        F: Future<Output = Result<ProfileSnapshot, E>>,
        E: Send + Sync + 'static,
    {
        if let Some(snapshot) = self.cache.get(SNAPSHOT_KEY).await {
            tracing::trace!("Snapshot cache hit");
            return Ok(snapshot);
        }

        tracing::trace!("Snapshot cache miss");
        self.cache.try_get_with(SNAPSHOT_KEY.to_string(), fetch).await
    }

    /// Drop the cached snapshot so the next read refetches
    pub async fn invalidate(&self) {
        self.cache.invalidate(SNAPSHOT_KEY).await;
        tracing::debug!("Invalidated profile snapshot cache");
    }
}
