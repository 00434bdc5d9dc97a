//! Read-through toggle cache.
//!
//! Entries expire a fixed time after they were written, regardless of how
//! often they are read. Unknown keys are cached as absent so repeated
//! lookups of a missing toggle do not reach the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use feature_toggles_sdk::models::ToggleRecord;
use moka::future::Cache;
use tracing::debug;

use super::repo::StoreError;

#[derive(Clone)]
struct CachedToggle {
    /// Key generation observed before the load that produced this entry.
    generation: u64,
    record: Option<Arc<ToggleRecord>>,
}

/// Process-local toggle cache keyed by feature key.
///
/// Every [`invalidate`](Self::invalidate) bumps a per-key generation. An
/// entry is only served while its generation is current, so a load that
/// started before an invalidation can never outlive it as the cached value.
#[derive(Clone)]
pub struct ToggleCache {
    entries: Cache<String, CachedToggle>,
    /// Never pruned; holds at most one counter per toggle ever updated.
    generations: Arc<DashMap<String, u64>>,
}

impl ToggleCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        debug!(
            max_entries,
            ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            "Toggle cache created"
        );

        Self {
            entries,
            generations: Arc::new(DashMap::new()),
        }
    }

    /// Return the cached toggle for `feature_key`, loading it on a miss.
    ///
    /// The load runs on its own task: if the caller is dropped mid-flight
    /// the load still completes and populates the cache.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged; failures are never cached.
    pub async fn get<F, Fut>(
        &self,
        feature_key: &str,
        loader: F,
    ) -> Result<Option<Arc<ToggleRecord>>, StoreError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Option<ToggleRecord>, StoreError>> + Send + 'static,
    {
        let generation = current_generation(&self.generations, feature_key);

        if let Some(cached) = self.entries.get(feature_key).await
            && cached.generation == generation
        {
            debug!(feature_key, "Toggle cache hit");
            return Ok(cached.record);
        }
        debug!(feature_key, "Toggle cache miss");

        let key = feature_key.to_owned();
        let load = loader(key.clone());
        let entries = self.entries.clone();
        let generations = Arc::clone(&self.generations);

        let task = tokio::spawn(async move {
            let record = load.await?.map(Arc::new);
            if current_generation(&generations, &key) == generation {
                entries
                    .insert(
                        key,
                        CachedToggle {
                            generation,
                            record: record.clone(),
                        },
                    )
                    .await;
            } else {
                debug!(feature_key = %key, "Toggle invalidated during load, result not cached");
            }
            Ok::<_, StoreError>(record)
        });

        task.await
            .map_err(|e| StoreError::unavailable(anyhow::anyhow!("toggle load task failed: {e}")))?
    }

    /// Drop any cached entry for `feature_key`. No-op for unknown keys.
    pub async fn invalidate(&self, feature_key: &str) {
        *self
            .generations
            .entry(feature_key.to_owned())
            .or_insert(0) += 1;
        self.entries.invalidate(feature_key).await;
        debug!(feature_key, "Toggle cache entry invalidated");
    }

    #[cfg(test)]
    pub(crate) async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

fn current_generation(generations: &DashMap<String, u64>, feature_key: &str) -> u64 {
    generations.get(feature_key).map_or(0, |generation| *generation)
}
