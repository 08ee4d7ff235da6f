//! Last-known collections, so a failed fetch can keep the previous view up.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::record::{Entity, EntityKind, EntityRecord};
use crate::services::data_provider::DataProvider;

/// Records returned by [`SnapshotCache::fetch`]. `degraded` is set when the
/// provider failed and the records come from an earlier successful fetch.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub degraded: Option<ProviderError>,
}

#[derive(Clone)]
pub struct SnapshotCache {
    cache: Arc<Cache<EntityKind, Arc<Vec<EntityRecord>>>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(EntityKind::ALL.len() as u64)
            .time_to_live(ttl)
            .build();

        Self {
            cache: Arc::new(cache),
        }
    }

    /// Fetch `T`'s collection, falling back to the last good copy on failure.
    ///
    /// Errors only when the provider fails and nothing was cached yet.
    pub async fn fetch<T: Entity>(&self, provider: &dyn DataProvider) -> Result<Fetched<T>, ProviderError> {
        match provider.list(T::KIND).await {
            Ok(records) => {
                let typed = typed::<T>(&records);
                debug!(kind = %T::KIND, count = typed.len(), "Snapshot refreshed");
                self.cache.insert(T::KIND, Arc::new(records)).await;
                Ok(Fetched {
                    records: typed,
                    degraded: None,
                })
            }
            Err(e) => match self.cache.get(&T::KIND).await {
                Some(cached) => {
                    warn!(kind = %T::KIND, error = %e, "Fetch failed, serving last known records");
                    Ok(Fetched {
                        records: typed::<T>(&cached),
                        degraded: Some(e),
                    })
                }
                None => {
                    warn!(kind = %T::KIND, error = %e, "Fetch failed with no cached records");
                    Err(e)
                }
            },
        }
    }
}

fn typed<T: Entity>(records: &[EntityRecord]) -> Vec<T> {
    records.iter().cloned().filter_map(T::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::Batch;
    use crate::services::data_provider::{LatencyProfile, MockDataProvider};
    use crate::services::mock_store::MockStore;

    #[tokio::test]
    async fn test_falls_back_to_last_known() {
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant());
        let cache = SnapshotCache::new(Duration::from_secs(60));

        let first: Fetched<Batch> = cache.fetch(&provider).await.unwrap();
        assert!(first.degraded.is_none());

        provider.set_offline(true);
        let second: Fetched<Batch> = cache.fetch(&provider).await.unwrap();
        assert_eq!(second.records, first.records);
        assert!(matches!(second.degraded, Some(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_cold_failure_is_an_error() {
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant());
        let cache = SnapshotCache::new(Duration::from_secs(60));
        provider.set_offline(true);

        let result = cache.fetch::<Batch>(&provider).await;
        assert!(result.is_err());
    }
}
