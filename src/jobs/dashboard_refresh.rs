use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

use crate::error::DashboardResult;
use crate::services::dashboard::{DashboardSnapshot, load_snapshot};
use crate::services::data_provider::DataProvider;

/// Latest dashboard snapshot published by the refresh job
pub type SharedSnapshot = Arc<RwLock<Option<DashboardSnapshot>>>;

pub async fn start_dashboard_refresh_job(
    provider: Arc<dyn DataProvider>,
    latest: SharedSnapshot,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval(every);

        loop {
            // first tick completes immediately
            interval.tick().await;
            tracing::debug!("Refreshing dashboard snapshot");

            if let Err(e) = refresh_dashboard(provider.as_ref(), &latest).await {
                tracing::warn!("Dashboard refresh failed, keeping previous snapshot: {}", e);
            }
        }
    })
}

async fn refresh_dashboard(provider: &dyn DataProvider, latest: &SharedSnapshot) -> DashboardResult<()> {
    let snapshot = load_snapshot(provider).await?;

    tracing::info!(
        "Dashboard refreshed: {} batches, total value {}",
        snapshot.stats.total_batches,
        snapshot.stats.total_value
    );

    *latest.write().await = Some(snapshot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_provider::{LatencyProfile, MockDataProvider};
    use crate::services::mock_store::MockStore;

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant());
        let latest: SharedSnapshot = Arc::new(RwLock::new(None));

        refresh_dashboard(&provider, &latest).await.unwrap();
        let first = latest.read().await.clone().unwrap();

        provider.set_offline(true);
        assert!(refresh_dashboard(&provider, &latest).await.is_err());
        assert_eq!(latest.read().await.as_ref(), Some(&first));
    }

    #[tokio::test]
    async fn test_job_publishes_snapshot() {
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant());
        let latest: SharedSnapshot = Arc::new(RwLock::new(None));

        let handle = start_dashboard_refresh_job(Arc::new(provider), latest.clone(), Duration::from_secs(3600)).await;
        for _ in 0..50 {
            if latest.read().await.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert_eq!(latest.read().await.as_ref().unwrap().stats.total_batches, 6);
    }
}
