//! Headline dashboard numbers derived from batches and transactions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::models::analytics::AnalyticsSnapshot;
use crate::models::batch::{Batch, BatchStatus};
use crate::models::transaction::Transaction;
use crate::models::view::ViewQuery;
use crate::services::data_provider::{DataProvider, fetch_all};
use crate::services::view_pipeline::filter;

pub const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_batches: usize,
    /// Batches currently in transit
    pub active_batches: usize,
    pub completed_batches: usize,
    pub total_value: Decimal,
}

impl DashboardStats {
    pub fn from_batches(batches: &[Batch]) -> DashboardResult<Self> {
        let view = filter(batches, &ViewQuery::default());
        Ok(Self {
            total_batches: view.count(),
            active_batches: view.count_where(|b| b.status == BatchStatus::InTransit),
            completed_batches: view.count_where(|b| b.status == BatchStatus::Delivered),
            total_value: view.sum("value")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_transactions: Vec<Transaction>,
    /// Batch count per status, in order of first appearance
    pub batch_status: Vec<(String, usize)>,
    pub analytics: AnalyticsSnapshot,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn build(
        batches: &[Batch],
        transactions: &[Transaction],
        analytics: AnalyticsSnapshot,
    ) -> DashboardResult<Self> {
        Ok(Self {
            stats: DashboardStats::from_batches(batches)?,
            recent_transactions: transactions.iter().take(RECENT_TRANSACTIONS).cloned().collect(),
            batch_status: filter(batches, &ViewQuery::default()).count_by_distinct_value("status"),
            analytics,
            generated_at: Utc::now(),
        })
    }
}

/// Fetch everything the dashboard page shows and derive its numbers.
pub async fn load_snapshot(provider: &dyn DataProvider) -> DashboardResult<DashboardSnapshot> {
    let (transactions, batches, analytics) = tokio::try_join!(
        fetch_all::<Transaction>(provider),
        fetch_all::<Batch>(provider),
        provider.analytics(),
    )
    .map_err(DashboardError::from)?;

    let snapshot = DashboardSnapshot::build(&batches, &transactions, analytics)?;
    debug!(
        batches = snapshot.stats.total_batches,
        transactions = snapshot.recent_transactions.len(),
        "Dashboard snapshot built"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_provider::{LatencyProfile, MockDataProvider};
    use crate::services::mock_store::MockStore;
    use crate::services::seed;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn batch(id: &str, status: BatchStatus, value: Decimal) -> Batch {
        Batch {
            id: id.to_string(),
            status,
            crop: "Wheat".to_string(),
            quantity: 100,
            farmer: "John Smith".to_string(),
            value,
        }
    }

    #[test]
    fn test_stats_from_batches() {
        let batches = vec![
            batch("B1", BatchStatus::InTransit, dec!(100.50)),
            batch("B2", BatchStatus::Delivered, dec!(200)),
            batch("B3", BatchStatus::Sold, dec!(50)),
        ];
        let stats = DashboardStats::from_batches(&batches).unwrap();
        assert_eq!(stats.total_batches, 3);
        assert_eq!(stats.active_batches, 1);
        assert_eq!(stats.completed_batches, 1);
        assert_eq!(stats.total_value, dec!(350.50));
    }

    #[test]
    fn test_recent_transactions_capped() {
        let now = Utc::now();
        let transactions: Vec<Transaction> = (0..4).flat_map(|_| seed::transactions(now)).collect();
        let snapshot = DashboardSnapshot::build(&seed::batches(), &transactions, seed::analytics()).unwrap();
        assert_eq!(snapshot.recent_transactions.len(), RECENT_TRANSACTIONS);
        assert_eq!(snapshot.recent_transactions[0], transactions[0]);
    }

    #[tokio::test]
    async fn test_load_snapshot_fails_when_offline() {
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant());
        assert!(load_snapshot(&provider).await.is_ok());

        provider.set_offline(true);
        let err = load_snapshot(&provider).await.unwrap_err();
        assert!(matches!(err, DashboardError::Provider(_)));
    }
}
