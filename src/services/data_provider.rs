//! Data Provider
//!
//! Async access to the dashboard collections. [`MockDataProvider`] serves
//! the owned [`MockStore`] with simulated network latency; it can be taken
//! offline so callers exercise their failure handling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ProviderError;
use crate::models::analytics::AnalyticsSnapshot;
use crate::models::record::{Entity, EntityKind, EntityRecord, RecordId};
use crate::models::role::RoleStatus;
use crate::services::mock_store::MockStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationAck {
    pub success: bool,
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Whole collection, in display order
    async fn list(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, ProviderError>;

    async fn get_by_id(&self, kind: EntityKind, id: &RecordId) -> Result<Option<EntityRecord>, ProviderError>;

    /// Set the status of a record. Only role records are writable.
    async fn mutate_status(
        &self,
        kind: EntityKind,
        id: &RecordId,
        new_status: &str,
    ) -> Result<MutationAck, ProviderError>;

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ProviderError>;
}

/// Fetch a collection as its concrete record type.
pub async fn fetch_all<T: Entity>(provider: &dyn DataProvider) -> Result<Vec<T>, ProviderError> {
    let records = provider.list(T::KIND).await?;
    Ok(records.into_iter().filter_map(T::from_record).collect())
}

pub async fn fetch_one<T: Entity>(provider: &dyn DataProvider, id: &RecordId) -> Result<Option<T>, ProviderError> {
    let record = provider.get_by_id(T::KIND, id).await?;
    Ok(record.and_then(T::from_record))
}

/// Simulated round-trip times, mirroring the demo backend
#[derive(Debug, Clone)]
pub struct LatencyProfile {
    enabled: bool,
}

impl LatencyProfile {
    pub fn simulated() -> Self {
        Self { enabled: true }
    }

    pub fn instant() -> Self {
        Self { enabled: false }
    }

    pub fn for_kind(&self, kind: EntityKind) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let millis = match kind {
            EntityKind::Transactions | EntityKind::ChainTransactions => 500,
            EntityKind::Anomalies => 200,
            EntityKind::TransactionReports | EntityKind::PricingReports | EntityKind::AnomalyReports => 400,
            EntityKind::Batches | EntityKind::Roles | EntityKind::BatchTraces => 300,
        };
        Duration::from_millis(millis)
    }

    pub fn analytics(&self) -> Duration {
        if self.enabled { Duration::from_millis(400) } else { Duration::ZERO }
    }

    pub fn mutation(&self) -> Duration {
        if self.enabled { Duration::from_millis(500) } else { Duration::ZERO }
    }
}

#[derive(Clone)]
pub struct MockDataProvider {
    store: Arc<MockStore>,
    latency: LatencyProfile,
    offline: Arc<AtomicBool>,
}

impl MockDataProvider {
    pub fn new(store: Arc<MockStore>, latency: LatencyProfile) -> Self {
        Self {
            store,
            latency,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }

    /// While offline every call fails with [`ProviderError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        info!(offline, "Mock provider availability changed");
        self.offline.store(offline, Ordering::SeqCst);
    }

    async fn round_trip(&self, delay: Duration) -> Result<(), ProviderError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            warn!("Mock provider is offline");
            return Err(ProviderError::Unavailable("mock backend is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn list(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, ProviderError> {
        self.round_trip(self.latency.for_kind(kind)).await?;
        let records = self.store.snapshot(kind);
        debug!(kind = %kind, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn get_by_id(&self, kind: EntityKind, id: &RecordId) -> Result<Option<EntityRecord>, ProviderError> {
        self.round_trip(self.latency.for_kind(kind)).await?;
        Ok(self.store.find(kind, id))
    }

    async fn mutate_status(
        &self,
        kind: EntityKind,
        id: &RecordId,
        new_status: &str,
    ) -> Result<MutationAck, ProviderError> {
        self.round_trip(self.latency.mutation()).await?;

        if kind != EntityKind::Roles {
            return Err(ProviderError::ReadOnly(kind));
        }

        let target: RoleStatus = new_status
            .parse()
            .map_err(|_| ProviderError::InvalidStatus(new_status.to_string()))?;

        let success = match id {
            RecordId::Number(id) => self.store.transition_role(*id, target).is_applied(),
            RecordId::Text(_) => false,
        };

        debug!(id = %id, status = new_status, success, "Status mutation processed");
        Ok(MutationAck { success })
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ProviderError> {
        self.round_trip(self.latency.analytics()).await?;
        Ok(self.store.analytics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::Batch;
    use crate::models::role::Participant;

    fn provider() -> MockDataProvider {
        MockDataProvider::new(Arc::new(MockStore::seeded()), LatencyProfile::instant())
    }

    #[tokio::test]
    async fn test_fetch_all_typed() {
        let provider = provider();
        let batches: Vec<Batch> = fetch_all(&provider).await.unwrap();
        assert_eq!(batches.len(), 6);
        assert_eq!(batches[0].id, "BATCH_2024_001");
    }

    #[tokio::test]
    async fn test_fetch_one_miss_is_none() {
        let provider = provider();
        let missing: Option<Participant> = fetch_one(&provider, &RecordId::Number(77)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_offline_provider_fails() {
        let provider = provider();
        provider.set_offline(true);
        let err = provider.list(EntityKind::Batches).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));

        provider.set_offline(false);
        assert!(provider.list(EntityKind::Batches).await.is_ok());
    }

    #[tokio::test]
    async fn test_mutation_only_on_roles() {
        let provider = provider();
        let err = provider
            .mutate_status(EntityKind::Batches, &RecordId::from("BATCH_2024_001"), "Sold")
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::ReadOnly(EntityKind::Batches));
    }

    #[tokio::test]
    async fn test_mutation_rejects_unknown_status() {
        let provider = provider();
        let err = provider
            .mutate_status(EntityKind::Roles, &RecordId::Number(3), "Suspended")
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::InvalidStatus("Suspended".to_string()));
    }

    #[tokio::test]
    async fn test_mutation_acknowledges_transition() {
        let provider = provider();
        let ack = provider
            .mutate_status(EntityKind::Roles, &RecordId::Number(3), "Approved")
            .await
            .unwrap();
        assert!(ack.success);

        let ack = provider
            .mutate_status(EntityKind::Roles, &RecordId::Number(3), "Approved")
            .await
            .unwrap();
        assert!(!ack.success);
    }
}
