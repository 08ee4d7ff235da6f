//! Mock Store
//!
//! Owns every demo collection. One store is built per process (or per test)
//! and shared behind an `Arc`; there is no global state. Collections keep
//! insertion order, and role status transitions are the only writes.

use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use crate::models::analytics::AnalyticsSnapshot;
use crate::models::anomaly::Anomaly;
use crate::models::batch::Batch;
use crate::models::chain::ChainTransaction;
use crate::models::record::{Entity, EntityKind, EntityRecord, RecordId};
use crate::models::report::{AnomalyReportRow, PricingReportRow, TransactionReportRow};
use crate::models::role::{Participant, RoleStatus};
use crate::models::supply_chain::BatchTrace;
use crate::models::transaction::Transaction;
use crate::services::role_workflow::{self, TransitionOutcome};
use crate::services::seed;

pub struct MockStore {
    transactions: RwLock<Vec<Transaction>>,
    batches: RwLock<Vec<Batch>>,
    participants: RwLock<Vec<Participant>>,
    anomalies: RwLock<Vec<Anomaly>>,
    chain_transactions: RwLock<Vec<ChainTransaction>>,
    batch_traces: RwLock<Vec<BatchTrace>>,
    transaction_reports: RwLock<Vec<TransactionReportRow>>,
    pricing_reports: RwLock<Vec<PricingReportRow>>,
    anomaly_reports: RwLock<Vec<AnomalyReportRow>>,
    analytics: RwLock<AnalyticsSnapshot>,
}

fn records<T: Entity>(collection: &RwLock<Vec<T>>) -> Vec<EntityRecord> {
    collection.read().iter().cloned().map(Entity::into_record).collect()
}

fn find<T: Entity>(collection: &RwLock<Vec<T>>, id: &RecordId) -> Option<EntityRecord> {
    collection
        .read()
        .iter()
        .find(|record| &record.id() == id)
        .cloned()
        .map(Entity::into_record)
}

impl MockStore {
    /// Store holding the demo data set.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let store = Self {
            transactions: RwLock::new(seed::transactions(now)),
            batches: RwLock::new(seed::batches()),
            participants: RwLock::new(seed::participants()),
            anomalies: RwLock::new(seed::anomalies(now)),
            chain_transactions: RwLock::new(seed::chain_transactions()),
            batch_traces: RwLock::new(seed::batch_traces()),
            transaction_reports: RwLock::new(seed::transaction_reports()),
            pricing_reports: RwLock::new(seed::pricing_reports()),
            anomaly_reports: RwLock::new(seed::anomaly_reports()),
            analytics: RwLock::new(seed::analytics()),
        };
        info!(
            batches = store.batches.read().len(),
            participants = store.participants.read().len(),
            "Mock store seeded"
        );
        store
    }

    /// Replace the participant collection (tests and custom demos).
    pub fn with_participants(self, participants: Vec<Participant>) -> Self {
        *self.participants.write() = participants;
        self
    }

    /// Copy of a whole collection, in insertion order.
    pub fn snapshot(&self, kind: EntityKind) -> Vec<EntityRecord> {
        match kind {
            EntityKind::Transactions => records(&self.transactions),
            EntityKind::Batches => records(&self.batches),
            EntityKind::Roles => records(&self.participants),
            EntityKind::Anomalies => records(&self.anomalies),
            EntityKind::ChainTransactions => records(&self.chain_transactions),
            EntityKind::BatchTraces => records(&self.batch_traces),
            EntityKind::TransactionReports => records(&self.transaction_reports),
            EntityKind::PricingReports => records(&self.pricing_reports),
            EntityKind::AnomalyReports => records(&self.anomaly_reports),
        }
    }

    pub fn find(&self, kind: EntityKind, id: &RecordId) -> Option<EntityRecord> {
        match kind {
            EntityKind::Transactions => find(&self.transactions, id),
            EntityKind::Batches => find(&self.batches, id),
            EntityKind::Roles => find(&self.participants, id),
            EntityKind::Anomalies => find(&self.anomalies, id),
            EntityKind::ChainTransactions => find(&self.chain_transactions, id),
            EntityKind::BatchTraces => find(&self.batch_traces, id),
            EntityKind::TransactionReports => find(&self.transaction_reports, id),
            EntityKind::PricingReports => find(&self.pricing_reports, id),
            EntityKind::AnomalyReports => find(&self.anomaly_reports, id),
        }
    }

    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.analytics.read().clone()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.read().clone()
    }

    /// Apply a role transition under the write lock.
    pub fn transition_role(&self, id: i64, target: RoleStatus) -> TransitionOutcome {
        let mut participants = self.participants.write();
        role_workflow::transition(&mut participants, id, target)
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}
