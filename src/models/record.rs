//! Field-level access to dashboard records.
//!
//! The view pipeline never looks at concrete record types. It asks each
//! record for a named field through [`ViewRecord`] and compares the returned
//! [`FieldValue`]. Field names follow the camelCase names the dashboard
//! tables use (`batchId`, `walletId`, ...).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::anomaly::Anomaly;
use crate::models::batch::Batch;
use crate::models::chain::ChainTransaction;
use crate::models::report::{AnomalyReportRow, PricingReportRow, TransactionReportRow};
use crate::models::role::Participant;
use crate::models::supply_chain::BatchTrace;
use crate::models::transaction::Transaction;

/// Scalar value of a single record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n.normalize()),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A record the view pipeline can search, filter and aggregate.
pub trait ViewRecord {
    /// Returns the value of `name`, or `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Identifier of a record within its collection.
///
/// Ledger-style records use string ids (`tx_001`, `BATCH_2024_001`); the
/// participant and anomaly tables use integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

labelled_enum! {
    /// Collections served by the data provider
    pub enum EntityKind {
        Transactions => "transactions",
        Batches => "batches",
        Roles => "roles",
        Anomalies => "anomalies",
        ChainTransactions => "chain_transactions",
        BatchTraces => "batch_traces",
        TransactionReports => "transaction_reports",
        PricingReports => "pricing_reports",
        AnomalyReports => "anomaly_reports",
    }
}

/// Any record the provider can hand out, tagged by collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum EntityRecord {
    Transaction(Transaction),
    Batch(Batch),
    Participant(Participant),
    Anomaly(Anomaly),
    ChainTransaction(ChainTransaction),
    BatchTrace(BatchTrace),
    TransactionReport(TransactionReportRow),
    PricingReport(PricingReportRow),
    AnomalyReport(AnomalyReportRow),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Transaction(_) => EntityKind::Transactions,
            EntityRecord::Batch(_) => EntityKind::Batches,
            EntityRecord::Participant(_) => EntityKind::Roles,
            EntityRecord::Anomaly(_) => EntityKind::Anomalies,
            EntityRecord::ChainTransaction(_) => EntityKind::ChainTransactions,
            EntityRecord::BatchTrace(_) => EntityKind::BatchTraces,
            EntityRecord::TransactionReport(_) => EntityKind::TransactionReports,
            EntityRecord::PricingReport(_) => EntityKind::PricingReports,
            EntityRecord::AnomalyReport(_) => EntityKind::AnomalyReports,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            EntityRecord::Transaction(r) => r.id(),
            EntityRecord::Batch(r) => r.id(),
            EntityRecord::Participant(r) => r.id(),
            EntityRecord::Anomaly(r) => r.id(),
            EntityRecord::ChainTransaction(r) => r.id(),
            EntityRecord::BatchTrace(r) => r.id(),
            EntityRecord::TransactionReport(r) => r.id(),
            EntityRecord::PricingReport(r) => r.id(),
            EntityRecord::AnomalyReport(r) => r.id(),
        }
    }
}

impl ViewRecord for EntityRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            EntityRecord::Transaction(r) => r.field(name),
            EntityRecord::Batch(r) => r.field(name),
            EntityRecord::Participant(r) => r.field(name),
            EntityRecord::Anomaly(r) => r.field(name),
            EntityRecord::ChainTransaction(r) => r.field(name),
            EntityRecord::BatchTrace(r) => r.field(name),
            EntityRecord::TransactionReport(r) => r.field(name),
            EntityRecord::PricingReport(r) => r.field(name),
            EntityRecord::AnomalyReport(r) => r.field(name),
        }
    }
}

/// A concrete record type stored in exactly one collection.
pub trait Entity: ViewRecord + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;

    fn from_record(record: EntityRecord) -> Option<Self>;

    fn into_record(self) -> EntityRecord;
}

macro_rules! impl_entity {
    ($ty:ty, $kind:ident, $variant:ident, $id:ident) => {
        impl Entity for $ty {
            const KIND: EntityKind = EntityKind::$kind;

            fn id(&self) -> RecordId {
                RecordId::from(self.$id.clone())
            }

            fn from_record(record: EntityRecord) -> Option<Self> {
                match record {
                    EntityRecord::$variant(r) => Some(r),
                    _ => None,
                }
            }

            fn into_record(self) -> EntityRecord {
                EntityRecord::$variant(self)
            }
        }
    };
}

impl_entity!(Transaction, Transactions, Transaction, id);
impl_entity!(Batch, Batches, Batch, id);
impl_entity!(Participant, Roles, Participant, id);
impl_entity!(Anomaly, Anomalies, Anomaly, id);
impl_entity!(ChainTransaction, ChainTransactions, ChainTransaction, id);
impl_entity!(BatchTrace, BatchTraces, BatchTrace, id);
impl_entity!(TransactionReportRow, TransactionReports, TransactionReport, id);
impl_entity!(PricingReportRow, PricingReports, PricingReport, batch_id);
impl_entity!(AnomalyReportRow, AnomalyReports, AnomalyReport, id);
