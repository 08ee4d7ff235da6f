//! Simulated on-chain transactions shown by the blockchain explorer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum ChainTxStatus {
        Success => "Success",
        Failed => "Failed",
    }
}

/// Event emitted by the supply-chain contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub event: String,
    pub args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTransaction {
    pub id: i64,
    pub hash: String,
    pub batch_id: String,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub value: Decimal,
    pub gas_used: u64,
    /// Gas price in gwei
    pub gas_price: u64,
    pub status: ChainTxStatus,
    pub function: String,
    pub event_logs: Vec<EventLog>,
}

impl ChainTransaction {
    /// Transaction fee in gwei
    pub fn fee_gwei(&self) -> u64 {
        self.gas_used.saturating_mul(self.gas_price)
    }
}

impl ViewRecord for ChainTransaction {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "hash" => self.hash.as_str().into(),
            "batchId" => self.batch_id.as_str().into(),
            "blockNumber" => self.block_number.into(),
            "timestamp" => self.timestamp.to_rfc3339().into(),
            "from" => self.from.as_str().into(),
            "to" => self.to.as_str().into(),
            "value" => self.value.into(),
            "gasUsed" => self.gas_used.into(),
            "gasPrice" => self.gas_price.into(),
            "status" => self.status.as_str().into(),
            "function" => self.function.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
