use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum TransactionType {
        Harvest => "Harvest",
        Process => "Process",
        Transport => "Transport",
        Deliver => "Deliver",
        Sale => "Sale",
        Transfer => "Transfer",
    }
}

labelled_enum! {
    pub enum TransactionStatus {
        Completed => "Completed",
        InTransit => "In Transit",
        Pending => "Pending",
        Failed => "Failed",
    }
}

/// Supply-chain hand-off between two participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub batch_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub from: String,
    pub to: String,
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub hash: String,
}

impl ViewRecord for Transaction {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.as_str().into(),
            "batchId" => self.batch_id.as_str().into(),
            "type" => self.tx_type.as_str().into(),
            "from" => self.from.as_str().into(),
            "to" => self.to.as_str().into(),
            "timestamp" => self.timestamp.to_rfc3339().into(),
            "amount" => self.amount.into(),
            "status" => self.status.as_str().into(),
            "hash" => self.hash.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
