//! Batch traces: the step-by-step journey of a batch from farm to consumer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::anomaly::{AnomalyType, Severity};
use crate::models::batch::BatchStatus;
use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum StepStatus {
        Completed => "completed",
        Active => "active",
        Pending => "pending",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub step: String,
    pub actor: String,
    pub wallet_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub location: String,
    pub status: StepStatus,
    pub price: Option<Decimal>,
    /// Margin over the previous step, in percent
    pub margin: Option<Decimal>,
    pub notes: Option<String>,
    pub verified: bool,
}

/// Anomaly detected on one step of a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceAnomaly {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub message: String,
    pub step: String,
    pub detected: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTrace {
    pub id: String,
    pub crop: String,
    pub quantity: String,
    pub current_status: BatchStatus,
    pub timeline: Vec<TimelineStep>,
    pub anomalies: Vec<TraceAnomaly>,
}

impl ViewRecord for BatchTrace {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.as_str().into(),
            "crop" => self.crop.as_str().into(),
            "quantity" => self.quantity.as_str().into(),
            "currentStatus" => self.current_status.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
