use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum AnomalyType {
        HighMargin => "High Margin",
        TransportDelay => "Transport Delay",
        PriceAnomaly => "Price Anomaly",
        QualityIssue => "Quality Issue",
        FraudDetection => "Fraud Detection",
    }
}

labelled_enum! {
    pub enum Severity {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// Irregularity flagged on a batch (margin spikes, delays, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: i64,
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub batch_id: String,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
}

impl ViewRecord for Anomaly {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "type" => self.anomaly_type.as_str().into(),
            "batchId" => self.batch_id.as_str().into(),
            "severity" => self.severity.as_str().into(),
            "message" => self.message.as_str().into(),
            "timestamp" => self.timestamp.to_rfc3339().into(),
            "resolved" => self.resolved.into(),
            _ => return None,
        };
        Some(value)
    }
}
