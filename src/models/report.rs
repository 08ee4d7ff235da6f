//! Report tables and export formats.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::anomaly::{AnomalyType, Severity};
use crate::models::record::{FieldValue, ViewRecord};
use crate::models::transaction::{TransactionStatus, TransactionType};

labelled_enum! {
    pub enum ReportKind {
        Transactions => "transactions",
        Pricing => "pricing",
        Anomalies => "anomalies",
    }
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Transactions => "Transaction History",
            ReportKind::Pricing => "Pricing Analysis",
            ReportKind::Anomalies => "Anomaly Report",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportKind::Transactions => "Complete history of all blockchain transactions",
            ReportKind::Pricing => "Price trends and margin analysis across the supply chain",
            ReportKind::Anomalies => "Detected anomalies and their resolution status",
        }
    }
}

labelled_enum! {
    pub enum ExportFormat {
        Csv => "csv",
        Text => "text",
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Text => "text/plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReportRow {
    pub id: String,
    pub date: NaiveDate,
    pub batch_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub gas_used: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReportRow {
    pub batch_id: String,
    pub crop: String,
    pub farmer_price: Decimal,
    pub distributor_price: Decimal,
    pub retail_price: Decimal,
    pub final_price: Decimal,
    pub farmer_margin: Decimal,
    pub distributor_margin: Decimal,
    pub retail_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReportRow {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub batch_id: String,
    pub severity: Severity,
    pub description: String,
    pub resolved: bool,
}

fn date_field(date: &NaiveDate) -> FieldValue {
    date.format("%Y-%m-%d").to_string().into()
}

impl ViewRecord for TransactionReportRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.as_str().into(),
            "date" => date_field(&self.date),
            "batchId" => self.batch_id.as_str().into(),
            "type" => self.tx_type.as_str().into(),
            "from" => self.from.as_str().into(),
            "to" => self.to.as_str().into(),
            "amount" => self.amount.into(),
            "status" => self.status.as_str().into(),
            "gasUsed" => self.gas_used.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl ViewRecord for PricingReportRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "batchId" => self.batch_id.as_str().into(),
            "crop" => self.crop.as_str().into(),
            "farmerPrice" => self.farmer_price.into(),
            "distributorPrice" => self.distributor_price.into(),
            "retailPrice" => self.retail_price.into(),
            "finalPrice" => self.final_price.into(),
            "farmerMargin" => self.farmer_margin.into(),
            "distributorMargin" => self.distributor_margin.into(),
            "retailMargin" => self.retail_margin.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl ViewRecord for AnomalyReportRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "date" => date_field(&self.date),
            "type" => self.anomaly_type.as_str().into(),
            "batchId" => self.batch_id.as_str().into(),
            "severity" => self.severity.as_str().into(),
            "description" => self.description.as_str().into(),
            "resolved" => self.resolved.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Report filter panel: optional date window plus batch id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub batch_id: Option<String>,
}

impl ReportFilters {
    /// Inclusive on both ends; open ends accept everything.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }
}

/// Headline numbers shown on each report card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "camelCase")]
pub enum ReportStats {
    #[serde(rename_all = "camelCase")]
    Transactions {
        total: usize,
        total_value: Decimal,
        successful: usize,
    },
    #[serde(rename_all = "camelCase")]
    Pricing {
        total: usize,
        avg_margin: Decimal,
        highest_price: Option<Decimal>,
    },
    #[serde(rename_all = "camelCase")]
    Anomalies {
        total: usize,
        resolved: usize,
        critical: usize,
    },
}
