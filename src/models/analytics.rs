use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCounts {
    pub active: u32,
    pub delivered: u32,
    pub sold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDistribution {
    pub role: String,
    pub count: u32,
    pub transactions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Network-wide analytics served alongside the collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_batches: BatchCounts,
    pub today_transactions: u32,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
    pub role_distribution: Vec<RoleDistribution>,
    pub pricing_trends: Vec<PricePoint>,
}
