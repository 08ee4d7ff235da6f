//! Demo collections the mock store starts with.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::models::analytics::{AnalyticsSnapshot, BatchCounts, PricePoint, RoleDistribution};
use crate::models::anomaly::{Anomaly, AnomalyType, Severity};
use crate::models::batch::{Batch, BatchStatus};
use crate::models::chain::{ChainTransaction, ChainTxStatus, EventLog};
use crate::models::report::{AnomalyReportRow, PricingReportRow, TransactionReportRow};
use crate::models::role::{Participant, ParticipantRole, RoleStatus};
use crate::models::supply_chain::{BatchTrace, StepStatus, TimelineStep, TraceAnomaly};
use crate::models::transaction::{Transaction, TransactionStatus, TransactionType};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Recent hand-offs, timestamped relative to `now`
pub fn transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![
        Transaction {
            id: "tx_001".to_string(),
            batch_id: "BATCH_2024_001".to_string(),
            tx_type: TransactionType::Harvest,
            from: "Farmer John Smith".to_string(),
            to: "Distributor ABC".to_string(),
            timestamp: now - Duration::minutes(30),
            amount: dec!(1250.00),
            status: TransactionStatus::Completed,
            hash: "0x1234567890abcdef...".to_string(),
        },
        Transaction {
            id: "tx_002".to_string(),
            batch_id: "BATCH_2024_002".to_string(),
            tx_type: TransactionType::Transport,
            from: "Distributor ABC".to_string(),
            to: "Retailer XYZ".to_string(),
            timestamp: now - Duration::minutes(60),
            amount: dec!(1890.50),
            status: TransactionStatus::InTransit,
            hash: "0xabcdef1234567890...".to_string(),
        },
        Transaction {
            id: "tx_003".to_string(),
            batch_id: "BATCH_2024_003".to_string(),
            tx_type: TransactionType::Sale,
            from: "Retailer XYZ".to_string(),
            to: "Consumer Market".to_string(),
            timestamp: now - Duration::minutes(90),
            amount: dec!(2340.75),
            status: TransactionStatus::Completed,
            hash: "0x567890abcdef1234...".to_string(),
        },
    ]
}

pub fn batches() -> Vec<Batch> {
    let batch = |id: &str, status, crop: &str, quantity, farmer: &str, value| Batch {
        id: id.to_string(),
        status,
        crop: crop.to_string(),
        quantity,
        farmer: farmer.to_string(),
        value,
    };

    vec![
        batch("BATCH_2024_001", BatchStatus::InTransit, "Wheat", 1000, "John Smith", dec!(15000)),
        batch("BATCH_2024_002", BatchStatus::Delivered, "Rice", 800, "Mary Johnson", dec!(12000)),
        batch("BATCH_2024_003", BatchStatus::InTransit, "Corn", 1200, "Robert Davis", dec!(18000)),
        batch("BATCH_2024_004", BatchStatus::Delivered, "Barley", 900, "Alice Brown", dec!(13500)),
        batch("BATCH_2024_005", BatchStatus::InTransit, "Soybeans", 1100, "David Wilson", dec!(16500)),
        batch("BATCH_2024_006", BatchStatus::Delivered, "Oats", 750, "Emma Martinez", dec!(11250)),
    ]
}

pub fn participants() -> Vec<Participant> {
    vec![
        Participant {
            id: 1,
            name: "John Smith".to_string(),
            role: ParticipantRole::Farmer,
            wallet_id: "0x1234...abcd".to_string(),
            status: RoleStatus::Approved,
            registration_date: day(2024, 1, 15),
            location: "California, USA".to_string(),
        },
        Participant {
            id: 2,
            name: "ABC Distribution".to_string(),
            role: ParticipantRole::Distributor,
            wallet_id: "0x5678...efgh".to_string(),
            status: RoleStatus::Approved,
            registration_date: day(2024, 1, 20),
            location: "Texas, USA".to_string(),
        },
        Participant {
            id: 3,
            name: "XYZ Retail Chain".to_string(),
            role: ParticipantRole::Retailer,
            wallet_id: "0x9012...ijkl".to_string(),
            status: RoleStatus::Pending,
            registration_date: day(2024, 2, 1),
            location: "New York, USA".to_string(),
        },
    ]
}

pub fn anomalies(now: DateTime<Utc>) -> Vec<Anomaly> {
    vec![
        Anomaly {
            id: 1,
            anomaly_type: AnomalyType::HighMargin,
            batch_id: "BATCH_2024_001".to_string(),
            severity: Severity::Medium,
            message: "Margin exceeds 25% threshold".to_string(),
            timestamp: now - Duration::hours(2),
            resolved: false,
        },
        Anomaly {
            id: 2,
            anomaly_type: AnomalyType::TransportDelay,
            batch_id: "BATCH_2024_002".to_string(),
            severity: Severity::High,
            message: "Delivery delayed by 24 hours".to_string(),
            timestamp: now - Duration::hours(4),
            resolved: false,
        },
    ]
}

pub fn chain_transactions() -> Vec<ChainTransaction> {
    vec![
        ChainTransaction {
            id: 1,
            hash: "0x1a2b3c4d5e6f789012345678901234567890abcdef".to_string(),
            batch_id: "BATCH_2024_001".to_string(),
            block_number: 12458392,
            timestamp: at(2024, 1, 15, 8, 0),
            from: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            to: "0x5678901234567890abcdef1234567890abcdef12".to_string(),
            value: dec!(1200),
            gas_used: 21000,
            gas_price: 20,
            status: ChainTxStatus::Success,
            function: "harvestBatch".to_string(),
            event_logs: vec![EventLog {
                event: "BatchHarvested".to_string(),
                args: args(&[
                    ("batchId", "BATCH_2024_001"),
                    ("farmer", "0x1234567890abcdef1234567890abcdef12345678"),
                    ("quantity", "1000"),
                    ("crop", "Wheat"),
                ]),
            }],
        },
        ChainTransaction {
            id: 2,
            hash: "0x2b3c4d5e6f789012345678901234567890abcdef1a".to_string(),
            batch_id: "BATCH_2024_001".to_string(),
            block_number: 12458445,
            timestamp: at(2024, 1, 16, 9, 0),
            from: "0x5678901234567890abcdef1234567890abcdef12".to_string(),
            to: "0x9012345678901234567890abcdef1234567890ab".to_string(),
            value: dec!(1450),
            gas_used: 35000,
            gas_price: 22,
            status: ChainTxStatus::Success,
            function: "transferBatch".to_string(),
            event_logs: vec![EventLog {
                event: "BatchTransferred".to_string(),
                args: args(&[
                    ("batchId", "BATCH_2024_001"),
                    ("from", "0x5678901234567890abcdef1234567890abcdef12"),
                    ("to", "0x9012345678901234567890abcdef1234567890ab"),
                    ("price", "1450"),
                ]),
            }],
        },
        ChainTransaction {
            id: 3,
            hash: "0x3c4d5e6f789012345678901234567890abcdef1a2b".to_string(),
            batch_id: "BATCH_2024_002".to_string(),
            block_number: 12458234,
            timestamp: at(2024, 1, 10, 7, 30),
            from: "0x2468135790abcdef2468135790abcdef24681357".to_string(),
            to: "0x3579246801abcdef3579246801abcdef35792468".to_string(),
            value: dec!(950),
            gas_used: 21000,
            gas_price: 19,
            status: ChainTxStatus::Success,
            function: "harvestBatch".to_string(),
            event_logs: vec![EventLog {
                event: "BatchHarvested".to_string(),
                args: args(&[
                    ("batchId", "BATCH_2024_002"),
                    ("farmer", "0x2468135790abcdef2468135790abcdef24681357"),
                    ("quantity", "800"),
                    ("crop", "Rice"),
                ]),
            }],
        },
        ChainTransaction {
            id: 4,
            hash: "0x4d5e6f789012345678901234567890abcdef1a2b3c".to_string(),
            batch_id: "BATCH_2024_003".to_string(),
            block_number: 12458789,
            timestamp: at(2024, 1, 18, 14, 30),
            from: "0x4680246802abcdef4680246802abcdef46802468".to_string(),
            to: "0x5791357913abcdef5791357913abcdef57913579".to_string(),
            value: dec!(2340),
            gas_used: 28000,
            gas_price: 25,
            status: ChainTxStatus::Success,
            function: "sellBatch".to_string(),
            event_logs: vec![EventLog {
                event: "BatchSold".to_string(),
                args: args(&[
                    ("batchId", "BATCH_2024_003"),
                    ("seller", "0x4680246802abcdef4680246802abcdef46802468"),
                    ("buyer", "0x5791357913abcdef5791357913abcdef57913579"),
                    ("finalPrice", "2340"),
                ]),
            }],
        },
    ]
}

pub fn batch_traces() -> Vec<BatchTrace> {
    vec![
        BatchTrace {
            id: "BATCH_2024_001".to_string(),
            crop: "Wheat".to_string(),
            quantity: "1000 kg".to_string(),
            current_status: BatchStatus::InTransit,
            timeline: vec![
                TimelineStep {
                    step: "Harvest".to_string(),
                    actor: "John Smith (Farmer)".to_string(),
                    wallet_id: Some("0x1234...abcd".to_string()),
                    timestamp: Some(at(2024, 1, 15, 8, 0)),
                    location: "California Farm #1".to_string(),
                    status: StepStatus::Completed,
                    price: Some(dec!(1200)),
                    margin: None,
                    notes: Some("High-quality organic wheat harvested".to_string()),
                    verified: true,
                },
                TimelineStep {
                    step: "Processing".to_string(),
                    actor: "John Smith (Farmer)".to_string(),
                    wallet_id: Some("0x1234...abcd".to_string()),
                    timestamp: Some(at(2024, 1, 15, 12, 0)),
                    location: "On-site Processing".to_string(),
                    status: StepStatus::Completed,
                    price: Some(dec!(1200)),
                    margin: None,
                    notes: Some("Cleaned and packaged for distribution".to_string()),
                    verified: true,
                },
                TimelineStep {
                    step: "Distribution".to_string(),
                    actor: "ABC Distribution".to_string(),
                    wallet_id: Some("0x5678...efgh".to_string()),
                    timestamp: Some(at(2024, 1, 16, 9, 0)),
                    location: "Distribution Center A".to_string(),
                    status: StepStatus::Active,
                    price: Some(dec!(1450)),
                    margin: Some(dec!(20.8)),
                    notes: Some("Currently in transport to retailer".to_string()),
                    verified: false,
                },
                TimelineStep {
                    step: "Retail".to_string(),
                    actor: "XYZ Retail Chain".to_string(),
                    wallet_id: Some("0x9012...ijkl".to_string()),
                    timestamp: None,
                    location: "Pending".to_string(),
                    status: StepStatus::Pending,
                    price: None,
                    margin: None,
                    notes: Some("Awaiting delivery".to_string()),
                    verified: false,
                },
                TimelineStep {
                    step: "Consumer".to_string(),
                    actor: "End Consumer".to_string(),
                    wallet_id: None,
                    timestamp: None,
                    location: "Pending".to_string(),
                    status: StepStatus::Pending,
                    price: None,
                    margin: None,
                    notes: Some("Not yet sold".to_string()),
                    verified: false,
                },
            ],
            anomalies: vec![TraceAnomaly {
                anomaly_type: AnomalyType::HighMargin,
                severity: Severity::Medium,
                message: "Distribution margin of 20.8% exceeds the recommended 15% threshold".to_string(),
                step: "Distribution".to_string(),
                detected: at(2024, 1, 16, 10, 30),
            }],
        },
        BatchTrace {
            id: "BATCH_2024_002".to_string(),
            crop: "Rice".to_string(),
            quantity: "800 kg".to_string(),
            current_status: BatchStatus::Delivered,
            timeline: vec![
                TimelineStep {
                    step: "Harvest".to_string(),
                    actor: "Mary Johnson (Farmer)".to_string(),
                    wallet_id: Some("0x2468...bcde".to_string()),
                    timestamp: Some(at(2024, 1, 10, 7, 30)),
                    location: "Texas Rice Farm".to_string(),
                    status: StepStatus::Completed,
                    price: Some(dec!(950)),
                    margin: None,
                    notes: None,
                    verified: true,
                },
                TimelineStep {
                    step: "Distribution".to_string(),
                    actor: "Regional Distributors".to_string(),
                    wallet_id: Some("0x3579...cdef".to_string()),
                    timestamp: Some(at(2024, 1, 12, 14, 0)),
                    location: "Texas Distribution Hub".to_string(),
                    status: StepStatus::Completed,
                    price: Some(dec!(1100)),
                    margin: Some(dec!(15.8)),
                    notes: None,
                    verified: true,
                },
                TimelineStep {
                    step: "Retail".to_string(),
                    actor: "Local Market Co.".to_string(),
                    wallet_id: Some("0x4680...deff".to_string()),
                    timestamp: Some(at(2024, 1, 14, 11, 0)),
                    location: "City Market Downtown".to_string(),
                    status: StepStatus::Completed,
                    price: Some(dec!(1300)),
                    margin: Some(dec!(18.2)),
                    notes: None,
                    verified: true,
                },
            ],
            anomalies: vec![TraceAnomaly {
                anomaly_type: AnomalyType::TransportDelay,
                severity: Severity::Low,
                message: "Delivery was 4 hours later than scheduled".to_string(),
                step: "Distribution".to_string(),
                detected: at(2024, 1, 12, 18, 0),
            }],
        },
    ]
}

pub fn transaction_reports() -> Vec<TransactionReportRow> {
    vec![
        TransactionReportRow {
            id: "tx_001".to_string(),
            date: day(2024, 1, 15),
            batch_id: "BATCH_2024_001".to_string(),
            tx_type: TransactionType::Harvest,
            from: "John Smith".to_string(),
            to: "ABC Distribution".to_string(),
            amount: dec!(1250.00),
            status: TransactionStatus::Completed,
            gas_used: 21000,
        },
        TransactionReportRow {
            id: "tx_002".to_string(),
            date: day(2024, 1, 16),
            batch_id: "BATCH_2024_001".to_string(),
            tx_type: TransactionType::Transport,
            from: "ABC Distribution".to_string(),
            to: "XYZ Retail".to_string(),
            amount: dec!(1890.50),
            status: TransactionStatus::Completed,
            gas_used: 35000,
        },
        TransactionReportRow {
            id: "tx_003".to_string(),
            date: day(2024, 1, 10),
            batch_id: "BATCH_2024_002".to_string(),
            tx_type: TransactionType::Harvest,
            from: "Mary Johnson".to_string(),
            to: "Regional Distributors".to_string(),
            amount: dec!(950.00),
            status: TransactionStatus::Completed,
            gas_used: 21000,
        },
    ]
}

pub fn pricing_reports() -> Vec<PricingReportRow> {
    vec![
        PricingReportRow {
            batch_id: "BATCH_2024_001".to_string(),
            crop: "Wheat".to_string(),
            farmer_price: dec!(1200),
            distributor_price: dec!(1450),
            retail_price: dec!(1890),
            final_price: dec!(2340),
            farmer_margin: dec!(0),
            distributor_margin: dec!(20.8),
            retail_margin: dec!(30.3),
        },
        PricingReportRow {
            batch_id: "BATCH_2024_002".to_string(),
            crop: "Rice".to_string(),
            farmer_price: dec!(950),
            distributor_price: dec!(1100),
            retail_price: dec!(1300),
            final_price: dec!(1560),
            farmer_margin: dec!(0),
            distributor_margin: dec!(15.8),
            retail_margin: dec!(18.2),
        },
    ]
}

pub fn anomaly_reports() -> Vec<AnomalyReportRow> {
    vec![
        AnomalyReportRow {
            id: 1,
            date: day(2024, 1, 16),
            anomaly_type: AnomalyType::HighMargin,
            batch_id: "BATCH_2024_001".to_string(),
            severity: Severity::Medium,
            description: "Distribution margin of 20.8% exceeds threshold".to_string(),
            resolved: false,
        },
        AnomalyReportRow {
            id: 2,
            date: day(2024, 1, 12),
            anomaly_type: AnomalyType::TransportDelay,
            batch_id: "BATCH_2024_002".to_string(),
            severity: Severity::Low,
            description: "Delivery delayed by 4 hours".to_string(),
            resolved: true,
        },
    ]
}

pub fn analytics() -> AnalyticsSnapshot {
    let distribution = |role: &str, count, transactions| RoleDistribution {
        role: role.to_string(),
        count,
        transactions,
    };
    let point = |d, price| PricePoint {
        date: day(2024, 1, d),
        price,
    };

    AnalyticsSnapshot {
        total_batches: BatchCounts {
            active: 45,
            delivered: 32,
            sold: 28,
        },
        today_transactions: 24,
        total_revenue: dec!(125430.50),
        average_price: dec!(1450.25),
        role_distribution: vec![
            distribution("Farmers", 15, 45),
            distribution("Distributors", 8, 32),
            distribution("Retailers", 12, 28),
            distribution("Consumers", 150, 15),
        ],
        pricing_trends: vec![
            point(1, dec!(1200)),
            point(2, dec!(1250)),
            point(3, dec!(1180)),
            point(4, dec!(1320)),
            point(5, dec!(1450)),
            point(6, dec!(1380)),
            point(7, dec!(1420)),
        ],
    }
}
