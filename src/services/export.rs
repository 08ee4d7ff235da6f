//! Report export
//!
//! Renders report tables as CSV or as a plain-text summary and writes the
//! result to the export directory under a dated filename.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::DashboardResult;
use crate::models::report::{AnomalyReportRow, ExportFormat, PricingReportRow, ReportKind, TransactionReportRow};

/// The rows of one report, already filtered by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Transactions(Vec<TransactionReportRow>),
    Pricing(Vec<PricingReportRow>),
    Anomalies(Vec<AnomalyReportRow>),
}

impl ReportData {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportData::Transactions(_) => ReportKind::Transactions,
            ReportData::Pricing(_) => ReportKind::Pricing,
            ReportData::Anomalies(_) => ReportKind::Anomalies,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportData::Transactions(rows) => rows.len(),
            ReportData::Pricing(rows) => rows.len(),
            ReportData::Anomalies(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `<reportType>_report_<YYYY-MM-DD>.<csv|txt>`
pub fn report_filename(kind: ReportKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_report_{}.{}",
        kind.as_str(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

pub fn render_dated(report: &ReportData, format: ExportFormat, generated_on: NaiveDate) -> Vec<u8> {
    match format {
        ExportFormat::Csv => render_csv(report),
        ExportFormat::Text => render_text(report, generated_on),
    }
    .into_bytes()
}

pub fn render_csv(report: &ReportData) -> String {
    let mut out = String::new();
    match report {
        ReportData::Transactions(rows) => {
            out.push_str("ID,Date,Batch ID,Type,From,To,Amount,Status,Gas Used\n");
            for row in rows {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{}",
                    row.id,
                    row.date.format("%Y-%m-%d"),
                    row.batch_id,
                    row.tx_type,
                    row.from,
                    row.to,
                    row.amount.normalize(),
                    row.status,
                    row.gas_used
                );
            }
        }
        ReportData::Pricing(rows) => {
            out.push_str(
                "Batch ID,Crop,Farmer Price,Distributor Price,Retail Price,Final Price,Distributor Margin,Retail Margin\n",
            );
            for row in rows {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{},{},{}%,{}%",
                    row.batch_id,
                    row.crop,
                    row.farmer_price.normalize(),
                    row.distributor_price.normalize(),
                    row.retail_price.normalize(),
                    row.final_price.normalize(),
                    row.distributor_margin.normalize(),
                    row.retail_margin.normalize()
                );
            }
        }
        ReportData::Anomalies(rows) => {
            out.push_str("ID,Date,Type,Batch ID,Severity,Description,Resolved\n");
            for row in rows {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{},{},{}",
                    row.id,
                    row.date.format("%Y-%m-%d"),
                    row.anomaly_type,
                    row.batch_id,
                    row.severity,
                    quoted(&row.description),
                    row.resolved
                );
            }
        }
    }
    out
}

pub fn render_text(report: &ReportData, generated_on: NaiveDate) -> String {
    let kind = report.kind();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "AgriChain Admin Dashboard - {} REPORT",
        kind.as_str().to_uppercase()
    );
    let _ = writeln!(out, "Generated on: {}\n", generated_on.format("%m/%d/%Y"));
    let _ = writeln!(out, "{} REPORT", kind.title().to_uppercase());

    match report {
        ReportData::Transactions(rows) => {
            let total: Decimal = rows.iter().map(|row| row.amount).sum();
            let _ = writeln!(out, "Total Transactions: {}", rows.len());
            let _ = writeln!(out, "Total Value: ${}\n", grouped(total));
            for row in rows {
                let _ = writeln!(out, "Transaction: {}", row.id);
                let _ = writeln!(out, "Date: {}", row.date.format("%Y-%m-%d"));
                let _ = writeln!(out, "Batch: {}", row.batch_id);
                let _ = writeln!(out, "Type: {}", row.tx_type);
                let _ = writeln!(out, "From: {}", row.from);
                let _ = writeln!(out, "To: {}", row.to);
                let _ = writeln!(out, "Amount: ${}", row.amount.normalize());
                let _ = writeln!(out, "Status: {}", row.status);
                let _ = writeln!(out, "Gas Used: {}", row.gas_used);
                out.push_str("---\n");
            }
        }
        ReportData::Pricing(rows) => {
            let _ = writeln!(out, "Total Batches: {}\n", rows.len());
            for row in rows {
                let _ = writeln!(out, "Batch: {}", row.batch_id);
                let _ = writeln!(out, "Crop: {}", row.crop);
                let _ = writeln!(out, "Farmer Price: ${}", grouped(row.farmer_price));
                let _ = writeln!(out, "Distributor Price: ${}", grouped(row.distributor_price));
                let _ = writeln!(out, "Retail Price: ${}", grouped(row.retail_price));
                let _ = writeln!(out, "Final Price: ${}", grouped(row.final_price));
                let _ = writeln!(out, "Distributor Margin: {}%", row.distributor_margin.normalize());
                let _ = writeln!(out, "Retail Margin: {}%", row.retail_margin.normalize());
                out.push_str("---\n");
            }
        }
        ReportData::Anomalies(rows) => {
            let resolved = rows.iter().filter(|row| row.resolved).count();
            let _ = writeln!(out, "Total Anomalies: {}", rows.len());
            let _ = writeln!(out, "Resolved: {}\n", resolved);
            for row in rows {
                let _ = writeln!(out, "Anomaly: {}", row.id);
                let _ = writeln!(out, "Date: {}", row.date.format("%Y-%m-%d"));
                let _ = writeln!(out, "Type: {}", row.anomaly_type);
                let _ = writeln!(out, "Batch: {}", row.batch_id);
                let _ = writeln!(out, "Severity: {}", row.severity);
                let _ = writeln!(out, "Description: {}", row.description);
                let _ = writeln!(out, "Status: {}", if row.resolved { "Resolved" } else { "Open" });
                out.push_str("---\n");
            }
        }
    }
    out
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Thousands-separated rendering, e.g. `4090.5` -> `4,090.5`
fn grouped(value: Decimal) -> String {
    let plain = value.normalize().to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut digits = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            digits.push(',');
        }
        digits.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{digits}.{fraction}"),
        None => format!("{sign}{digits}"),
    }
}

/// Writes rendered reports into the export directory.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render `report` and save it; returns the written path.
    pub fn write(&self, report: &ReportData, format: ExportFormat) -> DashboardResult<PathBuf> {
        let today = Utc::now().date_naive();
        self.write_dated(report, format, today)
    }

    pub fn write_dated(&self, report: &ReportData, format: ExportFormat, date: NaiveDate) -> DashboardResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(report_filename(report.kind(), format, date));
        let bytes = render_dated(report, format, date);
        debug!(path = %path.display(), bytes = bytes.len(), "Writing report");
        fs::write(&path, &bytes)?;

        info!(
            kind = %report.kind(),
            format = %format,
            content_type = format.mime_type(),
            rows = report.len(),
            path = %path.display(),
            "Report exported"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_transactions_csv() {
        let rows = seed::transaction_reports().into_iter().take(2).collect();
        let csv = render_csv(&ReportData::Transactions(rows));
        assert_eq!(
            csv,
            "ID,Date,Batch ID,Type,From,To,Amount,Status,Gas Used\n\
             tx_001,2024-01-15,BATCH_2024_001,Harvest,John Smith,ABC Distribution,1250,Completed,21000\n\
             tx_002,2024-01-16,BATCH_2024_001,Transport,ABC Distribution,XYZ Retail,1890.5,Completed,35000\n"
        );
    }

    #[test]
    fn test_pricing_csv_margins() {
        let csv = render_csv(&ReportData::Pricing(seed::pricing_reports()));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "BATCH_2024_001,Wheat,1200,1450,1890,2340,20.8%,30.3%");
    }

    #[test]
    fn test_anomaly_csv_quotes_description() {
        let mut rows = seed::anomaly_reports();
        rows[1].description = "Driver said \"late\"".to_string();
        let csv = render_csv(&ReportData::Anomalies(rows));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "1,2024-01-16,High Margin,BATCH_2024_001,Medium,\"Distribution margin of 20.8% exceeds threshold\",false"
        );
        assert!(lines[2].contains("\"Driver said \"\"late\"\"\""));
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text(&ReportData::Transactions(seed::transaction_reports()), jan(20));
        assert!(text.starts_with("AgriChain Admin Dashboard - TRANSACTIONS REPORT\nGenerated on: 01/20/2024\n\n"));
        assert!(text.contains("TRANSACTION HISTORY REPORT\n"));
        assert!(text.contains("Total Transactions: 3\n"));
        assert!(text.contains("Total Value: $4,090.5\n"));
        assert_eq!(text.matches("---\n").count(), 3);
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(Decimal::new(125043050, 3)), "125,043.05");
        assert_eq!(grouped(Decimal::from(950)), "950");
        assert_eq!(grouped(Decimal::from(-1_000_000)), "-1,000,000");
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename(ReportKind::Pricing, ExportFormat::Text, jan(5)),
            "pricing_report_2024-01-05.txt"
        );
        assert_eq!(
            report_filename(ReportKind::Anomalies, ExportFormat::Csv, jan(5)),
            "anomalies_report_2024-01-05.csv"
        );
    }

    #[test]
    fn test_writer_saves_download() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExportWriter::new(dir.path().join("exports"));
        let report = ReportData::Anomalies(seed::anomaly_reports());

        let path = writer.write_dated(&report, ExportFormat::Csv, jan(16)).unwrap();
        assert_eq!(path.file_name().unwrap(), "anomalies_report_2024-01-16.csv");
        let saved = fs::read_to_string(&path).unwrap();
        assert_eq!(saved, render_csv(&report));
    }
}
