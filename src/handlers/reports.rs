//! Reports page: report cards, table previews and exports.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::DashboardState;
use crate::error::DashboardResult;
use crate::handlers::{PageView, load};
use crate::models::anomaly::Severity;
use crate::models::record::{Entity, EntityRecord, ViewRecord};
use crate::models::report::{
    AnomalyReportRow, ExportFormat, PricingReportRow, ReportFilters, ReportKind, ReportStats, TransactionReportRow,
};
use crate::models::transaction::TransactionStatus;
use crate::models::view::{Banner, BannerLevel, ViewQuery};
use crate::services::export::ReportData;
use crate::services::view_pipeline::{self, FilteredView};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    pub kind: ReportKind,
    pub title: &'static str,
    pub description: &'static str,
    pub stats: ReportStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsPage {
    pub cards: Vec<ReportCard>,
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub path: Option<PathBuf>,
    pub banner: Banner,
}

/// Batch id narrowing goes through the pipeline as an equality filter.
fn batch_query(filters: &ReportFilters) -> ViewQuery {
    let query = ViewQuery::default();
    match filters.batch_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => query.with_filter("batchId", id),
        _ => query,
    }
}

fn select<T: ViewRecord + Clone>(rows: &[T], filters: &ReportFilters, date: impl Fn(&T) -> Option<NaiveDate>) -> Vec<T> {
    view_pipeline::filter(rows, &batch_query(filters))
        .iter()
        .filter(|row| date(*row).is_none_or(|d| filters.contains_date(d)))
        .cloned()
        .collect()
}

/// Rows of one report after the page filters, plus any fetch banner.
pub async fn report_data(state: &DashboardState, kind: ReportKind, filters: &ReportFilters) -> (ReportData, Option<Banner>) {
    match kind {
        ReportKind::Transactions => {
            let loaded = load::<TransactionReportRow>(state, "transaction report").await;
            let rows = select(&loaded.records, filters, |row| Some(row.date));
            (ReportData::Transactions(rows), loaded.banner)
        }
        ReportKind::Pricing => {
            let loaded = load::<PricingReportRow>(state, "pricing report").await;
            let rows = select(&loaded.records, filters, |_| None);
            (ReportData::Pricing(rows), loaded.banner)
        }
        ReportKind::Anomalies => {
            let loaded = load::<AnomalyReportRow>(state, "anomaly report").await;
            let rows = select(&loaded.records, filters, |row| Some(row.date));
            (ReportData::Anomalies(rows), loaded.banner)
        }
    }
}

fn everything<T: ViewRecord>(rows: &[T]) -> FilteredView<'_, T> {
    view_pipeline::filter(rows, &ViewQuery::default())
}

pub fn report_stats(report: &ReportData) -> DashboardResult<ReportStats> {
    let stats = match report {
        ReportData::Transactions(rows) => {
            let view = everything(rows);
            ReportStats::Transactions {
                total: view.count(),
                total_value: view.sum("amount")?,
                successful: view.count_where(|row| row.status == TransactionStatus::Completed),
            }
        }
        ReportData::Pricing(rows) => {
            let view = everything(rows);
            let margins = view.sum("distributorMargin")? + view.sum("retailMargin")?;
            let avg_margin = if view.is_empty() {
                Decimal::ZERO
            } else {
                (margins / Decimal::from(view.count() as u64 * 2))
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            };
            ReportStats::Pricing {
                total: view.count(),
                avg_margin,
                highest_price: view.max("finalPrice")?,
            }
        }
        ReportData::Anomalies(rows) => {
            let view = everything(rows);
            ReportStats::Anomalies {
                total: view.count(),
                resolved: view.count_where(|row| row.resolved),
                critical: view.count_where(|row| row.severity == Severity::High),
            }
        }
    };
    Ok(stats)
}

pub async fn load_reports(state: &DashboardState, filters: &ReportFilters) -> DashboardResult<ReportsPage> {
    let request_id = Uuid::new_v4();
    let mut cards = Vec::with_capacity(ReportKind::ALL.len());
    let mut banner = None;

    for kind in ReportKind::ALL {
        let (data, fetch_banner) = report_data(state, *kind, filters).await;
        banner = banner.or(fetch_banner);
        cards.push(ReportCard {
            kind: *kind,
            title: kind.title(),
            description: kind.description(),
            stats: report_stats(&data)?,
        });
    }

    info!(%request_id, ?filters, "Loaded reports page");
    Ok(ReportsPage { cards, banner })
}

/// Preview table for one report, paginated through the view pipeline.
pub async fn preview(
    state: &DashboardState,
    kind: ReportKind,
    filters: &ReportFilters,
    query: &ViewQuery,
) -> DashboardResult<PageView<EntityRecord, ReportStats>> {
    let request_id = Uuid::new_v4();
    query.validate()?;

    let (data, banner) = report_data(state, kind, filters).await;
    let stats = report_stats(&data)?;
    let records: Vec<EntityRecord> = match data {
        ReportData::Transactions(rows) => rows.into_iter().map(Entity::into_record).collect(),
        ReportData::Pricing(rows) => rows.into_iter().map(Entity::into_record).collect(),
        ReportData::Anomalies(rows) => rows.into_iter().map(Entity::into_record).collect(),
    };
    let view = view_pipeline::apply(&records, query)?;

    info!(%request_id, kind = %kind, rows = view.total_filtered_count, "Report preview generated");
    Ok(PageView { view, stats, banner })
}

/// Render and save a report. Write failures become an error banner.
pub async fn export(
    state: &DashboardState,
    kind: ReportKind,
    format: ExportFormat,
    filters: &ReportFilters,
) -> ExportOutcome {
    let request_id = Uuid::new_v4();
    let (data, fetch_banner) = report_data(state, kind, filters).await;

    // nothing fetched and nothing cached: no file
    if let Some(banner) = fetch_banner.as_ref().filter(|b| b.level == BannerLevel::Error) {
        warn!(%request_id, kind = %kind, "Skipping export, report data unavailable");
        return ExportOutcome {
            path: None,
            banner: banner.clone(),
        };
    }

    match state.exports.write(&data, format) {
        Ok(path) => {
            info!(%request_id, kind = %kind, path = %path.display(), "Report downloaded");
            let label = format.as_str().to_uppercase();
            ExportOutcome {
                path: Some(path),
                banner: fetch_banner.unwrap_or_else(|| Banner::success(format!("Report exported successfully as {label}"))),
            }
        }
        Err(e) => {
            error!(%request_id, kind = %kind, error = %e, "Report export failed");
            ExportOutcome {
                path: None,
                banner: Banner::error("Failed to export report"),
            }
        }
    }
}
