//! Supply Chain Monitoring page: batch search, trace dialog, anomaly feed.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::DashboardState;
use crate::handlers::load;
use crate::models::supply_chain::BatchTrace;
use crate::models::view::Banner;
use crate::services::supply_chain::{AnomalyAlert, TraceProgress, collect_anomalies, find_trace};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringPage {
    pub batches: Vec<BatchTrace>,
    pub anomalies: Vec<AnomalyAlert>,
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceView {
    pub trace: BatchTrace,
    pub progress: TraceProgress,
}

pub async fn load_monitoring(state: &DashboardState) -> MonitoringPage {
    let request_id = Uuid::new_v4();
    let loaded = load::<BatchTrace>(state, "batch traces").await;
    let anomalies = collect_anomalies(&loaded.records);

    info!(
        %request_id,
        batches = loaded.records.len(),
        anomalies = anomalies.len(),
        "Loaded supply chain monitoring"
    );

    MonitoringPage {
        batches: loaded.records,
        anomalies,
        banner: loaded.banner,
    }
}

/// Look up a batch from the search box. A miss is reported as a banner
/// naming the batches that do exist.
pub async fn search_batch(state: &DashboardState, query: &str) -> Result<TraceView, Banner> {
    if query.trim().is_empty() {
        return Err(Banner::info("Enter a batch ID to search"));
    }

    let loaded = load::<BatchTrace>(state, "batch traces").await;
    match find_trace(&loaded.records, query) {
        Some(trace) => Ok(TraceView {
            progress: TraceProgress::of(trace),
            trace: trace.clone(),
        }),
        None => {
            warn!(query, "Batch not found");
            if let Some(banner) = loaded.banner {
                return Err(banner);
            }
            let known: Vec<&str> = loaded.records.iter().map(|t| t.id.as_str()).collect();
            Err(Banner::warning(format!("Batch not found. Try {}", known.join(" or "))))
        }
    }
}
