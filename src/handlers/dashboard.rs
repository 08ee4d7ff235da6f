//! Main dashboard page: headline stats, recent transactions and charts.

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::DashboardState;
use crate::models::view::Banner;
use crate::services::dashboard::{DashboardSnapshot, load_snapshot};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub snapshot: Option<DashboardSnapshot>,
    pub banner: Option<Banner>,
}

/// Build a fresh snapshot and publish it to `state.latest`. On a provider
/// failure the last published snapshot is shown with a warning; with none
/// published yet the page is empty with an error.
pub async fn load_dashboard(state: &DashboardState) -> DashboardPage {
    let request_id = Uuid::new_v4();

    match load_snapshot(state.provider.as_ref()).await {
        Ok(snapshot) => {
            info!(
                %request_id,
                batches = snapshot.stats.total_batches,
                total_value = %snapshot.stats.total_value,
                "Loaded dashboard"
            );
            *state.latest.write().await = Some(snapshot.clone());
            DashboardPage {
                snapshot: Some(snapshot),
                banner: None,
            }
        }
        Err(e) => match state.latest.read().await.clone() {
            Some(previous) => {
                warn!(%request_id, error = %e, "Showing last known dashboard data");
                DashboardPage {
                    snapshot: Some(previous),
                    banner: Some(Banner::warning(
                        "Failed to refresh dashboard data. Showing last known data.",
                    )),
                }
            }
            None => {
                error!(%request_id, error = %e, "Failed to load dashboard data");
                DashboardPage {
                    snapshot: None,
                    banner: Some(Banner::error("Failed to load dashboard data")),
                }
            }
        },
    }
}
