//! Role Management page: participant registrations and their approval.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::DashboardState;
use crate::error::{DashboardError, DashboardResult};
use crate::handlers::{PageView, load};
use crate::models::record::{Entity, RecordId};
use crate::models::role::{Participant, ParticipantRole, RoleStatus};
use crate::models::view::{ALL_FILTER, Banner, ViewQuery};
use crate::services::view_pipeline;

pub const SEARCH_FIELDS: [&str; 3] = ["name", "walletId", "location"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStats {
    /// Participants in the unfiltered collection
    pub total: usize,
    pub shown: usize,
    pub by_status: Vec<(String, usize)>,
}

/// Options offered by the role filter, `All` first.
pub fn role_filter_options() -> Vec<&'static str> {
    std::iter::once(ALL_FILTER)
        .chain(ParticipantRole::ALL.iter().map(|r| r.as_str()))
        .collect()
}

pub fn status_filter_options() -> Vec<&'static str> {
    std::iter::once(ALL_FILTER)
        .chain(RoleStatus::ALL.iter().map(|s| s.as_str()))
        .collect()
}

/// Default query for the page: searchable, both filters on `All`.
pub fn query(page_size: i32) -> ViewQuery {
    ViewQuery::new(page_size)
        .searching(SEARCH_FIELDS)
        .with_filter("role", ALL_FILTER)
        .with_filter("status", ALL_FILTER)
}

pub async fn load_roles(state: &DashboardState, query: &ViewQuery) -> DashboardResult<PageView<Participant, RoleStats>> {
    let request_id = Uuid::new_v4();
    query.validate()?;

    let loaded = load::<Participant>(state, "roles").await;
    let filtered = view_pipeline::filter(&loaded.records, query);
    let stats = RoleStats {
        total: loaded.records.len(),
        shown: filtered.count(),
        by_status: filtered.count_by_distinct_value("status"),
    };
    let view = filtered.paginate(query.page, query.page_size)?;

    info!(
        %request_id,
        total = stats.total,
        shown = stats.shown,
        page = view.current_page,
        "Loaded roles page"
    );

    Ok(PageView {
        view,
        stats,
        banner: loaded.banner,
    })
}

pub async fn approve(state: &DashboardState, query: &ViewQuery, id: i64) -> DashboardResult<PageView<Participant, RoleStats>> {
    change_status(state, query, id, RoleStatus::Approved).await
}

pub async fn reject(state: &DashboardState, query: &ViewQuery, id: i64) -> DashboardResult<PageView<Participant, RoleStats>> {
    change_status(state, query, id, RoleStatus::Rejected).await
}

/// Submit the transition, then re-read the list so the page reflects it.
async fn change_status(
    state: &DashboardState,
    query: &ViewQuery,
    id: i64,
    target: RoleStatus,
) -> DashboardResult<PageView<Participant, RoleStats>> {
    let request_id = Uuid::new_v4();
    let action = match target {
        RoleStatus::Approved => "approved",
        _ => "rejected",
    };

    let mut mutation_failed = false;
    let banner = match state
        .provider
        .mutate_status(Participant::KIND, &RecordId::Number(id), target.as_str())
        .await
    {
        Ok(ack) if ack.success => {
            info!(%request_id, id, status = %target, "Role status updated");
            Banner::success(format!("Role {action} successfully"))
        }
        Ok(_) => {
            info!(%request_id, id, status = %target, "Role transition not applicable");
            Banner::info(format!("Role {id} is not pending approval"))
        }
        Err(e) => {
            warn!(%request_id, id, error = %e, "Role status update failed");
            mutation_failed = true;
            Banner::error(format!("Failed to update role {id}"))
        }
    };

    // a failed update outranks a degraded reload
    let mut page = load_roles(state, query).await?;
    if mutation_failed || page.banner.is_none() {
        page.banner = Some(banner);
    }
    Ok(page)
}

/// Detail dialog lookup
pub async fn role_details(state: &DashboardState, id: i64) -> DashboardResult<Participant> {
    let loaded = load::<Participant>(state, "roles").await;
    loaded
        .records
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| DashboardError::NotFound {
            kind: Participant::KIND,
            id: id.to_string(),
        })
}
