//! Page controllers
//!
//! One module per dashboard page. A controller fetches through the provider,
//! runs the view pipeline, computes the page stats and returns a view model.
//! Provider failures never escape: the last known records are shown with a
//! [`Banner`] instead.

use serde::Serialize;
use tracing::{error, warn};

use crate::DashboardState;
use crate::models::record::Entity;
use crate::models::view::{Banner, ViewResult};

pub mod blockchain_explorer;
pub mod dashboard;
pub mod login;
pub mod reports;
pub mod role_management;
pub mod supply_chain;

/// A rendered list page: the current slice, stats over the whole filtered
/// set, and an optional message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T, S> {
    pub view: ViewResult<T>,
    pub stats: S,
    pub banner: Option<Banner>,
}

/// Records for a page plus the banner to show, if the fetch degraded.
pub(crate) struct Loaded<T> {
    pub records: Vec<T>,
    pub banner: Option<Banner>,
}

/// Fetch `T` through the snapshot cache. A failure with nothing cached
/// yields an empty list and an error banner.
pub(crate) async fn load<T: Entity>(state: &DashboardState, what: &str) -> Loaded<T> {
    match state.snapshots.fetch::<T>(state.provider.as_ref()).await {
        Ok(fetched) => {
            let banner = fetched.degraded.map(|e| {
                warn!(kind = %T::KIND, error = %e, "Showing last known {}", what);
                Banner::warning(format!("Failed to refresh {what}. Showing last known data."))
            });
            Loaded {
                records: fetched.records,
                banner,
            }
        }
        Err(e) => {
            error!(kind = %T::KIND, error = %e, "Failed to load {}", what);
            Loaded {
                records: Vec::new(),
                banner: Some(Banner::error(format!("Failed to load {what}"))),
            }
        }
    }
}
