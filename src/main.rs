use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agrichain_dashboard::DashboardState;
use agrichain_dashboard::config::DashboardConfig;
use agrichain_dashboard::handlers::{blockchain_explorer, dashboard, login, reports, role_management, supply_chain};
use agrichain_dashboard::jobs::dashboard_refresh::start_dashboard_refresh_job;
use agrichain_dashboard::models::auth::LoginForm;
use agrichain_dashboard::models::report::{ExportFormat, ReportFilters, ReportKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agrichain_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        "Starting AgriChain dashboard (page size {}, refresh every {:?})",
        config.page_size,
        config.refresh_interval
    );

    let state = DashboardState::from_config(config.clone())?;
    tracing::info!("Theme: {}", state.theme.mode());

    if !state.auth.is_authenticated() {
        let form = LoginForm {
            email: config.demo_email.clone(),
            password: config.demo_password.clone(),
            remember_me: true,
        };
        if let Err(errors) = login::submit(&state, &form)? {
            tracing::error!("Demo sign-in failed: {:?}", errors);
            return Ok(());
        }
    }

    let home = dashboard::load_dashboard(&state).await;
    if let Some(snapshot) = &home.snapshot {
        tracing::info!(
            "Dashboard: {} batches ({} in transit, {} delivered), total value {}",
            snapshot.stats.total_batches,
            snapshot.stats.active_batches,
            snapshot.stats.completed_batches,
            snapshot.stats.total_value
        );
    }

    let roles = role_management::load_roles(&state, &role_management::query(config.page_size)).await?;
    tracing::info!(
        "Roles: {} of {} shown, by status {:?}",
        roles.stats.shown,
        roles.stats.total,
        roles.stats.by_status
    );

    let explorer = blockchain_explorer::load_transactions(&state, &blockchain_explorer::query()).await?;
    tracing::info!(
        "Explorer: {} transactions, success rate {}%",
        explorer.stats.total_transactions,
        explorer.stats.success_rate
    );

    let monitoring = supply_chain::load_monitoring(&state).await;
    tracing::info!(
        "Supply chain: {} traced batches, {} anomalies",
        monitoring.batches.len(),
        monitoring.anomalies.len()
    );

    let filters = ReportFilters::default();
    for kind in ReportKind::ALL {
        let outcome = reports::export(&state, *kind, ExportFormat::Csv, &filters).await;
        tracing::info!("{}: {}", kind.title(), outcome.banner.message);
    }

    let refresh = start_dashboard_refresh_job(state.provider.clone(), state.latest.clone(), config.refresh_interval).await;

    tracing::info!("Dashboard running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    refresh.abort();
    tracing::info!("Shutting down");
    Ok(())
}
