use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{DashboardError, DashboardResult};
use crate::models::view::{DEFAULT_PAGE_SIZE, validate_page_size};
use crate::services::auth::DEMO_EMAIL;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub page_size: i32,
    pub refresh_interval: Duration,
    pub export_dir: PathBuf,
    pub storage_path: PathBuf,
    pub simulate_latency: bool,
    pub prefers_dark: bool,
    pub demo_email: String,
    pub demo_password: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval: Duration::from_secs(30),
            export_dir: PathBuf::from("exports"),
            storage_path: PathBuf::from("agrichain_storage.json"),
            simulate_latency: true,
            prefers_dark: false,
            demo_email: DEMO_EMAIL.to_string(),
            demo_password: "password123".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read `AGRICHAIN_*` variables, keeping defaults for unset ones.
    pub fn from_env() -> DashboardResult<Self> {
        let defaults = Self::default();

        let config = Self {
            page_size: parse_var("AGRICHAIN_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            refresh_interval: parse_var("AGRICHAIN_REFRESH_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            export_dir: env::var("AGRICHAIN_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            storage_path: env::var("AGRICHAIN_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            simulate_latency: parse_var("AGRICHAIN_SIMULATE_LATENCY")?.unwrap_or(defaults.simulate_latency),
            prefers_dark: parse_var("AGRICHAIN_PREFERS_DARK")?.unwrap_or(defaults.prefers_dark),
            demo_email: env::var("AGRICHAIN_DEMO_EMAIL").unwrap_or(defaults.demo_email),
            demo_password: env::var("AGRICHAIN_DEMO_PASSWORD").unwrap_or(defaults.demo_password),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        validate_page_size(self.page_size)?;
        if self.refresh_interval.is_zero() {
            return Err(DashboardError::configuration("AGRICHAIN_REFRESH_SECS must be greater than 0"));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str) -> DashboardResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DashboardError::configuration(format!("{name}: invalid value '{raw}': {e}"))),
        Err(_) => Ok(None),
    }
}
