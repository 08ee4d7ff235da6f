// src/lib.rs

use std::sync::Arc;

use config::DashboardConfig;
use error::DashboardResult;
use jobs::dashboard_refresh::SharedSnapshot;
use services::{
    auth::AuthGate,
    data_provider::{DataProvider, LatencyProfile, MockDataProvider},
    export::ExportWriter,
    kv_store::{FileKvStore, KeyValueStore, MemoryKvStore},
    mock_store::MockStore,
    snapshot_cache::SnapshotCache,
    theme::ThemeService,
};

/// Everything a page controller needs, shared by cheap clones.
#[derive(Clone)]
pub struct DashboardState {
    pub config: DashboardConfig,
    pub provider: Arc<dyn DataProvider>,
    pub snapshots: SnapshotCache,
    pub auth: Arc<AuthGate>,
    pub theme: Arc<ThemeService>,
    pub exports: ExportWriter,
    /// Last good dashboard snapshot, shared with the refresh job
    pub latest: SharedSnapshot,
}

impl DashboardState {
    pub fn new(
        config: DashboardConfig,
        provider: Arc<dyn DataProvider>,
        persistent: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        let auth = AuthGate::new(persistent.clone(), session);
        let theme = ThemeService::load(persistent, config.prefers_dark);

        Self {
            snapshots: SnapshotCache::new(config.refresh_interval * 10),
            exports: ExportWriter::new(config.export_dir.clone()),
            latest: SharedSnapshot::default(),
            auth: Arc::new(auth),
            theme: Arc::new(theme),
            provider,
            config,
        }
    }

    /// Seeded mock backend plus file-backed persistent storage.
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        let latency = if config.simulate_latency {
            LatencyProfile::simulated()
        } else {
            LatencyProfile::instant()
        };
        let provider = MockDataProvider::new(Arc::new(MockStore::seeded()), latency);
        let persistent = FileKvStore::open(config.storage_path.clone())?;

        Ok(Self::new(
            config,
            Arc::new(provider),
            Arc::new(persistent),
            Arc::new(MemoryKvStore::new()),
        ))
    }
}

#[macro_use]
pub mod models;

pub mod config;
pub mod error;

pub mod services {
    pub mod aggregates;
    pub mod auth;
    pub mod dashboard;
    pub mod data_provider;
    pub mod export;
    pub mod kv_store;
    pub mod mock_store;
    pub mod role_workflow;
    pub mod seed;
    pub mod snapshot_cache;
    pub mod supply_chain;
    pub mod theme;
    pub mod view_pipeline;
}

pub mod handlers;
pub mod jobs;
