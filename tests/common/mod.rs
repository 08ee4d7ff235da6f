use std::sync::Arc;
use std::time::Duration;

use agrichain_dashboard::DashboardState;
use agrichain_dashboard::config::DashboardConfig;
use agrichain_dashboard::services::data_provider::{LatencyProfile, MockDataProvider};
use agrichain_dashboard::services::kv_store::MemoryKvStore;
use agrichain_dashboard::services::mock_store::MockStore;
use tempfile::TempDir;

/// A dashboard wired to an instant mock provider and in-memory storage.
/// Keeps a handle on the provider so tests can take it offline.
pub struct TestApp {
    pub state: DashboardState,
    pub provider: MockDataProvider,
    pub persistent: Arc<MemoryKvStore>,
    pub session: Arc<MemoryKvStore>,
    #[allow(dead_code)]
    pub export_dir: TempDir,
}

pub fn test_config(export_dir: &TempDir) -> DashboardConfig {
    DashboardConfig {
        refresh_interval: Duration::from_secs(1),
        export_dir: export_dir.path().join("exports"),
        storage_path: export_dir.path().join("storage.json"),
        simulate_latency: false,
        ..DashboardConfig::default()
    }
}

pub fn setup_with_store(store: MockStore) -> TestApp {
    let export_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let provider = MockDataProvider::new(Arc::new(store), LatencyProfile::instant());
    let persistent = Arc::new(MemoryKvStore::new());
    let session = Arc::new(MemoryKvStore::new());

    let state = DashboardState::new(
        test_config(&export_dir),
        Arc::new(provider.clone()),
        persistent.clone(),
        session.clone(),
    );

    TestApp {
        state,
        provider,
        persistent,
        session,
        export_dir,
    }
}

pub fn setup() -> TestApp {
    setup_with_store(MockStore::seeded())
}
