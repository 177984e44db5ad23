use leggo::config::DatabaseConfig;
use leggo::error::AppError;
use leggo::SqliteStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn open_store(config: &DatabaseConfig) -> Result<Arc<SqliteStore>, AppError> {
    let store = SqliteStore::open(&config.path)?;
    info!(path = %config.path.display(), "opened leggo database");
    Ok(Arc::new(store))
}
