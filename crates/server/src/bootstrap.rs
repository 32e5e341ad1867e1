use std::sync::Arc;

use ounibot_actions::{default_registry, ActionRegistry};
use ounibot_core::config::{AppConfig, ConfigError};
use ounibot_db::{connect_lazy_with_settings, DbPool, SqlCatalogStore};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub registry: Arc<ActionRegistry>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database pool configuration failed: {0}")]
    DatabasePool(#[source] sqlx::Error),
}

/// Wires the catalog store and the action registry. The pool connects on
/// first use, so an unreachable database file does not stop the server from
/// starting; each action call reports it instead.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_lazy_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .map_err(BootstrapError::DatabasePool)?;
    info!(
        event_name = "system.bootstrap.database_configured",
        correlation_id = "bootstrap",
        max_connections = config.database.max_connections,
        "catalog database pool configured"
    );

    let registry = Arc::new(default_registry(Arc::new(SqlCatalogStore::new(db_pool.clone()))));
    info!(
        event_name = "system.bootstrap.registry_ready",
        correlation_id = "bootstrap",
        actions = ?registry.identifiers(),
        "action registry ready"
    );

    Ok(Application { config, db_pool, registry })
}
