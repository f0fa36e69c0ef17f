use std::sync::Arc;

use resume_schema::{BoundedCache, SchemaRegistry};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::documents::MigrationCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only afterwards.
    pub registry: Arc<SchemaRegistry>,
    /// Migrated documents keyed by the stable hash of the legacy input.
    pub migration_cache: Arc<Mutex<MigrationCache>>,
    pub config: Config,
}

impl AppState {
    /// Returns `None` when the configured cache capacity is zero.
    pub fn new(registry: SchemaRegistry, config: Config) -> Option<Self> {
        let cache = BoundedCache::new(config.migration_cache_capacity)?;
        Some(Self {
            registry: Arc::new(registry),
            migration_cache: Arc::new(Mutex::new(cache)),
            config,
        })
    }
}
