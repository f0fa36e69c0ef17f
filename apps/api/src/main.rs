mod config;
mod documents;
mod editor;
mod errors;
mod routes;
mod schemas;
mod state;

use anyhow::{Context, Result};
use resume_schema::SchemaRegistry;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},resume_schema={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume schema API v{}", env!("CARGO_PKG_VERSION"));

    // Built-in schemas and context builders
    let registry = SchemaRegistry::builtin().context("Failed to build the schema registry")?;
    info!("Schema registry initialized ({} schemas)", registry.len());

    let state = AppState::new(registry, config.clone())
        .context("MIGRATION_CACHE_CAPACITY must be greater than zero")?;
    info!(
        "Migration cache capacity {}, validation {}",
        config.migration_cache_capacity,
        if config.validate_migrations { "on" } else { "off" }
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
