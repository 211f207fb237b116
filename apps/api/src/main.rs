mod analysis;
mod config;
mod errors;
mod history;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, HistoryBackend};
use crate::history::kv::{FileKv, KeyValueStore, MemoryKv, RedisKv};
use crate::history::store::AnalysisStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Placement API v{}", env!("CARGO_PKG_VERSION"));

    let kv = build_history_backend(&config)?;
    let state = AppState {
        store: AnalysisStore::new(kv),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the key-value backend selected by `HISTORY_BACKEND`.
fn build_history_backend(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.history_backend {
        HistoryBackend::Redis(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis history backend initialized");
            Ok(Arc::new(RedisKv::new(client)))
        }
        HistoryBackend::File(path) => Ok(Arc::new(FileKv::new(path.clone()))),
        HistoryBackend::Memory => {
            info!("In-memory history backend initialized; history will not survive restarts");
            Ok(Arc::new(MemoryKv::new()))
        }
    }
}
