mod config;
mod db;
mod errors;
#[cfg(feature = "remote")]
mod llm_client;
mod models;
mod recommend;
mod routes;
mod state;
mod summarize;
mod tracker;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::recommend::Ranker;
use crate::routes::build_router;
use crate::state::AppState;
use crate::summarize::{RemoteBackend, Summarizer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillStack API v{}", env!("CARGO_PKG_VERSION"));

    // Open SQLite and bring the schema up to date
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    info!("Database schema ready");

    let ranker = Ranker::default();
    info!("Resource catalog loaded ({} entries)", ranker.catalog().len());

    let remote = RemoteBackend::from_config(&config)?;
    info!("Remote summarization: {}", remote.describe());
    let summarizer = Summarizer::new(remote);

    let state = AppState {
        db,
        ranker: Arc::new(ranker),
        summarizer: Arc::new(summarizer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
