use std::sync::Arc;

use sqlx::SqlitePool;

use crate::recommend::Ranker;
use crate::summarize::Summarizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Ranker over the static resource catalog, built once at startup.
    pub ranker: Arc<Ranker>,
    pub summarizer: Arc<Summarizer>,
}
