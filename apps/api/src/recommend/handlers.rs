use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommend::{Recommendation, DEFAULT_TOP_K};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub q: Option<String>,
    pub top_k: Option<usize>,
}

/// GET /ai/recommend/?q=&top_k=
pub async fn handle_recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let query = params.q.unwrap_or_default();
    let top_k = params.top_k.unwrap_or(DEFAULT_TOP_K);

    let recs = state
        .ranker
        .recommend(&query, top_k)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(recs))
}
