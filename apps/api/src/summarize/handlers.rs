use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::AppState;
use crate::summarize::{SummaryOutcome, DEFAULT_MAX_SENTENCES};

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
    #[serde(default, alias = "use_remote")]
    pub use_openai: bool,
}

fn default_max_sentences() -> usize {
    DEFAULT_MAX_SENTENCES
}

/// Structured failure body. Summarization reports problems in-band rather
/// than with an error status.
#[derive(Debug, Serialize)]
pub struct SummarizeFailure {
    pub error: bool,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Summary(SummaryOutcome),
    Failure(SummarizeFailure),
}

/// POST /ai/summarize/
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    match state
        .summarizer
        .summarize(&req.text, req.max_sentences, req.use_openai)
        .await
    {
        Ok(outcome) => Json(SummarizeResponse::Summary(outcome)),
        Err(e) => {
            error!("Summarization failed: {e:?}");
            Json(SummarizeResponse::Failure(SummarizeFailure {
                error: true,
                message: e.to_string(),
                detail: format!("{e:?}"),
            }))
        }
    }
}
