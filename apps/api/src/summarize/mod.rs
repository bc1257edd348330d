// Summarization: an ordered strategy chain that always yields a summary.
//
// Remote (when requested): client installed → credential present → provider
// call. Each step either produces the summary or a `RemoteSkip` reason, which
// becomes the response warning. Local: extractive TextRank, then naive
// truncation.

#[cfg(feature = "textrank")]
pub mod extractive;
pub mod handlers;
pub mod prompts;
pub mod remote;
pub mod truncate;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::summarize::remote::{RemoteProviderError, RemoteSummarizer};

pub const DEFAULT_MAX_SENTENCES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryOutcome {
    pub summary: String,
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Failures that escape the strategy chain.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("max_sentences must be at least 1")]
    InvalidMaxSentences,

    #[error("local summarizer task failed: {0}")]
    LocalWorker(String),
}

/// How the remote tier is wired, decided once at startup.
#[derive(Clone)]
pub enum RemoteBackend {
    /// Built without the `remote` feature.
    NotInstalled,
    /// No `OPENAI_API_KEY` configured.
    MissingCredential,
    Ready(Arc<dyn RemoteSummarizer>),
}

impl RemoteBackend {
    #[cfg(feature = "remote")]
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        use crate::llm_client::LlmClient;
        use std::time::Duration;

        Ok(match &config.openai_api_key {
            Some(key) => RemoteBackend::Ready(Arc::new(LlmClient::new(
                key.clone(),
                config.openai_api_url.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?)),
            None => RemoteBackend::MissingCredential,
        })
    }

    #[cfg(not(feature = "remote"))]
    pub fn from_config(_config: &Config) -> anyhow::Result<Self> {
        Ok(RemoteBackend::NotInstalled)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            RemoteBackend::NotInstalled => "not installed",
            RemoteBackend::MissingCredential => "no credential",
            RemoteBackend::Ready(_) => "ready",
        }
    }
}

/// Why the remote tier handed over to the local one.
#[derive(Debug)]
enum RemoteSkip {
    NotInstalled,
    MissingCredential,
    Failed(RemoteProviderError),
}

impl RemoteSkip {
    fn warning(&self) -> String {
        match self {
            RemoteSkip::NotInstalled => "remote summarization client not installed".to_string(),
            RemoteSkip::MissingCredential => "OPENAI_API_KEY not set".to_string(),
            RemoteSkip::Failed(e) => format!("remote provider error: {e}"),
        }
    }
}

pub struct Summarizer {
    remote: RemoteBackend,
}

impl Summarizer {
    pub fn new(remote: RemoteBackend) -> Self {
        Self { remote }
    }

    pub async fn summarize(
        &self,
        text: &str,
        max_sentences: usize,
        use_remote: bool,
    ) -> Result<SummaryOutcome, SummarizeError> {
        if max_sentences == 0 {
            return Err(SummarizeError::InvalidMaxSentences);
        }

        let warning = if use_remote {
            match self.try_remote(text, max_sentences).await {
                Ok(summary) => {
                    return Ok(SummaryOutcome {
                        summary,
                        provider: Provider::Remote,
                        warning: None,
                    })
                }
                Err(skip) => {
                    warn!("Remote summary skipped: {skip:?}");
                    Some(skip.warning())
                }
            }
        } else {
            None
        };

        let summary = run_local(text, max_sentences).await?;
        Ok(SummaryOutcome {
            summary,
            provider: Provider::Local,
            warning,
        })
    }

    async fn try_remote(&self, text: &str, max_sentences: usize) -> Result<String, RemoteSkip> {
        match &self.remote {
            RemoteBackend::NotInstalled => Err(RemoteSkip::NotInstalled),
            RemoteBackend::MissingCredential => Err(RemoteSkip::MissingCredential),
            RemoteBackend::Ready(client) => client
                .summarize(text, max_sentences)
                .await
                .map_err(RemoteSkip::Failed),
        }
    }
}

/// Runs the CPU-bound local tier on the blocking pool.
async fn run_local(text: &str, max_sentences: usize) -> Result<String, SummarizeError> {
    let text = text.to_owned();
    tokio::task::spawn_blocking(move || local_summary(&text, max_sentences))
        .await
        .map_err(|e| SummarizeError::LocalWorker(e.to_string()))
}

/// Local tier: extractive ranking when available, truncation otherwise.
pub fn local_summary(text: &str, max_sentences: usize) -> String {
    extractive_summary(text, max_sentences)
        .unwrap_or_else(|| truncate::truncate(text, max_sentences))
}

#[cfg(feature = "textrank")]
fn extractive_summary(text: &str, max_sentences: usize) -> Option<String> {
    match extractive::summarize(text, max_sentences) {
        Ok(summary) => Some(summary),
        Err(e) => {
            debug!("Extractive summary failed ({e}); truncating");
            None
        }
    }
}

#[cfg(not(feature = "textrank"))]
fn extractive_summary(_text: &str, _max_sentences: usize) -> Option<String> {
    debug!("Extractive summaries not built in; truncating");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const NOTES: &str = "Cats are small pets. Dogs are loyal pets. \
        Cats and dogs are popular pets in many homes. The weather was sunny.";

    struct FixedRemote(&'static str);

    #[async_trait]
    impl RemoteSummarizer for FixedRemote {
        async fn summarize(&self, _: &str, _: usize) -> Result<String, RemoteProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingRemote;

    #[async_trait]
    impl RemoteSummarizer for FailingRemote {
        async fn summarize(&self, _: &str, _: usize) -> Result<String, RemoteProviderError> {
            Err(RemoteProviderError(
                "API error (status 401): Incorrect API key provided".to_string(),
            ))
        }
    }

    fn summarizer(remote: RemoteBackend) -> Summarizer {
        Summarizer::new(remote)
    }

    #[tokio::test]
    async fn test_local_only_never_warns() {
        let outcome = summarizer(RemoteBackend::MissingCredential)
            .summarize(NOTES, 2, false)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert!(outcome.warning.is_none());
        assert!(!outcome.summary.is_empty());
    }

    #[tokio::test]
    async fn test_local_only_ignores_ready_remote() {
        let outcome = summarizer(RemoteBackend::Ready(Arc::new(FixedRemote("remote"))))
            .summarize(NOTES, 2, false)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
    }

    #[tokio::test]
    async fn test_not_installed_falls_back_with_warning() {
        let outcome = summarizer(RemoteBackend::NotInstalled)
            .summarize(NOTES, 2, true)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert_eq!(
            outcome.warning.as_deref(),
            Some("remote summarization client not installed")
        );
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back_with_warning() {
        let outcome = summarizer(RemoteBackend::MissingCredential)
            .summarize(NOTES, 2, true)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert!(outcome.warning.unwrap().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_remote_success() {
        let outcome = summarizer(RemoteBackend::Ready(Arc::new(FixedRemote("Pets are common."))))
            .summarize(NOTES, 2, true)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SummaryOutcome {
                summary: "Pets are common.".to_string(),
                provider: Provider::Remote,
                warning: None,
            }
        );
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_with_detail() {
        let outcome = summarizer(RemoteBackend::Ready(Arc::new(FailingRemote)))
            .summarize(NOTES, 2, true)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert_eq!(outcome.summary, local_summary(NOTES, 2));
        let warning = outcome.warning.unwrap();
        assert!(warning.starts_with("remote provider error:"));
        assert!(warning.contains("Incorrect API key"));
    }

    #[cfg(feature = "remote")]
    #[tokio::test]
    async fn test_unreachable_provider_falls_back() {
        let client = crate::llm_client::LlmClient::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let outcome = summarizer(RemoteBackend::Ready(Arc::new(client)))
            .summarize(NOTES, 1, true)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert!(outcome.warning.unwrap().starts_with("remote provider error: HTTP error"));
    }

    #[tokio::test]
    async fn test_zero_sentences_is_rejected() {
        let result = summarizer(RemoteBackend::MissingCredential)
            .summarize(NOTES, 0, false)
            .await;
        assert!(matches!(result, Err(SummarizeError::InvalidMaxSentences)));
    }

    #[tokio::test]
    async fn test_empty_text_summarizes_to_empty() {
        let outcome = summarizer(RemoteBackend::MissingCredential)
            .summarize("", 3, false)
            .await
            .unwrap();
        assert_eq!(outcome.summary, "");
    }

    #[test]
    fn test_outcome_omits_absent_warning() {
        let json = serde_json::to_value(SummaryOutcome {
            summary: "s".to_string(),
            provider: Provider::Local,
            warning: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"summary": "s", "provider": "local"}));
    }

    #[cfg(feature = "textrank")]
    #[test]
    fn test_local_summary_prefers_extractive_ranking() {
        assert_eq!(
            local_summary(NOTES, 1),
            "Cats and dogs are popular pets in many homes."
        );
    }

    #[cfg(feature = "textrank")]
    #[test]
    fn test_unrankable_text_falls_back_to_truncation() {
        // No alphanumeric sentence for the ranker, but one period fragment.
        let text = "--- ; ---. ***";
        assert!(extractive::summarize(text, 1).is_err());
        assert_eq!(truncate::truncate(text, 1), "--- ; ---.");
        assert_eq!(local_summary(text, 1), "--- ; ---.");
    }

    #[cfg(feature = "textrank")]
    #[tokio::test]
    async fn test_oversized_text_falls_back_to_truncation() {
        let text = "Rust code. ".repeat(extractive::MAX_RANKED_SENTENCES + 1);
        let outcome = summarizer(RemoteBackend::MissingCredential)
            .summarize(&text, 2, false)
            .await
            .unwrap();
        assert_eq!(outcome.provider, Provider::Local);
        assert_eq!(outcome.summary, "Rust code. Rust code.");
        assert_eq!(outcome.summary, truncate::truncate(&text, 2));
    }

    #[cfg(not(feature = "textrank"))]
    #[test]
    fn test_local_summary_truncates_without_ranking() {
        assert_eq!(local_summary("A. B. C. D.", 2), "A. B.");
    }
}
