// Remote summarization backend, pluggable behind a trait so the strategy
// chain can be exercised without network access.

use async_trait::async_trait;
use thiserror::Error;

/// Any failure talking to the remote provider, carrying its description.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RemoteProviderError(pub String);

#[async_trait]
pub trait RemoteSummarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        max_sentences: usize,
    ) -> Result<String, RemoteProviderError>;
}

#[cfg(feature = "remote")]
mod llm {
    use async_trait::async_trait;

    use super::{RemoteProviderError, RemoteSummarizer};
    use crate::llm_client::LlmClient;
    use crate::summarize::prompts::{summary_prompt, SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE};

    #[async_trait]
    impl RemoteSummarizer for LlmClient {
        async fn summarize(
            &self,
            text: &str,
            max_sentences: usize,
        ) -> Result<String, RemoteProviderError> {
            let prompt = summary_prompt(text, max_sentences);
            self.chat(&prompt, SUMMARY_TEMPERATURE, SUMMARY_MAX_TOKENS)
                .await
                .map_err(|e| RemoteProviderError(e.to_string()))
        }
    }
}
