//! Summarization: validate the transcript, wrap it in the fixed prompt,
//! forward it once to the provider and trim the reply.

use crate::dtos::SummarizeRequest;
use crate::services::metrics::{record_summarize_request, record_upstream_error};
use crate::services::providers::{ChatMessage, ProviderError, TextProvider};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Prefix placed in front of every transcript.
pub const PROMPT_PREFIX: &str = "Please summarize the following content:\n\n";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Invalid transcript: {0}")]
    InvalidTranscript(#[from] ValidationErrors),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Build the single-message envelope for `transcript`.
pub fn build_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!("{}{}", PROMPT_PREFIX, transcript))]
}

#[derive(Clone)]
pub struct Summarizer {
    provider: Arc<dyn TextProvider>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Summarize one request. An invalid request never reaches the provider.
    pub async fn summarize(&self, request: &SummarizeRequest) -> Result<String, SummarizeError> {
        if let Err(errors) = request.validate() {
            record_summarize_request("invalid");
            return Err(errors.into());
        }

        let messages = build_messages(&request.transcript);

        match self.provider.complete(&messages).await {
            Ok(content) => {
                record_summarize_request("ok");
                let summary = content.trim().to_string();
                tracing::info!(
                    provider = self.provider.name(),
                    transcript_len = request.transcript.len(),
                    summary_len = summary.len(),
                    "Transcript summarized"
                );
                Ok(summary)
            }
            Err(e) => {
                record_summarize_request(e.kind());
                record_upstream_error(e.kind());
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Summarization failed"
                );
                Err(e.into())
            }
        }
    }
}
