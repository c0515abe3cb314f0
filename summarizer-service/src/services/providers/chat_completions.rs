//! Chat-completions upstream client.
//!
//! Posts `{"messages": [...]}` with a bearer credential and reads
//! `choices[0].message.content` back.

use super::{ChatMessage, ProviderError, TextProvider};
use crate::config::UpstreamConfig;
use crate::services::metrics::record_upstream_latency;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Client for the configured chat-completions endpoint.
pub struct ChatCompletionsProvider {
    config: UpstreamConfig,
    client: Client,
}

impl ChatCompletionsProvider {
    /// Build the provider with one pooled client bounded by the configured timeout.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl TextProvider for ChatCompletionsProvider {
    fn name(&self) -> &'static str {
        "chat_completions"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest { messages };

        tracing::debug!(
            host = self.config.api_url.host_str().unwrap_or("-"),
            message_count = messages.len(),
            prompt_len = messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Sending request to upstream"
        );

        let started = Instant::now();

        let response = self
            .client
            .post(self.config.api_url.clone())
            .bearer_auth(self.config.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await;

        record_upstream_latency(status.as_str(), started.elapsed().as_secs_f64());

        if status != StatusCode::OK {
            let body = body.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body_len = body.len(),
                "Upstream returned an error status"
            );
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body.map_err(transport_error)?)
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::NetworkError(err.to_string())
    }
}

/// Pull `choices[0].message.content` out of a 200 body.
fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::MalformedResponse(format!(
            "expected choices[0].message.content: {}",
            e
        ))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse("choices is empty".to_string()))
}

// ============================================================================
// Upstream Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}
