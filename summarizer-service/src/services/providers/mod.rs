//! Text-generation provider abstractions and implementations.
//!
//! The summarizer talks to the upstream API only through [`TextProvider`], so
//! tests can swap in [`mock::MockTextProvider`] for the real client.

pub mod chat_completions;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Upstream answered with a status other than 200.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Upstream answered 200 but the body is not a usable completion.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Upstream timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Upstream { .. } => "upstream_status",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::Timeout => "timeout",
            ProviderError::NetworkError(_) => "network",
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One role-tagged message in the upstream envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for chat-style text generation backends.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider label for logs and metrics.
    fn name(&self) -> &'static str;

    /// Send `messages` upstream and return the generated content verbatim.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}
