//! Translation of domain errors into HTTP errors.

use crate::dtos::EMPTY_TRANSCRIPT_DETAIL;
use crate::services::providers::ProviderError;
use crate::services::SummarizeError;
use axum::http::StatusCode;
use service_core::error::AppError;

impl From<SummarizeError> for AppError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::InvalidTranscript(_) => {
                AppError::BadRequest(anyhow::anyhow!(EMPTY_TRANSCRIPT_DETAIL))
            }
            SummarizeError::Provider(e) => e.into(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, body } => match StatusCode::from_u16(status) {
                Ok(status) => AppError::Upstream { status, body },
                Err(_) => AppError::BadGateway(format!(
                    "upstream returned invalid status {}",
                    status
                )),
            },
            ProviderError::MalformedResponse(msg) => {
                AppError::BadGateway(format!("malformed upstream response: {}", msg))
            }
            ProviderError::Timeout => {
                AppError::GatewayTimeout("upstream did not respond in time".to_string())
            }
            ProviderError::NetworkError(msg) => {
                AppError::BadGateway(format!("upstream unreachable: {}", msg))
            }
        }
    }
}
