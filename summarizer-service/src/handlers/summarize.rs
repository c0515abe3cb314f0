use crate::dtos::SummarizeRequest;
use crate::services::metrics::record_summarize_request;
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

/// `POST /summarize`: relay a transcript upstream and return the trimmed summary
/// as a bare JSON string.
#[tracing::instrument(skip_all)]
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<String>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        record_summarize_request("malformed");
        tracing::debug!(reason = %rejection.body_text(), "Rejected summarize body");
        AppError::UnprocessableEntity(rejection.body_text())
    })?;

    let summary = state.summarizer.summarize(&request).await?;

    Ok(Json(summary))
}
