use serde::Deserialize;
use validator::Validate;

/// Detail returned when the transcript is empty.
pub const EMPTY_TRANSCRIPT_DETAIL: &str = "Bad request, text cannot be empty";

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SummarizeRequest {
    #[validate(length(min = 1, message = "Bad request, text cannot be empty"))]
    pub transcript: String,
}

impl SummarizeRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}
