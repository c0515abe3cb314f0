pub mod summarize;

pub use summarize::{SummarizeRequest, EMPTY_TRANSCRIPT_DETAIL};
