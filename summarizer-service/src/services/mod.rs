pub mod metrics;
pub mod providers;
pub mod summarizer;

pub use metrics::{get_metrics, init_metrics};
pub use summarizer::{SummarizeError, Summarizer, PROMPT_PREFIX};
