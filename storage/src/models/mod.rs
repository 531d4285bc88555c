//! Row models for the request log.

mod prompt_record;
mod request_stats;
mod result_record;

pub use prompt_record::PromptRecord;
pub use request_stats::RequestStats;
pub use result_record::ResultRecord;
