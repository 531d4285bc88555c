//! Aggregate statistics over the request log.
//!
//! Returned by RequestLogRepository::get_stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    /// Timestamp of the oldest prompt.
    pub since: Option<DateTime<Utc>>,
    /// All prompt rows, including ones that never reached the API.
    pub total_prompts: i64,
    pub chats: i64,
    /// Prompts with a non-zero token count (i.e. answered by the API).
    pub prompts: i64,
    pub prompt_tokens: i64,
    pub completions: i64,
    pub completion_tokens: i64,
    pub errors: i64,
}

impl RequestStats {
    pub fn is_empty(&self) -> bool {
        self.total_prompts == 0
    }
}
