//! Result record model: the outcome of one prompt.
//!
//! Maps to the `results` table; `prompt_id` is unique, so each prompt has exactly one result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PromptRecord;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResultRecord {
    pub id: String,
    pub prompt_id: String,
    pub successful: bool,
    /// Answer text on success, error description otherwise.
    pub text: String,
    pub tokens: i64,
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    /// Creates the result row belonging to `prompt`.
    pub fn for_prompt(prompt: &PromptRecord, successful: bool, text: String, tokens: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt_id: prompt.id.clone(),
            successful,
            text,
            tokens: i64::from(tokens),
            created_at: Utc::now(),
        }
    }
}
