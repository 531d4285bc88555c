//! Prompt record model: one row per completion request.
//!
//! Maps to the `prompts` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PromptRecord {
    pub id: String,
    pub chat_id: i64,
    pub user_id: i64,
    pub username: String,
    pub text: String,
    /// Prompt tokens reported by the API; 0 when the request never got a response.
    pub tokens: i64,
    pub created_at: DateTime<Utc>,
}

impl PromptRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(chat_id: i64, user_id: i64, username: String, text: String, tokens: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chat_id,
            user_id,
            username,
            text,
            tokens: i64::from(tokens),
            created_at: Utc::now(),
        }
    }
}
