//! Allow-list gate and message logging, both run in the `before()` phase.

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Stops the chain unless the sender's handle is allowed. Rejection sends nothing.
pub struct AllowListHandler {
    allowed_users: HashSet<String>,
}

impl AllowListHandler {
    /// `allowed_users` are handles without a leading `@`.
    pub fn new(allowed_users: HashSet<String>) -> Self {
        Self { allowed_users }
    }

    pub fn is_allowed(&self, message: &Message) -> bool {
        message
            .user
            .username
            .as_deref()
            .is_some_and(|u| self.allowed_users.contains(u))
    }
}

#[async_trait]
impl Handler for AllowListHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if self.is_allowed(message) {
            return Ok(true);
        }

        warn!(
            user = %message.user.display_name(),
            chat_id = message.chat.id,
            "message not allowed"
        );
        Ok(false)
    }
}

/// Logs each accepted message in before() and the outcome in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            user = %message.user.display_name(),
            chat_id = message.chat.id,
            edited = message.edited,
            has_text = message.text.is_some(),
            has_document = message.document.is_some(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chat, User};
    use chrono::Utc;

    fn from(username: Option<&str>) -> Message {
        Message {
            id: 1,
            user: User {
                id: 5,
                username: username.map(String::from),
                first_name: Some("Eve".into()),
                ..User::default()
            },
            chat: Chat::default(),
            text: Some("hi".into()),
            document: None,
            via_bot: None,
            edited: false,
            created_at: Utc::now(),
            reply_to: None,
        }
    }

    fn handler() -> AllowListHandler {
        AllowListHandler::new(["alice".to_string()].into_iter().collect())
    }

    #[tokio::test]
    async fn test_allowed_handle_passes() {
        assert!(handler().before(&from(Some("alice"))).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_or_missing_handle_is_rejected() {
        assert!(!handler().before(&from(Some("mallory"))).await.unwrap());
        assert!(!handler().before(&from(None)).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_allow_list_rejects_everyone() {
        let handler = AllowListHandler::new(HashSet::new());
        assert!(!handler.before(&from(Some("alice"))).await.unwrap());
    }
}
