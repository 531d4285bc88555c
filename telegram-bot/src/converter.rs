//! Turns inbound messages (and their reply parent) into chat-completion messages.

use prompt::ChatMessage;
use std::sync::Arc;
use tracing::{debug, error};

use crate::core::{Bot, Message};

pub struct MessageConverter {
    bot: Arc<dyn Bot>,
}

impl MessageConverter {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// The reply parent (if convertible) followed by `message` (if convertible).
    pub async fn chat_messages(&self, message: &Message) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(parent) = message.reply_to.as_deref() {
            if let Some(converted) = self.convert(parent).await {
                messages.push(converted);
            }
        }
        if let Some(converted) = self.convert(message).await {
            messages.push(converted);
        }
        messages
    }

    /// Converts one message; `None` when it has no text and its document cannot be read.
    pub async fn convert(&self, message: &Message) -> Option<ChatMessage> {
        let content = match message.text.as_deref() {
            Some(text) => text.to_string(),
            None => {
                let document = message.document.as_ref()?;
                match self.bot.download_document(document).await {
                    Ok(bytes) => decode_document_text(&bytes),
                    Err(e) => {
                        error!(
                            error = %e,
                            message_id = message.id,
                            file_id = %document.file_id,
                            "failed to read document content"
                        );
                        return None;
                    }
                }
            }
        };

        let converted = if message.is_from_automated_account() {
            ChatMessage::assistant(content)
        } else {
            ChatMessage::user(content)
        };
        debug!(message_id = message.id, role = %converted.role, "converted message");
        Some(converted)
    }
}

/// UTF-8 with invalid sequences replaced, surrounding whitespace trimmed.
pub fn decode_document_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BotError, Chat, Document, MockBot, User};
    use chrono::Utc;
    use prompt::MessageRole;

    fn text_message(id: i32, text: &str) -> Message {
        Message {
            id,
            user: User {
                id: 7,
                username: Some("alice".into()),
                first_name: Some("Alice".into()),
                ..User::default()
            },
            chat: Chat {
                id: 100,
                chat_type: "private".into(),
            },
            text: Some(text.to_string()),
            document: None,
            via_bot: None,
            edited: false,
            created_at: Utc::now(),
            reply_to: None,
        }
    }

    fn document_message(id: i32) -> Message {
        let mut message = text_message(id, "");
        message.text = None;
        message.document = Some(Document {
            file_id: "file-1".into(),
            file_name: Some("notes.txt".into()),
            mime_type: Some("text/plain".into()),
            file_size: 16,
        });
        message
    }

    #[test]
    fn test_decode_document_text() {
        assert_eq!(decode_document_text(b"  hello\n"), "hello");
        assert_eq!(decode_document_text(b"a\xffb"), "a\u{FFFD}b");
    }

    #[tokio::test]
    async fn test_reply_parent_comes_first_and_bot_parent_is_assistant() {
        let converter = MessageConverter::new(Arc::new(MockBot::new()));

        let mut parent = text_message(1, "earlier answer");
        parent.user.is_bot = true;
        let mut child = text_message(2, "follow-up");
        child.reply_to = Some(Box::new(parent));

        let messages = converter.chat_messages(&child).await;
        assert_eq!(
            messages,
            vec![
                ChatMessage::assistant("earlier answer"),
                ChatMessage::user("follow-up"),
            ]
        );
    }

    #[tokio::test]
    async fn test_via_inline_bot_is_assistant() {
        let converter = MessageConverter::new(Arc::new(MockBot::new()));
        let mut message = text_message(1, "inline result");
        message.via_bot = Some(User {
            id: 9,
            is_bot: true,
            ..User::default()
        });

        let converted = converter.convert(&message).await.unwrap();
        assert_eq!(converted.role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_document_content_is_downloaded() {
        let mut bot = MockBot::new();
        bot.expect_download_document()
            .withf(|doc| doc.file_id == "file-1")
            .times(1)
            .returning(|_| Ok(b"\n  file body  \n".to_vec()));
        let converter = MessageConverter::new(Arc::new(bot));

        let converted = converter.convert(&document_message(3)).await.unwrap();
        assert_eq!(converted, ChatMessage::user("file body"));
    }

    #[tokio::test]
    async fn test_failed_download_drops_message() {
        let mut bot = MockBot::new();
        bot.expect_download_document()
            .returning(|_| Err(BotError::Bot("timeout".into())));
        let converter = MessageConverter::new(Arc::new(bot));

        let mut child = text_message(2, "about this file");
        child.reply_to = Some(Box::new(document_message(1)));

        let messages = converter.chat_messages(&child).await;
        assert_eq!(messages, vec![ChatMessage::user("about this file")]);
    }
}
