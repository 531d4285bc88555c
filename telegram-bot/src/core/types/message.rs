//! Message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, document::Document, user::User};

/// A single inbound message with sender, chat, content and optional reply parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    /// Sender; `User::default()` (id 0, no handle) when the platform gave none.
    pub user: User,
    pub chat: Chat,
    /// Inline text; `None` for media-only messages.
    pub text: Option<String>,
    pub document: Option<Document>,
    /// Inline bot the message was sent through, if any.
    pub via_bot: Option<User>,
    /// True for edits of an earlier message.
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    /// The message this one replies to (one level only).
    pub reply_to: Option<Box<Message>>,
}

impl Message {
    /// Whether the message was produced by an automated account (bot sender or inline bot).
    pub fn is_from_automated_account(&self) -> bool {
        self.user.is_bot || self.via_bot.as_ref().is_some_and(|b| b.is_bot)
    }
}
