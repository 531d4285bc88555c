//! # Prompt
//!
//! Role-tagged chat messages sent to the completion API, and the flat text form of a
//! request that is written to the request log.
//!
//! ## Log format
//!
//! Each message becomes `[{role}] {content}`; messages are joined with [`PROMPT_SEPARATOR`].
//!
//! ## External interactions
//!
//! - **AI models**: [`ChatMessage`] lists are converted to OpenAI request messages by `llm-client`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Separator placed between messages in the logged prompt text.
pub const PROMPT_SEPARATOR: &str = "\n--------\n";

/// Formats one message as a single log line block: `[role] content`.
pub fn format_message_line(message: &ChatMessage) -> String {
    format!("[{}] {}", message.role, message.content)
}

/// Flattens a request's messages into the prompt text stored in the request log.
///
/// Order is preserved (reply parent first, then the current message).
pub fn messages_to_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(format_message_line)
        .collect::<Vec<_>>()
        .join(PROMPT_SEPARATOR)
}
