//! Outbound transport seam. Production code talks to Telegram through
//! [`crate::telegram::TelegramBotAdapter`]; tests substitute another implementation.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Document};

/// How the platform should render a text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Sent verbatim (model answers).
    #[default]
    Plain,
    /// Parsed as Telegram HTML (bot notices and command replies).
    Html,
}

/// Operations the relay needs from the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bot: Send + Sync {
    /// Shows the "typing..." indicator in the chat.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;

    /// Sends `text`, replying to message `reply_to` when given.
    async fn send_text(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<i32>,
        format: TextFormat,
    ) -> Result<()>;

    /// Sends `content` as a downloadable file named `file_name`.
    async fn send_document(
        &self,
        chat: &Chat,
        file_name: &str,
        content: Vec<u8>,
        caption: &str,
        reply_to: Option<i32>,
    ) -> Result<()>;

    /// Fetches the bytes of an attached document.
    async fn download_document(&self, document: &Document) -> Result<Vec<u8>>;
}
