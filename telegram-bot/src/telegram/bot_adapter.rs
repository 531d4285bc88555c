//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use async_trait::async_trait;
use std::time::Duration;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, FileId, InputFile, MessageId, ParseMode, ReplyParameters};
use tracing::debug;

use crate::core::{Bot as CoreBot, BotError, Chat, Document, Result, TextFormat};

/// Upper bound for fetching a document's content.
pub const DOCUMENT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: impl std::fmt::Display) -> BotError {
    BotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_text(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<i32>,
        format: TextFormat,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(id) = reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat: &Chat,
        file_name: &str,
        content: Vec<u8>,
        caption: &str,
        reply_to: Option<i32>,
    ) -> Result<()> {
        let file = InputFile::memory(content).file_name(file_name.to_string());
        let mut request = self
            .bot
            .send_document(ChatId(chat.id), file)
            .caption(caption.to_string());
        if let Some(id) = reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn download_document(&self, document: &Document) -> Result<Vec<u8>> {
        let fetch = async {
            let file = self
                .bot
                .get_file(FileId(document.file_id.clone()))
                .await
                .map_err(|e| BotError::Bot(format!("Failed to get document: {}", e)))?;
            debug!(file_id = %document.file_id, path = %file.path, "downloading document");

            let mut buf = Vec::with_capacity(document.file_size as usize);
            self.bot
                .download_file(&file.path, &mut buf)
                .await
                .map_err(bot_error)?;
            Ok::<_, BotError>(buf)
        };

        tokio::time::timeout(DOCUMENT_FETCH_TIMEOUT, fetch)
            .await
            .map_err(|_| {
                BotError::Bot(format!(
                    "Timed out reading document {} after {}s",
                    document.file_id,
                    DOCUMENT_FETCH_TIMEOUT.as_secs()
                ))
            })?
    }
}
