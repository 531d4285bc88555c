//! Sends bot notices (HTML) and the typing indicator; failures are logged, not propagated.

use std::sync::Arc;
use tracing::{debug, error};

use crate::core::{Bot, Chat, Result, TextFormat};

#[derive(Clone)]
pub struct Notifier {
    bot: Arc<dyn Bot>,
    verbose: bool,
}

impl Notifier {
    pub fn new(bot: Arc<dyn Bot>, verbose: bool) -> Self {
        Self { bot, verbose }
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn typing(&self, chat: &Chat) {
        if let Err(e) = self.bot.send_typing(chat).await {
            debug!(error = %e, chat_id = chat.id, "failed to send typing action");
        }
    }

    /// Typing indicator, then `text` as HTML.
    pub async fn send(&self, chat: &Chat, text: &str, reply_to: Option<i32>) -> Result<()> {
        self.typing(chat).await;

        if self.verbose {
            debug!(chat_id = chat.id, text = %text, "[verbose] sending message");
        }

        self.bot
            .send_text(chat, text, reply_to, TextFormat::Html)
            .await
    }

    pub async fn send_or_log(&self, chat: &Chat, text: &str, reply_to: Option<i32>) {
        if let Err(e) = self.send(chat, text, reply_to).await {
            error!(error = %e, chat_id = chat.id, "failed to send message");
        }
    }
}
