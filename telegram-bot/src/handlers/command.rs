use async_trait::async_trait;
use tracing::{error, info, instrument};

use super::Notifier;
use crate::commands::CommandRegistry;
use crate::core::{Handler, HandlerResponse, Message, Result};
use crate::router::{route, Route};

/// Executes slash commands through the [`CommandRegistry`] and sends the result as HTML.
pub struct CommandHandler {
    registry: CommandRegistry,
    notifier: Notifier,
}

impl CommandHandler {
    pub fn new(registry: CommandRegistry, notifier: Notifier) -> Self {
        Self { registry, notifier }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Route::Command { name, args } = route(message) else {
            return Ok(HandlerResponse::Continue);
        };

        info!(command = %name, chat_id = message.chat.id, "executing command");

        let (text, reply_to) = match self.registry.execute(&name, &args).await {
            Ok(output) => (
                output.text,
                output.reply_to_message.then_some(message.id),
            ),
            Err(e) => {
                error!(error = %e, command = %name, "command failed");
                (e.to_string(), Some(message.id))
            }
        };

        match self.notifier.send(&message.chat, &text, reply_to).await {
            Ok(()) => Ok(HandlerResponse::Reply(text)),
            Err(e) => {
                error!(error = %e, command = %name, "failed to send command reply");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
