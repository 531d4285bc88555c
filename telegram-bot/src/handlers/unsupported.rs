use async_trait::async_trait;
use tracing::{info, instrument};

use super::Notifier;
use crate::core::{Handler, HandlerResponse, Message, Result};
use crate::router::{route, Route};

pub const MSG_TYPE_NOT_SUPPORTED: &str = "Not a supported message type.";

/// Replies to messages no other handler can use (stickers, photos, edited documents, ...).
pub struct UnsupportedHandler {
    notifier: Notifier,
}

impl UnsupportedHandler {
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Handler for UnsupportedHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if route(message) != Route::Unsupported {
            return Ok(HandlerResponse::Continue);
        }

        info!(message_id = message.id, chat_id = message.chat.id, "unsupported message type");
        self.notifier
            .send_or_log(&message.chat, MSG_TYPE_NOT_SUPPORTED, Some(message.id))
            .await;
        Ok(HandlerResponse::Stop)
    }
}
