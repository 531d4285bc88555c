//! Conversation relay: converts the message (and its reply parent), asks the completion API,
//! delivers the answer inline or as a file, and records the outcome in the request log.

use async_trait::async_trait;
use llm_client::{Completion, LlmClient};
use prompt::{messages_to_prompt, ChatMessage};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::Notifier;
use crate::converter::MessageConverter;
use crate::core::{Handler, HandlerResponse, Message, Result, TextFormat};
use crate::request_log::{RequestLog, RequestLogEntry};
use crate::router::{route, Route};

/// Longest answer sent as a text message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;
/// Characters of the answer shown in the caption of the answer file.
pub const CAPTION_CHARS: usize = 128;
pub const ANSWER_FILE_NAME: &str = "answer.txt";

pub const MSG_NO_USABLE_MESSAGES: &str =
    "Failed to get usable chat messages from your input. See the server logs for more information.";
pub const MSG_ANSWER_FAILED: &str =
    "Failed to generate an answer from OpenAI. See the server logs for more information.";
pub const MSG_SEND_FILE_FAILED: &str =
    "Failed to send you the answer as a text file. See the server logs for more information.";
pub const MSG_SEND_TEXT_FAILED: &str =
    "Failed to send you the answer as a text. See the server logs for more information.";

/// Value of the API `user` field for a Telegram user.
pub fn user_agent(user_id: i64) -> String {
    format!("telegram-chatgpt-bot:{}", user_id)
}

/// First [`CAPTION_CHARS`] characters of `answer` followed by `...`.
pub fn document_caption(answer: &str) -> String {
    let head: String = answer.chars().take(CAPTION_CHARS).collect();
    format!("{}...", head)
}

pub struct ConversationHandler {
    converter: MessageConverter,
    llm: Arc<dyn LlmClient>,
    notifier: Notifier,
    request_log: RequestLog,
}

impl ConversationHandler {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        notifier: Notifier,
        request_log: RequestLog,
    ) -> Self {
        Self {
            converter: MessageConverter::new(notifier.bot().clone()),
            llm,
            notifier,
            request_log,
        }
    }

    /// Sends `answer` as text, or as [`ANSWER_FILE_NAME`] when it exceeds [`MAX_MESSAGE_CHARS`].
    /// On failure returns the notice for the user and the error text.
    async fn deliver(
        &self,
        message: &Message,
        answer: &str,
    ) -> std::result::Result<(), (&'static str, String)> {
        let bot = self.notifier.bot();

        if answer.chars().count() > MAX_MESSAGE_CHARS {
            bot.send_document(
                &message.chat,
                ANSWER_FILE_NAME,
                answer.as_bytes().to_vec(),
                &document_caption(answer),
                Some(message.id),
            )
            .await
            .map_err(|e| {
                error!(error = %e, chat_id = message.chat.id, "failed to answer as file");
                (MSG_SEND_FILE_FAILED, e.to_string())
            })
        } else {
            bot.send_text(&message.chat, answer, Some(message.id), TextFormat::Plain)
                .await
                .map_err(|e| {
                    error!(error = %e, chat_id = message.chat.id, "failed to answer as text");
                    (MSG_SEND_TEXT_FAILED, e.to_string())
                })
        }
    }

    fn log_entry(&self, message: &Message, prompt: String) -> RequestLogEntry {
        RequestLogEntry {
            chat_id: message.chat.id,
            user_id: message.user.id,
            username: message.user.display_name(),
            prompt,
            prompt_tokens: 0,
            result: String::new(),
            result_tokens: 0,
            successful: false,
        }
    }

    async fn answer(&self, message: &Message, messages: Vec<ChatMessage>) -> HandlerResponse {
        let prompt = messages_to_prompt(&messages);
        let entry = self.log_entry(message, prompt);

        self.notifier.typing(&message.chat).await;

        let Completion { answer, usage } =
            match self.llm.complete(messages, &user_agent(message.user.id)).await {
                Ok(completion) => completion,
                Err(e) => {
                    error!(error = %e, chat_id = message.chat.id, "failed to create chat completion");
                    self.notifier
                        .send_or_log(&message.chat, MSG_ANSWER_FAILED, Some(message.id))
                        .await;
                    self.request_log
                        .save(RequestLogEntry {
                            result: e.to_string(),
                            ..entry
                        })
                        .await;
                    return HandlerResponse::Stop;
                }
            };

        if self.notifier.verbose() {
            debug!(chat_id = message.chat.id, prompt = %entry.prompt, answer = %answer, "[verbose] completion");
        }

        self.notifier.typing(&message.chat).await;

        let entry = RequestLogEntry {
            prompt_tokens: usage.prompt_tokens,
            result_tokens: usage.completion_tokens,
            ..entry
        };

        match self.deliver(message, &answer).await {
            Ok(()) => {
                info!(
                    chat_id = message.chat.id,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "answer delivered"
                );
                self.request_log
                    .save(RequestLogEntry {
                        result: answer.clone(),
                        successful: true,
                        ..entry
                    })
                    .await;
                HandlerResponse::Reply(answer)
            }
            Err((notice, send_error)) => {
                self.notifier
                    .send_or_log(&message.chat, notice, Some(message.id))
                    .await;
                self.request_log
                    .save(RequestLogEntry {
                        result: send_error,
                        ..entry
                    })
                    .await;
                HandlerResponse::Stop
            }
        }
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if route(message) != Route::Conversation {
            return Ok(HandlerResponse::Continue);
        }

        let messages = self.converter.chat_messages(message).await;
        if messages.is_empty() {
            info!(message_id = message.id, chat_id = message.chat.id, "no converted chat messages");
            self.notifier
                .send_or_log(&message.chat, MSG_NO_USABLE_MESSAGES, Some(message.id))
                .await;
            return Ok(HandlerResponse::Stop);
        }

        Ok(self.answer(message, messages).await)
    }
}
