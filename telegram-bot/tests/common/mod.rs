//! Shared test doubles: a recording [`Bot`] and a scripted [`LlmClient`].

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use llm_client::{Completion, LlmClient, TokenUsage};
use prompt::ChatMessage;
use std::collections::HashMap;
use std::sync::Mutex;
use telegram_chatgpt_bot::{Bot, BotError, Chat, Document, Message, Result, TextFormat, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Typing { chat_id: i64 },
    Text {
        chat_id: i64,
        text: String,
        reply_to: Option<i32>,
        format: TextFormat,
    },
    Document {
        chat_id: i64,
        file_name: String,
        content: Vec<u8>,
        caption: String,
        reply_to: Option<i32>,
    },
}

/// Records every outbound call. Plain-text, HTML notice and document sends can be made to fail.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    documents: HashMap<String, Vec<u8>>,
    fail_plain_text: bool,
    fail_notices: bool,
    fail_documents: bool,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, file_id: &str, content: &[u8]) -> Self {
        self.documents.insert(file_id.to_string(), content.to_vec());
        self
    }

    pub fn failing_plain_text(mut self) -> Self {
        self.fail_plain_text = true;
        self
    }

    pub fn failing_notices(mut self) -> Self {
        self.fail_notices = true;
        self
    }

    pub fn failing_documents(mut self) -> Self {
        self.fail_documents = true;
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text and document sends, without typing indicators.
    pub fn deliveries(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| !matches!(s, Sent::Typing { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Typing { chat_id: chat.id });
        Ok(())
    }

    async fn send_text(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<i32>,
        format: TextFormat,
    ) -> Result<()> {
        if self.fail_plain_text && format == TextFormat::Plain {
            return Err(BotError::Bot("Forbidden: bot was blocked by the user".into()));
        }
        if self.fail_notices && format == TextFormat::Html {
            return Err(BotError::Bot("Bad Request: chat not found".into()));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
            reply_to,
            format,
        });
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
        if self.fail_documents {
            return Err(BotError::Bot("Request Entity Too Large".into()));
        }
        self.sent.lock().unwrap().push(Sent::Document {
            chat_id: chat.id,
            file_name: file_name.to_string(),
            content,
            caption: caption.to_string(),
            reply_to,
        });
        Ok(())
    }

    async fn download_document(&self, document: &Document) -> Result<Vec<u8>> {
        self.documents
            .get(&document.file_id)
            .cloned()
            .ok_or_else(|| BotError::Bot(format!("file not found: {}", document.file_id)))
    }
}

/// Answers every request with a fixed reply (or error) and records what it was asked.
pub struct ScriptedLlm {
    reply: std::result::Result<Completion, String>,
    calls: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl ScriptedLlm {
    pub fn answering(answer: &str, prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            reply: Ok(Completion {
                answer: answer.to_string(),
                usage: TokenUsage {
                    prompt_tokens,
                    completion_tokens,
                },
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Vec<ChatMessage>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, messages: Vec<ChatMessage>, user: &str) -> anyhow::Result<Completion> {
        self.calls
            .lock()
            .unwrap()
            .push((messages, user.to_string()));
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub const CHAT_ID: i64 = 1000;

pub fn user(username: Option<&str>) -> User {
    User {
        id: 42,
        username: username.map(String::from),
        first_name: Some("Alice".into()),
        last_name: None,
        is_bot: false,
    }
}

pub fn text_message(id: i32, username: Option<&str>, text: &str) -> Message {
    Message {
        id,
        user: user(username),
        chat: Chat {
            id: CHAT_ID,
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

pub fn document_message(id: i32, username: Option<&str>, file_id: &str) -> Message {
    let mut message = text_message(id, username, "");
    message.text = None;
    message.document = Some(Document {
        file_id: file_id.to_string(),
        file_name: Some("input.txt".into()),
        mime_type: Some("text/plain".into()),
        file_size: 0,
    });
    message
}
