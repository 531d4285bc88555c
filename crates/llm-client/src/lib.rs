//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. Transport-agnostic;
//! the bot's conversation handler depends only on the trait so tests can substitute a fake.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod openai_llm;

pub use openai_client::TokenUsage;
pub use openai_llm::{OpenAILlmClient, DEFAULT_MODEL, NO_RESPONSE_PLACEHOLDER};

/// Answer text plus the usage the API reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub answer: String,
    pub usage: TokenUsage,
}

/// LLM client interface: one completion from an ordered list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the reply for `messages`; `user` identifies the end user to the API.
    /// Errors are returned as-is; callers decide how to report them.
    async fn complete(&self, messages: Vec<ChatMessage>, user: &str) -> Result<Completion>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
pub fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
