//! OpenAI implementation of [`LlmClient`]: wraps openai-client, applies the default model and the
//! "no response" placeholder.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, Completion, LlmClient};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Answer substituted when the API returns zero choices.
pub const NO_RESPONSE_PLACEHOLDER: &str = "There was no response from OpenAI API.";

/// [`LlmClient`] backed by [`openai_client::OpenAIClient`].
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(client: openai_client::OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Sets the model; an empty or blank name keeps [`DEFAULT_MODEL`].
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>, user: &str) -> Result<Completion> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;

        let completion = self
            .client
            .chat_completion(&self.model, openai_messages, user)
            .await?;

        let answer = completion
            .first_choice
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string());

        Ok(Completion {
            answer,
            usage: completion.usage,
        })
    }
}
