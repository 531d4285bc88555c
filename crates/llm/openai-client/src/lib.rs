//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for a single, non-streamed chat completion.
//! Provides token masking for safe logging and returns the first choice together with the
//! token usage reported by the API.
//!
//! Requests are issued exactly once: the async-openai transient-error backoff is disabled and
//! the HTTP client carries a bounded timeout.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;
use std::time::Duration;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Default request timeout for completion calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Token usage reported by the API for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Result of one chat completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Content of the first choice. `None` when the API returned zero choices;
    /// `Some("")` when the first choice carried no text content.
    pub first_choice: Option<String>,
    pub usage: TokenUsage,
}

/// Connection settings for [`OpenAIClient`].
#[derive(Debug, Clone)]
pub struct OpenAIClientOptions {
    pub api_key: String,
    pub org_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl OpenAIClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        let org_id = org_id.into();
        self.org_id = (!org_id.is_empty()).then_some(org_id);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    /// Shared async-openai client used for all API calls.
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client from the given options.
    pub fn new(options: OpenAIClientOptions) -> anyhow::Result<Self> {
        let mut config = OpenAIConfig::new().with_api_key(options.api_key.clone());
        if let Some(org_id) = &options.org_id {
            config = config.with_org_id(org_id.clone());
        }
        if let Some(base_url) = &options.base_url {
            config = config.with_api_base(base_url.trim_end_matches('/').to_string());
        }

        let http_client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;

        // A zero elapsed-time budget turns every transient error into a permanent one.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(config)
            .with_http_client(http_client)
            .with_backoff(no_retry);

        Ok(Self {
            client: Arc::new(client),
            api_key_for_logging: options.api_key,
        })
    }

    /// Sends one chat completion request on behalf of `user`.
    ///
    /// Logs masked API key, request JSON (debug level) and token usage.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        user: &str,
    ) -> anyhow::Result<ChatCompletion> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            user = %user,
            api_key = %mask_token(&self.api_key_for_logging),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .user(user)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        let usage = response
            .usage
            .as_ref()
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        tracing::info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            choices = response.choices.len(),
            "OpenAI chat_completion usage"
        );

        let first_choice = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default());

        Ok(ChatCompletion {
            first_choice,
            usage,
        })
    }
}
