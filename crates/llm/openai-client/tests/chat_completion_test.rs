//! Tests for [`openai_client::OpenAIClient::chat_completion`] against a mockito server.
//!
//! Covers first-choice extraction, zero choices, usage mapping, the `user` field and
//! single-attempt failure on an API error.

use mockito::Matcher;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, OpenAIClient,
    OpenAIClientOptions, TokenUsage,
};
use serde_json::json;

fn user_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()
        .expect("user message")
        .into()
}

fn client_for(server: &mockito::ServerGuard) -> OpenAIClient {
    OpenAIClient::new(
        OpenAIClientOptions::new("sk-test-0123456789abcdef")
            .with_org_id("org-test")
            .with_base_url(server.url()),
    )
    .expect("client")
}

fn completion_body(choices: serde_json::Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1706529600,
        "model": "gpt-3.5-turbo",
        "choices": choices,
        "usage": {"prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46}
    })
    .to_string()
}

/// **Test: First choice content and usage are returned; `user` and org header are sent.**
#[tokio::test]
async fn returns_first_choice_and_usage() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("openai-organization", "org-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "user": "telegram-chatgpt-bot:42"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!([
            {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
            {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
        ])))
        .create_async()
        .await;

    let completion = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hi")], "telegram-chatgpt-bot:42")
        .await
        .expect("completion");

    mock.assert_async().await;
    assert_eq!(completion.first_choice.as_deref(), Some("first"));
    assert_eq!(
        completion.usage,
        TokenUsage {
            prompt_tokens: 12,
            completion_tokens: 34
        }
    );
}

/// **Test: Zero choices map to `first_choice == None`.**
#[tokio::test]
async fn zero_choices_yield_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!([])))
        .create_async()
        .await;

    let completion = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hi")], "u")
        .await
        .expect("completion");

    assert!(completion.first_choice.is_none());
    assert_eq!(completion.usage.completion_tokens, 34);
}

/// **Test: An API error is returned after exactly one request.**
#[tokio::test]
async fn api_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hi")], "u")
        .await;

    assert!(result.is_err());
    mock.assert_async().await;
}
