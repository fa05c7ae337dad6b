use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::llm_client::{CompletionRequest, LlmClient};
use crate::error::{PlannerError, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client. One attempt per call, no retries.
#[derive(Clone, Debug)]
pub struct AnthropicClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| PlannerError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http,
        })
    }

    async fn send(&self, request: CompletionRequest) -> Result<String> {
        let url = build_messages_url(&self.base_url);
        debug!(%url, model = %request.model, max_tokens = request.max_tokens, "send: called");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request.into_value())
            .send()
            .await
            .map_err(|err| PlannerError::Network(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Network(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(PlannerError::Service {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            PlannerError::InvalidResponse(format!("Failed to parse JSON: {err}"))
        })?;

        extract_text(&response_json)
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.send(request).await
    }
}

fn build_messages_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1/messages") {
        trimmed.to_string()
    } else if trimmed.ends_with("/v1") {
        format!("{}/messages", trimmed)
    } else {
        format!("{}/v1/messages", trimmed)
    }
}

/// First `text` block of a Messages API response.
fn extract_text(response: &Value) -> Result<String> {
    let blocks = response
        .get("content")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            PlannerError::InvalidResponse("Missing 'content' array in message response".to_string())
        })?;

    blocks
        .iter()
        .find(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
        .and_then(|block| block.get("text"))
        .and_then(|text| text.as_str())
        .map(|text| text.to_string())
        .ok_or_else(|| {
            PlannerError::InvalidResponse("Message response contained no text block".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_messages_url() {
        assert_eq!(
            build_messages_url("https://api.anthropic.com"),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            build_messages_url("https://proxy.local/v1/"),
            "https://proxy.local/v1/messages"
        );
        assert_eq!(
            build_messages_url("https://proxy.local/v1/messages"),
            "https://proxy.local/v1/messages"
        );
    }

    #[test]
    fn test_extract_text_skips_non_text_blocks() {
        let response = json!({
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "{\"a\":1}" }
            ]
        });
        assert_eq!(extract_text(&response).unwrap(), "{\"a\":1}");

        let err = extract_text(&json!({ "content": [] })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RESPONSE");
    }

    #[tokio::test]
    async fn test_complete_sends_messages_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "sk-test")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 400,
                "system": "extract",
                "messages": [{ "role": "user", "content": "Goa for 2" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "msg_1",
                    "type": "message",
                    "role": "assistant",
                    "content": [{ "type": "text", "text": "{\"destination\":\"Goa\"}" }],
                    "stop_reason": "end_turn"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = AnthropicClient::new("sk-test", server.url()).unwrap();
        let request = CompletionRequest::new("claude-sonnet-4-20250514", "extract", "Goa for 2")
            .with_max_tokens(400);
        let text = client.complete(request).await.unwrap();

        assert_eq!(text, "{\"destination\":\"Goa\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_error_is_service_error_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "type": "error",
                    "error": { "type": "overloaded_error", "message": "Overloaded" }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = AnthropicClient::new("sk-test", server.url()).unwrap();
        let err = client
            .complete(CompletionRequest::new("m", "s", "u"))
            .await
            .unwrap_err();

        match err {
            PlannerError::Service { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("expected service error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = AnthropicClient::new("sk-test", "http://127.0.0.1:9").unwrap();
        let err = client
            .complete(CompletionRequest::new("m", "s", "u"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NETWORK_ERROR");
    }
}
