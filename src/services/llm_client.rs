use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;

/// A single system + user completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user_message: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user_message: user_message.into(),
            max_tokens: 1024,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Request body for the Anthropic Messages API
    pub fn into_value(self) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": self.system,
            "messages": [
                { "role": "user", "content": self.user_message }
            ],
        })
    }
}

/// Text completion backend used by the planner.
#[async_trait]
pub trait LlmClient: Send + Sync + std::fmt::Debug {
    /// Issue one request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
