pub mod anthropic_client;
pub mod llm_client;
pub mod prompts;

pub use anthropic_client::AnthropicClient;
pub use llm_client::{CompletionRequest, LlmClient};
