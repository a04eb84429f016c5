mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::{ProviderFactory, ProviderKind};
pub use open_ai::OpenAIProvider;
pub use prompt::{caption_message, page_text_message, RECIPE_EXTRACTION_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// Payload handed to the model alongside the system prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Text(String),
    /// Base64-encoded image bytes with their MIME type
    Image { data: String, media_type: String },
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Run one completion and return the raw text of the model's reply.
    async fn complete(
        &self,
        system_prompt: &str,
        input: &ModelInput,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
