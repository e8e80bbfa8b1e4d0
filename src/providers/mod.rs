mod anthropic;
mod factory;
mod google;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use crate::extraction::EncodedImage;
use async_trait::async_trait;
use std::error::Error;

/// What gets sent to a language model: instructions plus an optional image
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub image: Option<EncodedImage>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Prompt {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(text: impl Into<String>, image: EncodedImage) -> Self {
        Prompt {
            text: text.into(),
            image: Some(image),
        }
    }
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the model's raw text output
    async fn generate(&self, prompt: &Prompt) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Build a reqwest client, applying the timeout only when one is configured
pub(crate) fn http_client(
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Turn a non-2xx response into an error carrying the body
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, Box<dyn Error + Send + Sync>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("{} API error ({}): {}", provider, status, body).into())
}
