mod image;
mod prompt;
mod remote;
mod request;
mod response;

pub use image::{EncodedImage, ImageInput, SUPPORTED_IMAGE_TYPES};
pub use prompt::{build_prompt, instruction_for, INGREDIENT_RULES};
pub use remote::RemoteExtractionClient;
pub use request::ExtractionRequest;
pub use response::{ExtractionResult, MAX_INGREDIENTS};

use crate::config::AppConfig;
use crate::error::{PathfinderError, Result};
use crate::providers::{LlmProvider, ProviderFactory};
use async_trait::async_trait;
use log::{debug, error, info};

/// Anything that can turn a request into an ingredient list
#[async_trait]
pub trait IngredientSource: Send + Sync {
    async fn extract(&self, request: ExtractionRequest) -> Result<ExtractionResult>;
}

/// Talks to the language model directly.
///
/// One outbound call per request, never retried. Validation failures are
/// reported before anything leaves the process.
pub struct ExtractionClient {
    provider: Box<dyn LlmProvider>,
}

impl ExtractionClient {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        ExtractionClient { provider }
    }

    /// Use the default provider from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = ProviderFactory::get_default_provider(config)
            .map_err(|e| PathfinderError::ProviderSetup(e.to_string()))?;
        Ok(Self::new(provider))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}

#[async_trait]
impl IngredientSource for ExtractionClient {
    async fn extract(&self, request: ExtractionRequest) -> Result<ExtractionResult> {
        request.validate()?;

        let kind = request.kind();
        let prompt = build_prompt(request);
        debug!(
            "Requesting {} extraction from {}",
            kind,
            self.provider.provider_name()
        );

        let raw = self.provider.generate(&prompt).await.map_err(|e| {
            error!(
                "{} extraction via {} failed: {}",
                kind,
                self.provider.provider_name(),
                e
            );
            PathfinderError::ExtractionFailed(e.to_string())
        })?;

        let result = ExtractionResult::parse(&raw);
        info!("Extracted {} ingredients from {} request", result.len(), kind);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Prompt;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ScriptedProvider {
        reply: std::result::Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            _prompt: &Prompt,
        ) -> std::result::Result<String, Box<dyn Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(|e| e.into())
        }
    }

    fn client(reply: std::result::Result<&str, &str>) -> (ExtractionClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ScriptedProvider {
            reply: reply.map(str::to_string).map_err(str::to_string),
            calls: calls.clone(),
        };
        (ExtractionClient::new(Box::new(provider)), calls)
    }

    #[tokio::test]
    async fn test_extract_parses_reply() {
        let (client, calls) = client(Ok("Ingredients:\nflour\n\nmilk\n"));
        let result = client
            .extract(ExtractionRequest::dish("pancakes").unwrap())
            .await
            .unwrap();
        assert_eq!(result.as_slice(), &["flour", "milk"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_query_never_calls_out() {
        let (client, calls) = client(Ok("flour"));
        let request = ExtractionRequest::Dish {
            query: "  ".to_string(),
        };
        let err = client.extract(request).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_extraction_failed() {
        let (client, calls) = client(Err("connection reset"));
        let err = client
            .extract(ExtractionRequest::text("2 eggs").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PathfinderError::ExtractionFailed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
