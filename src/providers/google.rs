use crate::config::ProviderConfig;
use crate::providers::{ensure_success, http_client, LlmProvider, Prompt};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: http_client(config.timeout())?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    fn request_body(&self, prompt: &Prompt) -> Value {
        let mut parts = vec![json!({ "text": prompt.text })];
        if let Some(image) = &prompt.image {
            parts.push(json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": image.data
                }
            }));
        }

        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        })
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, Box<dyn Error + Send + Sync>> {
        // Key stays out of the URL: reqwest errors quote it
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;
        let response = ensure_success("Google Gemini", response).await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let parts = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or("Failed to extract content from Google Gemini response")?;
        let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::EncodedImage;
    use mockito::{Matcher, Server};

    #[test]
    fn test_provider_name() {
        let mut config = ProviderConfig::for_model("gemini-1.5-flash");
        config.api_key = Some("test-key".to_string());

        let provider = GoogleProvider::new(&config).unwrap();
        assert_eq!(provider.provider_name(), "google");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_image_is_sent_as_inline_data() {
        let provider = GoogleProvider::with_base_url(
            "k".to_string(),
            "http://localhost".to_string(),
            "gemini-1.5-flash".to_string(),
        );
        let prompt = Prompt::with_image(
            "Analyze this image",
            EncodedImage {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            },
        );

        let body = provider.request_body(&prompt);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "AAAA");
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-1.5-flash:generateContent",
            )
            .match_header("x-goog-api-key", "fake_api_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "flour\nsugar\neggs"}]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );

        let text = provider.generate(&Prompt::text("pancakes")).await.unwrap();
        assert_eq!(text, "flour\nsugar\neggs");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "bad".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );

        let err = provider.generate(&Prompt::text("pancakes")).await.unwrap_err();
        assert!(err.to_string().contains("403"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_joins_all_parts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [
                    {"text": "flour\nsug"},
                    {"text": "ar\neggs"}
                ]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "k".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );

        let text = provider.generate(&Prompt::text("pancakes")).await.unwrap();
        assert_eq!(text, "flour\nsugar\neggs");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_failure_does_not_expose_key() {
        let provider = GoogleProvider::with_base_url(
            "SECRET-KEY-123".to_string(),
            "http://127.0.0.1:9".to_string(),
            "gemini-1.5-flash".to_string(),
        );

        let err = provider.generate(&Prompt::text("cake")).await.unwrap_err();
        assert!(!err.to_string().contains("SECRET-KEY-123"));
    }
}
