use super::{ExtractionRequest, ExtractionResult, IngredientSource};
use crate::error::{PathfinderError, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Calls a running `POST /extraction` endpoint instead of the model directly
pub struct RemoteExtractionClient {
    client: Client,
    endpoint: String,
}

impl RemoteExtractionClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> Self {
        RemoteExtractionClient {
            client: Client::new(),
            endpoint: format!("{}/extraction", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: ExtractionRequest) -> Result<reqwest::Response> {
        let builder = self.client.post(&self.endpoint);
        let builder = match request {
            ExtractionRequest::Dish { query } => {
                builder.json(&json!({ "type": "dish", "query": query }))
            }
            ExtractionRequest::Text { body } => {
                builder.json(&json!({ "type": "text", "text": body }))
            }
            ExtractionRequest::Image(image) => {
                let (bytes, mime_type) = image.into_parts();
                let part = Part::bytes(bytes)
                    .file_name("upload")
                    .mime_str(&mime_type)
                    .map_err(|e| PathfinderError::Validation(e.to_string()))?;
                builder.multipart(Form::new().part("image", part).text("type", "image"))
            }
        };

        builder.send().await.map_err(|e| {
            error!("Error reaching {}: {}", self.endpoint, e);
            PathfinderError::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl IngredientSource for RemoteExtractionClient {
    async fn extract(&self, request: ExtractionRequest) -> Result<ExtractionResult> {
        request.validate()?;

        let response = self.send(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PathfinderError::ExtractionFailed(format!("unreadable response: {}", e)))?;
        debug!("{} -> {}: {}", self.endpoint, status, text);
        let body: Option<Value> = serde_json::from_str(&text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b["error"].as_str())
            .map(str::to_string);

        if status == StatusCode::BAD_REQUEST {
            return Err(PathfinderError::Validation(
                message.unwrap_or_else(|| "Bad request".to_string()),
            ));
        }

        if let Some(message) = message {
            return Err(PathfinderError::ExtractionFailed(message));
        }

        if !status.is_success() {
            return Err(PathfinderError::ExtractionFailed(format!(
                "endpoint returned {}",
                status
            )));
        }

        let body = body.ok_or_else(|| {
            PathfinderError::ExtractionFailed("response is not valid JSON".to_string())
        })?;
        let names = body["ingredients"].as_array().ok_or_else(|| {
            PathfinderError::ExtractionFailed("response has no ingredients array".to_string())
        })?;

        Ok(ExtractionResult::from_names(
            names.iter().filter_map(Value::as_str),
        ))
    }
}
