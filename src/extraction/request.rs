use super::image::ImageInput;
use crate::error::{PathfinderError, Result};

/// What the shopper asked about. Exactly one mode per request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionRequest {
    /// A dish name, e.g. "chocolate cake"
    Dish { query: String },
    /// Free-form recipe text
    Text { body: String },
    /// A photo of a recipe, ingredient list or dish
    Image(ImageInput),
}

impl ExtractionRequest {
    pub fn dish(query: impl Into<String>) -> Result<Self> {
        let request = ExtractionRequest::Dish {
            query: query.into().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn text(body: impl Into<String>) -> Result<Self> {
        let request = ExtractionRequest::Text {
            body: body.into().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn image(bytes: Vec<u8>, mime_type: Option<&str>) -> Result<Self> {
        Ok(ExtractionRequest::Image(ImageInput::new(bytes, mime_type)?))
    }

    /// Build from the loosely-typed wire fields of a structured request body
    pub fn from_fields(kind: Option<&str>, query: Option<&str>, text: Option<&str>) -> Result<Self> {
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| PathfinderError::Validation("Type is required".to_string()))?;

        match kind {
            "dish" => Self::dish(query.unwrap_or_default()),
            "text" => Self::text(text.unwrap_or_default()),
            _ => Err(PathfinderError::Validation("Invalid type".to_string())),
        }
    }

    /// Wire name of the mode
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionRequest::Dish { .. } => "dish",
            ExtractionRequest::Text { .. } => "text",
            ExtractionRequest::Image(_) => "image",
        }
    }

    /// Check the mode's required field. Runs before any outbound call.
    pub fn validate(&self) -> Result<()> {
        match self {
            ExtractionRequest::Dish { query } if query.trim().is_empty() => Err(
                PathfinderError::Validation("Query is required for dish type".to_string()),
            ),
            ExtractionRequest::Text { body } if body.trim().is_empty() => Err(
                PathfinderError::Validation("Text is required for text type".to_string()),
            ),
            ExtractionRequest::Image(image) if image.is_empty() => {
                Err(PathfinderError::Validation("Image is required".to_string()))
            }
            _ => Ok(()),
        }
    }
}
