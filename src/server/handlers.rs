use super::AppState;
use crate::aggregator::aggregate;
use crate::catalog::HEADER_SEARCH_LIMIT;
use crate::error::{PathfinderError, Result};
use crate::extraction::{ExtractionRequest, ExtractionResult};
use crate::model::CatalogProduct;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// Structured request body: `{ "type": "dish", "query": ... }` or `{ "type": "text", "text": ... }`
#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    #[serde(rename = "type")]
    kind: Option<String>,
    query: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngredientsResponse {
    pub ingredients: ExtractionResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub products: Vec<CatalogProduct>,
}

/// Map a failure to its HTTP form. Only validation messages reach the client.
fn error_response(err: PathfinderError) -> Response {
    if err.is_validation() {
        debug!("Rejected extraction request: {}", err);
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response();
    }

    error!("Error generating ingredients: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to generate ingredients".to_string(),
        }),
    )
        .into_response()
}

fn invalid(message: impl Into<String>) -> PathfinderError {
    PathfinderError::Validation(message.into())
}

/// Decode either a JSON body or a multipart image upload
async fn read_extraction_request(request: Request) -> Result<ExtractionRequest> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| invalid(format!("Invalid multipart body: {}", e.body_text())))?;
        return read_image_form(multipart).await;
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| invalid(format!("Invalid request body: {}", e.body_text())))?;
    let payload: ExtractionPayload =
        serde_json::from_slice(&body).map_err(|_| invalid("Invalid request body"))?;

    ExtractionRequest::from_fields(
        payload.kind.as_deref(),
        payload.query.as_deref(),
        payload.text.as_deref(),
    )
}

/// Fields `image` (binary) and `type` (must be "image")
async fn read_image_form(mut multipart: Multipart) -> Result<ExtractionRequest> {
    let mut image: Option<(Bytes, Option<String>)> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid(format!("Invalid multipart body: {}", e.body_text())))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| invalid(format!("Invalid image upload: {}", e.body_text())))?;
                image = Some((data, content_type));
            }
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| invalid(format!("Invalid type field: {}", e.body_text())))?;
                kind = Some(value);
            }
            _ => {}
        }
    }

    match (image, kind.as_deref().map(str::trim)) {
        (Some((data, content_type)), Some("image")) if !data.is_empty() => {
            ExtractionRequest::image(data.to_vec(), content_type.as_deref())
        }
        _ => Err(invalid("Image is required")),
    }
}

async fn extract(state: &AppState, request: Request) -> Result<ExtractionResult> {
    let request = read_extraction_request(request).await?;
    state.extractor.extract(request).await
}

/// `POST /extraction`
pub async fn extraction_handler(State(state): State<AppState>, request: Request) -> Response {
    match extract(&state, request).await {
        Ok(ingredients) => Json(IngredientsResponse { ingredients }).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /extraction/report`: extraction followed by matching against the server's catalog
pub async fn report_handler(State(state): State<AppState>, request: Request) -> Response {
    match extract(&state, request).await {
        Ok(ingredients) => Json(aggregate(&ingredients, &state.catalog)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /catalog/search?q=...&limit=...`
pub async fn catalog_search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let limit = params.limit.unwrap_or(HEADER_SEARCH_LIMIT);
    let products = state
        .catalog
        .search(&params.q, limit)
        .into_iter()
        .cloned()
        .collect();
    Json(SearchResponse { products })
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        products: state.catalog.len(),
    })
}
