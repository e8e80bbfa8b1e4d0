mod handlers;

pub use handlers::{ErrorResponse, HealthResponse, IngredientsResponse, SearchParams, SearchResponse};

use crate::catalog::CatalogSnapshot;
use crate::config::AppConfig;
use crate::error::Result;
use crate::extraction::{ExtractionClient, IngredientSource};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::sync::Arc;

/// Largest accepted request body (image uploads)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// State shared with every handler
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn IngredientSource>,
    pub catalog: CatalogSnapshot,
}

impl AppState {
    pub fn new(extractor: Arc<dyn IngredientSource>, catalog: CatalogSnapshot) -> Self {
        AppState { extractor, catalog }
    }
}

/// Build the axum router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/extraction", post(handlers::extraction_handler))
        .route("/extraction/report", post(handlers::report_handler))
        .route("/catalog/search", get(handlers::catalog_search_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Load the catalog, build the default provider and serve until shutdown
pub async fn serve(config: &AppConfig) -> Result<()> {
    let catalog = CatalogSnapshot::load(&config.catalog.path).await?;
    let extractor = ExtractionClient::from_config(config)?;
    info!(
        "Using '{}' for ingredient extraction",
        extractor.provider_name()
    );

    let app = create_router(AppState::new(Arc::new(extractor), catalog));
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on {}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
