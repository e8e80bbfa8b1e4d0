//! Turn a dish name, recipe text or photo into a list of ingredients and
//! check which of them a grocery catalog carries.
//!
//! ```no_run
//! use pathfinder_ingredients::{
//!     aggregate, CatalogSnapshot, ExtractionClient, ExtractionRequest, IngredientSource,
//! };
//!
//! # async fn run() -> pathfinder_ingredients::Result<()> {
//! let config = pathfinder_ingredients::AppConfig::load()?;
//! let catalog = CatalogSnapshot::load(&config.catalog.path).await?;
//! let client = ExtractionClient::from_config(&config)?;
//!
//! let ingredients = client.extract(ExtractionRequest::dish("pancakes")?).await?;
//! let report = aggregate(&ingredients, &catalog);
//! println!("{} available, total {}", report.available_list.len(), report.total_cost);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extraction;
pub mod matcher;
pub mod model;
pub mod providers;
pub mod server;
pub mod session;

pub use aggregator::aggregate;
pub use cart::{add_available_to_cart, add_match_to_cart, Cart, CartStore};
pub use catalog::CatalogSnapshot;
pub use config::{AppConfig, ProviderConfig};
pub use error::{PathfinderError, Result};
pub use extraction::{
    ExtractionClient, ExtractionRequest, ExtractionResult, IngredientSource,
    RemoteExtractionClient,
};
pub use matcher::find_match;
pub use model::{AggregateReport, CartItem, CatalogProduct, MatchResult};
pub use session::{SearchOutcome, SearchSession, SearchState};

/// Extract ingredients for a dish using the configured default provider
pub async fn ingredients_for_dish(query: &str) -> Result<ExtractionResult> {
    let config = AppConfig::load()?;
    let client = ExtractionClient::from_config(&config)?;
    client.extract(ExtractionRequest::dish(query)?).await
}

/// Extract ingredients from recipe text using the configured default provider
pub async fn ingredients_from_text(text: &str) -> Result<ExtractionResult> {
    let config = AppConfig::load()?;
    let client = ExtractionClient::from_config(&config)?;
    client.extract(ExtractionRequest::text(text)?).await
}

/// Extract ingredients from an image file using the configured default provider
pub async fn ingredients_from_image(path: impl AsRef<std::path::Path>) -> Result<ExtractionResult> {
    let bytes = tokio::fs::read(path).await?;
    let config = AppConfig::load()?;
    let client = ExtractionClient::from_config(&config)?;
    client.extract(ExtractionRequest::image(bytes, None)?).await
}
