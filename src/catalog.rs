use crate::error::{PathfinderError, Result};
use crate::model::CatalogProduct;
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// How many results the header search box shows
pub const HEADER_SEARCH_LIMIT: usize = 8;

/// Immutable, ordered list of products available for matching.
///
/// Cloning is cheap: every clone shares the same product slice, so one
/// snapshot can serve any number of concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    products: Arc<[CatalogProduct]>,
}

impl CatalogSnapshot {
    /// Build a snapshot, rejecting negative prices, duplicate ids and blank
    /// or whitespace-padded names
    pub fn from_products(products: Vec<CatalogProduct>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.name.trim().is_empty() || product.name.trim() != product.name {
                return Err(PathfinderError::Catalog(format!(
                    "product '{}' has a blank or padded name",
                    product.id
                )));
            }
            if product.price < Decimal::ZERO {
                return Err(PathfinderError::Catalog(format!(
                    "product '{}' has a negative price",
                    product.id
                )));
            }
            if product.original_price.is_some_and(|p| p < Decimal::ZERO) {
                return Err(PathfinderError::Catalog(format!(
                    "product '{}' has a negative original price",
                    product.id
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(PathfinderError::Catalog(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
        }

        Ok(CatalogSnapshot {
            products: products.into(),
        })
    }

    /// Parse a JSON array of products
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<CatalogProduct> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load a JSON array of products from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&content)?;
        info!(
            "Loaded {} products from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn empty() -> Self {
        CatalogSnapshot {
            products: Arc::from(Vec::new()),
        }
    }

    /// All products in catalog order
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Header search: case-insensitive substring match on name or category
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CatalogProduct> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query) || p.category.to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }

    /// Products whose category slugifies to `slug`
    pub fn in_category(&self, slug: &str) -> Vec<&CatalogProduct> {
        let slug = slug.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| slugify(&p.category) == slug)
            .collect()
    }

    /// Products currently carrying a discount
    pub fn on_offer(&self) -> Vec<&CatalogProduct> {
        self.products
            .iter()
            .filter(|p| p.discount.is_some_and(|d| d > 0))
            .collect()
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

fn slugify(category: &str) -> String {
    category
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
