use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product a shopper can buy. Owned by the catalog and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
}

fn default_in_stock() -> bool {
    true
}

/// One extracted ingredient paired with the product it resolved to, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub ingredient_name: String,
    pub product: Option<CatalogProduct>,
    pub available: bool,
}

impl MatchResult {
    pub fn new(ingredient_name: impl Into<String>, product: Option<CatalogProduct>) -> Self {
        let available = product.is_some();
        MatchResult {
            ingredient_name: ingredient_name.into(),
            product,
            available,
        }
    }
}

/// Matched and unmatched ingredients for one search, plus the cost of the matches
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub available_list: Vec<MatchResult>,
    pub unavailable_list: Vec<MatchResult>,
    pub total_cost: Decimal,
}

impl AggregateReport {
    /// Number of ingredients covered by the report
    pub fn len(&self) -> usize {
        self.available_list.len() + self.unavailable_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Products that would be forwarded to the cart, in ingredient order
    pub fn available_products(&self) -> impl Iterator<Item = &CatalogProduct> {
        self.available_list.iter().filter_map(|m| m.product.as_ref())
    }
}

/// A cart line: a product and how many of it the shopper wants
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: CatalogProduct,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
