use crate::model::{AggregateReport, CartItem, CatalogProduct, MatchResult};
use log::debug;
use rust_decimal::Decimal;

/// Operations the shopping cart exposes to this crate
pub trait CartStore {
    /// Add one unit; an already-present product has its quantity bumped
    fn add_item(&mut self, product: &CatalogProduct);

    /// Set a line's quantity. Zero removes the line; unknown ids are ignored.
    fn update_quantity(&mut self, id: &str, quantity: u32);

    fn remove_item(&mut self, id: &str);

    fn clear(&mut self);

    fn items(&self) -> &[CartItem];

    fn total(&self) -> Decimal;
}

/// In-memory cart keeping lines in insertion order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }
}

impl CartStore for Cart {
    fn add_item(&mut self, product: &CatalogProduct) {
        match self.position(&product.id) {
            Some(index) => self.items[index].quantity += 1,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(index) = self.position(id) {
            self.items[index].quantity = quantity;
        }
    }

    fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.product.id != id);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Forward every available match to the cart. Only call on explicit shopper action.
///
/// Returns how many products were added.
pub fn add_available_to_cart<C: CartStore + ?Sized>(report: &AggregateReport, cart: &mut C) -> usize {
    let mut added = 0;
    for product in report.available_products() {
        cart.add_item(product);
        added += 1;
    }
    debug!("Added {} matched products to cart", added);
    added
}

/// Forward a single row; returns false when the ingredient had no product
pub fn add_match_to_cart<C: CartStore + ?Sized>(item: &MatchResult, cart: &mut C) -> bool {
    match &item.product {
        Some(product) => {
            cart.add_item(product);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: id.to_string(),
            price: Decimal::new(cents, 2),
            original_price: None,
            discount: None,
            image: String::new(),
            category: String::new(),
            in_stock: true,
            rating: 0.0,
            reviews: 0,
        }
    }

    #[test]
    fn test_adding_twice_increments_quantity() {
        let mut cart = Cart::new();
        let milk = product("milk", 299);
        cart.add_item(&milk);
        cart.add_item(&milk);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::new(598, 2));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_remove_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product("flour", 349));
        cart.add_item(&product("milk", 299));

        cart.update_quantity("flour", 3);
        assert_eq!(cart.total(), Decimal::new(1346, 2));

        cart.update_quantity("unknown", 5);
        assert_eq!(cart.items().len(), 2);

        cart.update_quantity("milk", 0);
        assert_eq!(cart.items().len(), 1);

        cart.remove_item("flour");
        assert!(cart.is_empty());

        cart.add_item(&product("eggs", 450));
        cart.clear();
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_bridge_forwards_only_available() {
        let report = AggregateReport {
            available_list: vec![
                MatchResult::new("flour", Some(product("flour", 349))),
                MatchResult::new("milk", Some(product("milk", 299))),
            ],
            unavailable_list: vec![MatchResult::new("saffron", None)],
            total_cost: Decimal::new(648, 2),
        };

        let mut cart = Cart::new();
        assert_eq!(add_available_to_cart(&report, &mut cart), 2);
        assert_eq!(cart.total(), report.total_cost);

        assert!(!add_match_to_cart(&report.unavailable_list[0], &mut cart));
        assert!(add_match_to_cart(&report.available_list[1], &mut cart));
        assert_eq!(cart.items()[1].quantity, 2);
    }
}
