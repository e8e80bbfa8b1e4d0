//! Resolves an extracted ingredient name to a catalog product.
//!
//! Matching is a coverage heuristic, not a ranking: the catalog is scanned in
//! order and the first product satisfying any rule wins.

use crate::model::CatalogProduct;

/// Generic ingredient keywords and the substring the product name must
/// contain for the keyword to fire. Checked in order, stopping at the first hit.
pub const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("flour", "flour"),
    ("sugar", "sugar"),
    ("egg", "egg"),
    ("butter", "butter"),
    ("milk", "milk"),
    ("baking powder", "baking"),
    ("vanilla", "vanilla"),
    ("salt", "salt"),
    ("chocolate", "chocolate"),
    ("cheese", "cheese"),
    ("chicken", "chicken"),
    ("beef", "beef"),
    ("rice", "rice"),
    ("pasta", "pasta"),
    ("tomato", "tomato"),
    ("onion", "onion"),
    ("garlic", "garlic"),
    ("oil", "oil"),
    ("bread", "bread"),
];

/// Find the first catalog product matching `ingredient_name`.
///
/// Absence of a match is not an error.
pub fn find_match<'a>(
    ingredient_name: &str,
    catalog: &'a [CatalogProduct],
) -> Option<&'a CatalogProduct> {
    let search_term = ingredient_name.to_lowercase();
    catalog
        .iter()
        .find(|product| product_matches(&search_term, &product.name.to_lowercase()))
}

/// All three rules against an already lower-cased term and product name
fn product_matches(search_term: &str, product_name: &str) -> bool {
    product_name.contains(search_term)
        || first_token_matches(search_term, product_name)
        || keyword_alias_fires(search_term, product_name).is_some()
}

fn first_token_matches(search_term: &str, product_name: &str) -> bool {
    product_name
        .split_whitespace()
        .next()
        .is_some_and(|token| search_term.contains(token))
}

/// The keyword whose alias rule links `search_term` to `product_name`, if any
pub fn keyword_alias_fires(search_term: &str, product_name: &str) -> Option<&'static str> {
    KEYWORD_ALIASES
        .iter()
        .find(|(keyword, needle)| search_term.contains(keyword) && product_name.contains(needle))
        .map(|(keyword, _)| *keyword)
}
