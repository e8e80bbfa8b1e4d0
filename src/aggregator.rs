use crate::catalog::CatalogSnapshot;
use crate::extraction::ExtractionResult;
use crate::matcher::find_match;
use crate::model::{AggregateReport, MatchResult};
use rust_decimal::Decimal;

/// Match every extracted ingredient and split the results by availability.
///
/// Both lists keep the extraction order. Pure: no I/O, no failure modes.
pub fn aggregate(result: &ExtractionResult, catalog: &CatalogSnapshot) -> AggregateReport {
    let (available_list, unavailable_list): (Vec<_>, Vec<_>) = result
        .iter()
        .map(|name| MatchResult::new(name.as_str(), find_match(name, catalog.products()).cloned()))
        .partition(|m| m.available);

    let total_cost = available_list
        .iter()
        .filter_map(|m| m.product.as_ref())
        .map(|p| p.price)
        .sum::<Decimal>();

    AggregateReport {
        available_list,
        unavailable_list,
        total_cost,
    }
}
