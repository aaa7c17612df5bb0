use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::jersey::{Condition, Jersey, Size, Sport};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

const FEATURED_LIMIT: usize = 6;
const DEALS_LIMIT: usize = 4;
const DEAL_DISCOUNT: f64 = 0.3;
const FEATURED_SELLER_RATING: f64 = 4.8;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl Default for PriceRange {
    fn default() -> PriceRange {
        PriceRange {
            low: 0.0,
            high: 500.0,
        }
    }
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Relevance,
    PriceLow,
    PriceHigh,
    Condition,
    Rating,
}

/// Everything the browse page can filter and sort by. A missing `sport`
/// means all sports; empty size or condition sets accept everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub search: String,
    pub sport: Option<Sport>,
    pub price_range: PriceRange,
    pub sizes: BTreeSet<Size>,
    pub conditions: BTreeSet<Condition>,
    pub authentic_only: bool,
    pub vintage_only: bool,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn clear(&mut self) {
        *self = CatalogQuery::default();
    }

    pub fn matches(&self, jersey: &Jersey) -> bool {
        self.matches_search(jersey)
            && self.sport.map_or(true, |sport| jersey.sport == sport)
            && self.price_range.contains(jersey.price)
            && (self.sizes.is_empty() || self.sizes.contains(&jersey.size))
            && (self.conditions.is_empty() || self.conditions.contains(&jersey.condition))
            && (!self.authentic_only || jersey.is_authentic)
            && (!self.vintage_only || jersey.is_vintage)
    }

    fn matches_search(&self, jersey: &Jersey) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();

        [&jersey.name, &jersey.player, &jersey.team]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Filters `jerseys` by `query` then sorts the survivors. The sort is stable
/// so ties keep their listing order.
pub fn evaluate(jerseys: &[Jersey], query: &CatalogQuery) -> Vec<Jersey> {
    let mut results: Vec<Jersey> = jerseys
        .iter()
        .filter(|jersey| query.matches(jersey))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Newest | SortKey::Relevance => {}
        SortKey::PriceLow => results.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => results.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Condition => results.sort_by_key(|jersey| Reverse(jersey.condition.rank())),
        SortKey::Rating => results.sort_by(|a, b| b.seller_rating.total_cmp(&a.seller_rating)),
    }

    results
}

pub fn featured(jerseys: &[Jersey]) -> Vec<Jersey> {
    jerseys
        .iter()
        .filter(|jersey| jersey.is_vintage || jersey.seller_rating >= FEATURED_SELLER_RATING)
        .take(FEATURED_LIMIT)
        .cloned()
        .collect()
}

pub fn deals(jerseys: &[Jersey]) -> Vec<Jersey> {
    jerseys
        .iter()
        .filter(|jersey| jersey.discount() > DEAL_DISCOUNT)
        .take(DEALS_LIMIT)
        .cloned()
        .collect()
}
