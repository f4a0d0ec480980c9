//! Domain types for product price comparison.
//!
//! `ProductSummary` doubles as the model-facing response schema: the
//! Gemini price search is constrained to return JSON of this shape.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One retailer offer for a product.
///
/// Immutable once post-processed; `rank_prices` is the only writer of
/// `is_cheapest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub title: String,

    /// Offer price, non-negative
    pub price: f64,

    pub currency: Option<String>,

    /// Retailer name (e.g. "Walmart")
    pub source: String,

    /// Absolute URL to the offer page
    pub url: String,

    /// True on exactly one entry of a non-empty processed list: the
    /// minimum-price offer. Not part of the model-facing schema.
    #[serde(default)]
    #[schemars(skip)]
    pub is_cheapest: bool,
}

/// Identified product plus its retailer offers.
///
/// Created fresh per search cycle, held for the duration of the Results
/// phase, discarded on reset. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,

    pub description: Option<String>,

    /// Direct URL to a product image
    pub image: Option<String>,

    pub prices: Vec<PriceEntry>,
}

/// Sort offers ascending by price and flag the cheapest.
///
/// Deterministic and idempotent: stable sort (ties keep their relative
/// order), all flags cleared, then the first entry flagged iff the list is
/// non-empty. An empty list is left untouched.
pub fn rank_prices(summary: &mut ProductSummary) {
    summary
        .prices
        .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));

    for entry in &mut summary.prices {
        entry.is_cheapest = false;
    }
    if let Some(cheapest) = summary.prices.first_mut() {
        cheapest.is_cheapest = true;
    }
}
