//! Server functions bridging the UI to the Gemini-backed lookup.
//!
//! The client is built from `GEMINI_API_KEY` per call; a missing or invalid
//! key surfaces as an upstream failure on the first call, not at startup.

use dioxus::prelude::*;

use crate::types::ProductSummary;

/// Identify the product in a captured frame (base64 JPEG).
#[server]
pub async fn identify_product(image_base64: String) -> Result<String, ServerFnError> {
    use crate::lookup::{GeminiLookup, ProductLookup};
    use gemini_client::GeminiClient;

    let client = GeminiClient::from_env().map_err(|e| ServerFnError::new(e.to_string()))?;
    GeminiLookup::new(client)
        .identify(&image_base64)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Product identification failed");
            ServerFnError::new(e.to_string())
        })
}

/// Find retailer prices for a product, sorted with the cheapest flagged.
#[server]
pub async fn search_prices(query: String) -> Result<ProductSummary, ServerFnError> {
    use crate::lookup::{GeminiLookup, ProductLookup};
    use gemini_client::GeminiClient;

    let client = GeminiClient::from_env().map_err(|e| ServerFnError::new(e.to_string()))?;
    GeminiLookup::new(client)
        .search(&query)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Price search failed");
            ServerFnError::new(e.to_string())
        })
}
