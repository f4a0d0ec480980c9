//! Product lookup: the two model-backed calls.
//!
//! `ProductLookup` is the injectable seam between the controller and the
//! hosted model — production wires it to Gemini, tests wire it to doubles.
//! No process-wide client instance exists; callers construct and pass one.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ProductSummary;

/// Model used for both identification and price search.
pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Sentinel returned when identification yields no usable name. The price
/// lookup proceeds with this literal rather than failing.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Lookup failures.
///
/// Both variants collapse to the same Error phase at the controller; the
/// distinction matters only for logging.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport or endpoint failure on the model call
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Price-search response did not parse into the expected JSON shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The two model-backed operations behind the search flows.
#[async_trait]
pub trait ProductLookup {
    /// Identify the product in a base64-encoded JPEG frame. Returns the
    /// trimmed product name, or [`UNKNOWN_PRODUCT`] when the model had
    /// nothing to say.
    async fn identify(&self, image_base64: &str) -> Result<String, LookupError>;

    /// Find retailer prices for a product. The returned summary is already
    /// post-processed: prices sorted ascending, cheapest entry flagged.
    async fn search(&self, query: &str) -> Result<ProductSummary, LookupError>;
}

/// Trim the model's answer and fall back to the sentinel when empty.
pub fn normalize_identified_name(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        UNKNOWN_PRODUCT.to_string()
    } else {
        name.to_string()
    }
}

/// Fixed instruction sent alongside the captured frame.
pub(crate) const IDENTIFY_INSTRUCTION: &str =
    "What is the exact product in this image? Provide only the product name and model.";

/// Prompt for the grounded price search.
pub(crate) fn price_prompt(query: &str) -> String {
    format!(
        "Find real-time prices and store links for: {}. \
         Include major retailers like Amazon, Walmart, Target, Best Buy, etc. \
         Identify the current best price.",
        query
    )
}

#[cfg(feature = "server")]
pub use gemini::GeminiLookup;

#[cfg(feature = "server")]
mod gemini {
    use super::*;
    use crate::types::rank_prices;
    use gemini_client::{GeminiClient, GeminiError, GenerateRequest, Part, Tool};
    use tracing::debug;

    impl From<GeminiError> for LookupError {
        fn from(err: GeminiError) -> Self {
            match err {
                GeminiError::Parse(msg) => LookupError::Malformed(msg),
                other => LookupError::Upstream(other.to_string()),
            }
        }
    }

    /// Gemini-backed lookup. Holds an explicitly constructed client.
    pub struct GeminiLookup {
        client: GeminiClient,
        model: String,
    }

    impl GeminiLookup {
        pub fn new(client: GeminiClient) -> Self {
            Self {
                client,
                model: GEMINI_MODEL.to_string(),
            }
        }

        /// Override the model id.
        pub fn with_model(mut self, model: impl Into<String>) -> Self {
            self.model = model.into();
            self
        }
    }

    #[async_trait]
    impl ProductLookup for GeminiLookup {
        async fn identify(&self, image_base64: &str) -> Result<String, LookupError> {
            let response = self
                .client
                .generate(
                    GenerateRequest::new(&self.model)
                        .part(Part::inline_jpeg(image_base64))
                        .text(IDENTIFY_INSTRUCTION),
                )
                .await?;

            let name = normalize_identified_name(&response.text);
            debug!(product = %name, "Identified product from frame");
            Ok(name)
        }

        async fn search(&self, query: &str) -> Result<ProductSummary, LookupError> {
            let mut summary: ProductSummary = self
                .client
                .extract(
                    GenerateRequest::new(&self.model)
                        .text(price_prompt(query))
                        .tool(Tool::google_search()),
                )
                .await?;

            rank_prices(&mut summary);
            debug!(
                product = %summary.name,
                offers = summary.prices.len(),
                "Price search complete"
            );
            Ok(summary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_identified_name("  iPhone 15  \n"), "iPhone 15");
    }

    #[test]
    fn test_normalize_empty_is_sentinel() {
        assert_eq!(normalize_identified_name(""), UNKNOWN_PRODUCT);
        assert_eq!(normalize_identified_name("   \t\n"), UNKNOWN_PRODUCT);
    }

    #[test]
    fn test_price_prompt_names_retailers() {
        let prompt = price_prompt("iPhone 15");
        assert!(prompt.contains("iPhone 15"));
        assert!(prompt.contains("Amazon"));
        assert!(prompt.contains("Walmart"));
        assert!(prompt.contains("Target"));
        assert!(prompt.contains("Best Buy"));
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_gemini_error_mapping() {
        use gemini_client::GeminiError;

        let upstream: LookupError = GeminiError::Network("timed out".into()).into();
        assert!(matches!(upstream, LookupError::Upstream(_)));

        let upstream: LookupError = GeminiError::Api("500".into()).into();
        assert!(matches!(upstream, LookupError::Upstream(_)));

        let upstream: LookupError = GeminiError::Config("GEMINI_API_KEY not set".into()).into();
        assert!(matches!(upstream, LookupError::Upstream(_)));

        let malformed: LookupError = GeminiError::Parse("expected value".into()).into();
        assert!(matches!(malformed, LookupError::Malformed(_)));
    }
}
