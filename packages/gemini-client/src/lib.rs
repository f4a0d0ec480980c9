//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Google Generative Language API with no
//! domain-specific logic. Supports multimodal content generation, Google
//! Search grounding, and schema-constrained structured outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest, Part, Tool};
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Text generation from an image
//! let response = client.generate(
//!     GenerateRequest::new("gemini-3-flash-preview")
//!         .part(Part::inline_jpeg(base64_image))
//!         .text("What is in this image?"),
//! ).await?;
//!
//! println!("{}", response.text);
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Listing {
//!     title: String,
//!     price: f64,
//! }
//!
//! // Schema generated automatically from the type
//! let listing: Listing = client
//!     .extract(GenerateRequest::new("gemini-3-flash-preview").text(prompt))
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default per-request timeout. Single attempt, no retry; expiry surfaces
/// as a network error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content.
    ///
    /// Sends a `generateContent` request and returns the first candidate's
    /// text together with any grounding and usage metadata.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, request.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!("Gemini API error: {}", error_text)));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let candidate = raw
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeminiError::Api("No candidates from Gemini".into()))?;

        let text = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if let Some(grounding) = &candidate.grounding_metadata {
            debug!(
                chunks = grounding.grounding_chunks.len(),
                queries = grounding.web_search_queries.len(),
                "Search grounding attached to response"
            );
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(GenerateResponse {
            text,
            grounding: candidate.grounding_metadata,
            usage: raw.usage_metadata,
        })
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a `responseSchema` from `T` using `schemars`, attaches it
    /// to the request, and deserializes the response text. A response that
    /// does not parse into `T` is a `Parse` error; it is not repaired or
    /// retried.
    pub async fn extract<T: StructuredOutput>(&self, request: GenerateRequest) -> Result<T> {
        let schema = T::gemini_schema();

        debug!(
            type_name = %T::type_name(),
            "Generated Gemini response schema for extraction"
        );

        let response = self.generate(request.json_schema(schema)).await?;

        serde_json::from_str(&response.text)
            .map_err(|e| GeminiError::Parse(format!("Failed to deserialize response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("test-key")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "https://custom.api.com");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_timeout() {
        let client = GeminiClient::new("test-key");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
    }
}
