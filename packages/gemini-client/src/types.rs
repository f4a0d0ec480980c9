//! Gemini API request and response types.
//!
//! These follow the `generateContent` wire format of the Generative
//! Language REST API (camelCase JSON).

use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// A `generateContent` request.
///
/// The model id is part of the URL path, not the JSON body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Model to use (e.g., "gemini-3-flash-preview")
    #[serde(skip)]
    pub model: String,

    /// Conversation contents (a single user turn for this client)
    pub contents: Vec<Content>,

    /// Tools the model may use (e.g., Google Search grounding)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,

    /// Generation configuration (temperature, response format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: vec![Content::user()],
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Append a part to the user turn.
    pub fn part(mut self, part: Part) -> Self {
        if let Some(content) = self.contents.last_mut() {
            content.parts.push(part);
        }
        self
    }

    /// Append a text part to the user turn.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.part(Part::text(text))
    }

    /// Enable a tool for this request.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config_mut().temperature = Some(temperature);
        self
    }

    /// Constrain the response to JSON matching the given schema.
    pub fn json_schema(mut self, schema: serde_json::Value) -> Self {
        let config = self.config_mut();
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }

    fn config_mut(&mut self) -> &mut GenerationConfig {
        self.generation_config.get_or_insert_with(GenerationConfig::default)
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Role: "user" or "model"
    pub role: String,

    /// Ordered message parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Create an empty user turn.
    pub fn user() -> Self {
        Self {
            role: "user".to_string(),
            parts: Vec::new(),
        }
    }
}

/// A message part: either text or inline binary data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Create an inline JPEG part from base64-encoded image data.
    pub fn inline_jpeg(base64_data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/jpeg".to_string(),
                data: base64_data.into(),
            }),
        }
    }
}

/// Inline binary payload, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Tool declaration. Only Google Search grounding is supported.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    /// Enable Google Search grounding.
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

/// Google Search grounding tool (no configuration).
#[derive(Debug, Clone, Serialize)]
pub struct GoogleSearch {}

/// Generation configuration.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

// =============================================================================
// Response
// =============================================================================

/// Processed `generateContent` response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Search grounding metadata, when the request used the search tool
    pub grounding: Option<GroundingMetadata>,

    /// Token usage statistics
    pub usage: Option<UsageMetadata>,
}

/// Raw response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Search grounding metadata attached to a candidate.
///
/// Modeled explicitly rather than read out of dynamic JSON; absent fields
/// deserialize to empty collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,

    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

/// A single grounding citation.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// Web source backing a grounding chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = GenerateRequest::new("gemini-3-flash-preview")
            .text("Find prices")
            .tool(Tool::google_search())
            .temperature(0.0);

        assert_eq!(req.model, "gemini-3-flash-preview");
        assert_eq!(req.contents.len(), 1);
        assert_eq!(req.contents[0].parts.len(), 1);
        assert_eq!(req.tools.len(), 1);
        assert_eq!(
            req.generation_config.as_ref().unwrap().temperature,
            Some(0.0)
        );
    }

    #[test]
    fn test_request_serialization_shape() {
        let req = GenerateRequest::new("gemini-3-flash-preview")
            .part(Part::inline_jpeg("aGVsbG8="))
            .text("What is this?");

        let value = serde_json::to_value(&req).unwrap();

        // Model travels in the URL, never the body
        assert!(value.get("model").is_none());
        // Empty tool list is omitted entirely
        assert!(value.get("tools").is_none());
        assert!(value.get("generationConfig").is_none());

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], "What is this?");
    }

    #[test]
    fn test_json_schema_sets_mime_type() {
        let req = GenerateRequest::new("gemini-3-flash-preview")
            .text("prompt")
            .json_schema(serde_json::json!({"type": "object"}));

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn test_search_tool_serialization() {
        let req = GenerateRequest::new("m").text("q").tool(Tool::google_search());
        let value = serde_json::to_value(&req).unwrap();
        assert!(value["tools"][0]["googleSearch"].is_object());
    }

    #[test]
    fn test_response_parsing_with_grounding() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "hello "}, {"text": "world"}], "role": "model"},
                "groundingMetadata": {
                    "groundingChunks": [{"web": {"uri": "https://example.com", "title": "Example"}}],
                    "webSearchQueries": ["example query"]
                }
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }"#;

        let raw: GenerateResponseRaw = serde_json::from_str(json).unwrap();
        assert_eq!(raw.candidates.len(), 1);

        let grounding = raw.candidates[0].grounding_metadata.as_ref().unwrap();
        assert_eq!(grounding.grounding_chunks.len(), 1);
        let web = grounding.grounding_chunks[0].web.as_ref().unwrap();
        assert_eq!(web.uri.as_deref(), Some("https://example.com"));

        assert_eq!(raw.usage_metadata.unwrap().total_token_count, 15);
    }

    #[test]
    fn test_response_parsing_without_candidates() {
        let raw: GenerateResponseRaw = serde_json::from_str("{}").unwrap();
        assert!(raw.candidates.is_empty());
        assert!(raw.usage_metadata.is_none());
    }
}
