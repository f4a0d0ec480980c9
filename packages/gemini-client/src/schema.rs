//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the dialect accepted by `responseSchema`.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Listing {
//!     title: String,
//!     price: f64,
//! }
//!
//! let schema = Listing::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements
/// `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible `responseSchema` for this type.
    ///
    /// Gemini accepts a restricted OpenAPI subset:
    /// 1. No `$ref` references — all definitions must be inlined
    /// 2. No `$schema`, `definitions`, `additionalProperties`, or `title`
    ///    keywords
    /// 3. Optionality is expressed as `nullable: true` on a single-valued
    ///    `type`, not as a `["T", "null"]` type array
    ///
    /// This method transforms the schemars output to meet those rules.
    fn gemini_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);
        normalize_schema(&mut value);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all `$ref` references by replacing them with the actual schema
/// from `definitions`. Gemini does not follow refs.
fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        // The inlined definition may itself contain refs
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite one schema node (and its subschemas) into the Gemini dialect.
///
/// Walks the schema structurally — `properties` keys are field names, not
/// keywords, so keyword stripping never touches them.
fn normalize_schema(value: &mut serde_json::Value) {
    let serde_json::Value::Object(map) = value else {
        return;
    };

    map.remove("$schema");
    map.remove("definitions");
    map.remove("additionalProperties");
    map.remove("title");

    // schemars encodes Option<T> as type: ["T", "null"]; Gemini wants a
    // single type plus nullable: true.
    if let Some(serde_json::Value::Array(types)) = map.get("type") {
        let nullable = types.iter().any(|t| t.as_str() == Some("null"));
        let base = types
            .iter()
            .filter_map(|t| t.as_str())
            .find(|t| *t != "null")
            .map(str::to_string);

        if let Some(base) = base {
            map.insert("type".to_string(), serde_json::Value::String(base));
            if nullable {
                map.insert("nullable".to_string(), serde_json::Value::Bool(true));
            }
        }
    }

    if let Some(serde_json::Value::Object(props)) = map.get_mut("properties") {
        for (_, prop) in props.iter_mut() {
            normalize_schema(prop);
        }
    }

    match map.get_mut("items") {
        Some(serde_json::Value::Array(items)) => {
            for item in items.iter_mut() {
                normalize_schema(item);
            }
        }
        Some(items) => normalize_schema(items),
        None => {}
    }

    for keyword in ["anyOf", "allOf", "oneOf"] {
        if let Some(serde_json::Value::Array(subschemas)) = map.get_mut(keyword) {
            for subschema in subschemas.iter_mut() {
                normalize_schema(subschema);
            }
        }
    }
}
