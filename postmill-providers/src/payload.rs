//! Builder for JSON payloads with optional fields.
//!
//! Platforms reject or misinterpret `null` and empty strings, so an absent
//! optional input must leave no key behind at all.

use serde_json::{Map, Value};

/// Builds a JSON object field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadBuilder {
    fields: Map<String, Value>,
}

impl PayloadBuilder {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field unconditionally.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Sets a string field only when present and not blank.
    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            self.fields.insert(key.to_string(), Value::String(v.to_string()));
        }
        self
    }

    /// Sets a field only when present.
    pub fn optional<T: Into<Value>>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.fields.insert(key.to_string(), v.into());
        }
        self
    }

    /// Nests another object.
    pub fn object(mut self, key: &str, nested: PayloadBuilder) -> Self {
        self.fields.insert(key.to_string(), nested.build());
        self
    }

    /// Finishes the object.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_blank_are_omitted() {
        let payload = PayloadBuilder::new()
            .field("description", "hello")
            .text("link", None)
            .text("title", Some(""))
            .text("alt_text", Some("  "))
            .optional::<bool>("disable_duet", None)
            .optional("disable_stitch", Some(true))
            .build();

        assert_eq!(payload, json!({"description": "hello", "disable_stitch": true}));
    }

    #[test]
    fn test_nested_objects() {
        let payload = PayloadBuilder::new()
            .object("source_info", PayloadBuilder::new().field("source", "PULL_FROM_URL"))
            .build();
        assert_eq!(payload["source_info"]["source"], "PULL_FROM_URL");
    }
}
