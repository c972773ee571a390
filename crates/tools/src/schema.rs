//! Builder for tool input schemas.
//!
//! Tool arguments are always a flat JSON object; each property is a scalar, an enum, or a
//! free-form object. The output is a JSON Schema object ready for [`rmcp::model::Tool::new`].

use rmcp::model::JsonObject;
use serde_json::{Value, json};

#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    properties: JsonObject,
    required: Vec<String>,
    last: Option<String>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn string(self, name: &str, description: &str) -> Self {
        self.property(name, json!({"type": "string", "description": description}))
    }

    /// Identifier that ends up as a URL path segment: a non-empty string.
    #[must_use]
    pub fn id(self, name: &str, description: &str) -> Self {
        self.property(
            name,
            json!({"type": "string", "minLength": 1, "description": description}),
        )
    }

    #[must_use]
    pub fn integer(self, name: &str, description: &str) -> Self {
        self.property(name, json!({"type": "integer", "description": description}))
    }

    #[must_use]
    pub fn number(self, name: &str, description: &str) -> Self {
        self.property(name, json!({"type": "number", "description": description}))
    }

    #[must_use]
    pub fn boolean(self, name: &str, description: &str) -> Self {
        self.property(name, json!({"type": "boolean", "description": description}))
    }

    /// Free-form JSON object, forwarded untouched.
    #[must_use]
    pub fn object(self, name: &str, description: &str) -> Self {
        self.property(
            name,
            json!({"type": "object", "additionalProperties": true, "description": description}),
        )
    }

    #[must_use]
    pub fn one_of(self, name: &str, values: &[&str], description: &str) -> Self {
        self.property(
            name,
            json!({"type": "string", "enum": values, "description": description}),
        )
    }

    /// Bound the most recently added numeric property. Either end may be open.
    #[must_use]
    pub fn range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        let last = self
            .last
            .as_ref()
            .and_then(|name| self.properties.get_mut(name))
            .and_then(Value::as_object_mut);
        if let Some(prop) = last {
            if let Some(min) = min {
                prop.insert("minimum".to_string(), min.into());
            }
            if let Some(max) = max {
                prop.insert("maximum".to_string(), max.into());
            }
        }
        self
    }

    /// Mark the most recently added property as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        if let Some(name) = self.last.clone()
            && !self.required.contains(&name)
        {
            self.required.push(name);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(self.properties));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema
    }

    fn property(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        self.last = Some(name.to_string());
        self
    }
}
