//! Conversion of JSON schemas to OpenAPI fragments.
//!
//! A validation schema of a query, path or header target becomes one OpenAPI
//! parameter per property. A body schema becomes a [`BodySchema`]: the
//! description and required flag of the request body plus the JSON schema
//! itself, cleaned of the bookkeeping fields OpenAPI does not accept there.

use crate::openapi_builder::Parameter;
use crate::route::ParameterLocation;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields that describe a parameter rather than a schema
const PARAMETER_FIELDS: &[&str] = &["in", "name"];

/// Body form of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySchema {
    /// Description of the request/response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the body is required
    pub required: bool,
    /// JSON schema of the body
    pub schema: Value,
}

/// Convert an object schema to OpenAPI parameters, one per property.
///
/// Property order is preserved. A property is required when listed in the
/// schema's `required` array; its `description` moves to the parameter.
pub fn to_parameters(schema: &Value, location: ParameterLocation) -> Vec<Parameter> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        debug!("Schema has no properties, no {:?} parameters generated", location);
        return Vec::new();
    };

    let required = required_names(schema);

    properties
        .iter()
        .map(|(name, property)| {
            let mut property = property.clone();
            let description = match property.as_object_mut() {
                Some(object) => object
                    .remove("description")
                    .and_then(|d| d.as_str().map(str::to_string)),
                None => None,
            };

            Parameter {
                name: name.clone(),
                location,
                // path parameters are always required by OpenAPI
                required: location == ParameterLocation::Path || required.contains(name),
                schema: property,
                description,
            }
        })
        .collect()
}

/// Convert a schema to its body form. The description moves from the schema
/// to the body.
pub fn to_body(schema: &Value) -> BodySchema {
    let description = schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let required = !required_names(schema).is_empty();

    let mut stripped = strip_parameter_fields(schema);
    if let Some(object) = stripped.as_object_mut() {
        object.remove("description");
    }

    BodySchema {
        description,
        required,
        schema: stripped,
    }
}

/// Drop fields which describe a parameter instead of a schema: `in`, `name`
/// and a boolean `required` flag. A `required` array is a schema keyword and
/// is kept.
pub fn strip_parameter_fields(schema: &Value) -> Value {
    match schema {
        Value::Object(object) => {
            let mut out = Map::new();
            for (key, value) in object {
                if PARAMETER_FIELDS.contains(&key.as_str())
                    || (key == "required" && value.is_boolean())
                {
                    continue;
                }
                out.insert(key.clone(), value.clone());
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

fn required_names(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_parameters_from_properties() {
        let schema = json!({
            "type": "object",
            "required": ["param1"],
            "properties": {
                "param1": {"type": "string", "minLength": 2, "description": "First"},
                "param2": {"type": "integer"}
            }
        });

        let params = to_parameters(&schema, ParameterLocation::Query);

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "param1");
        assert_eq!(params[0].location, ParameterLocation::Query);
        assert!(params[0].required);
        assert_eq!(params[0].description.as_deref(), Some("First"));
        assert_eq!(params[0].schema, json!({"type": "string", "minLength": 2}));
        assert_eq!(params[1].name, "param2");
        assert!(!params[1].required);
    }

    #[test]
    fn test_path_parameters_are_required() {
        let schema = json!({"properties": {"id": {"type": "integer"}}});
        let params = to_parameters(&schema, ParameterLocation::Path);
        assert!(params[0].required);
    }

    #[test]
    fn test_to_parameters_without_properties() {
        let params = to_parameters(&json!({"type": "string"}), ParameterLocation::Header);
        assert!(params.is_empty());
    }

    #[test]
    fn test_to_body() {
        let schema = json!({
            "type": "object",
            "description": "Article payload",
            "required": ["title"],
            "properties": {"title": {"type": "string"}}
        });

        let body = to_body(&schema);

        assert_eq!(body.description.as_deref(), Some("Article payload"));
        assert!(body.required);
        assert_eq!(body.schema["required"], json!(["title"]));
        assert_eq!(body.schema["properties"]["title"]["type"], "string");
        assert!(body.schema.get("description").is_none());
    }

    #[test]
    fn test_to_body_optional_without_required_list() {
        let body = to_body(&json!({"type": "object", "properties": {}}));
        assert!(!body.required);
        assert!(body.description.is_none());
    }

    #[test]
    fn test_strip_parameter_fields() {
        let schema = json!({
            "in": "body",
            "name": "JSON payload",
            "required": false,
            "type": "object",
            "properties": {"name": {"type": "string"}, "in": {"type": "string"}}
        });

        let stripped = strip_parameter_fields(&schema);

        assert_eq!(
            stripped,
            json!({
                "type": "object",
                "properties": {"name": {"type": "string"}, "in": {"type": "string"}}
            })
        );
    }
}
