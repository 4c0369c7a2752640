//! Example value synthesis for code samples.
//!
//! Values are derived deterministically from JSON schemas so generated
//! documents are stable across runs. Explicit `example`, `default`, `const`
//! and `enum` values are preferred over synthesized ones.

use crate::openapi_builder::Parameter;
use crate::route::ParameterLocation;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Nesting depth after which objects and arrays are left empty
const MAX_DEPTH: usize = 8;

/// Example request data of one route
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleData {
    pub query: Map<String, Value>,
    pub path: Map<String, Value>,
    pub header: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Synthesize example values for route parameters and an optional body schema
pub fn generate_route_parameters(parameters: &[Parameter], body: Option<&Value>) -> SampleData {
    let mut out = SampleData::default();

    for param in parameters {
        let value = sample_value(&param.schema);
        let target = match param.location {
            ParameterLocation::Query => &mut out.query,
            ParameterLocation::Path => &mut out.path,
            ParameterLocation::Header => &mut out.header,
        };
        target.insert(param.name.clone(), value);
    }

    out.body = body.map(sample_value);
    out
}

/// Example value of a JSON schema
pub fn sample_value(schema: &Value) -> Value {
    sample_at_depth(schema, 0)
}

fn sample_at_depth(schema: &Value, depth: usize) -> Value {
    let Some(object) = schema.as_object() else {
        return Value::String("string".to_string());
    };

    for keyword in ["example", "default", "const"] {
        if let Some(value) = object.get(keyword) {
            return value.clone();
        }
    }
    if let Some(first) = object
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
    {
        return first.clone();
    }

    match schema_type(object) {
        "object" => sample_object(object, depth),
        "array" => sample_array(object, depth),
        "integer" => json!(number_bound(object).map(|n| n.ceil() as i64).unwrap_or(0)),
        "number" => json!(number_bound(object).unwrap_or(0.0)),
        "boolean" => Value::Bool(true),
        "null" => Value::Null,
        _ => sample_string(object),
    }
}

/// Declared type, the first one of a type list; inferred from keywords otherwise
fn schema_type(object: &Map<String, Value>) -> &str {
    match object.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("null"),
        _ if object.contains_key("properties") => "object",
        _ if object.contains_key("items") => "array",
        _ => "string",
    }
}

fn number_bound(object: &Map<String, Value>) -> Option<f64> {
    if let Some(minimum) = object.get("minimum").and_then(Value::as_f64) {
        return Some(minimum);
    }
    object
        .get("exclusiveMinimum")
        .and_then(Value::as_f64)
        .map(|n| n + 1.0)
}

fn sample_string(object: &Map<String, Value>) -> Value {
    let formatted = match object.get("format").and_then(Value::as_str) {
        Some("email") => Some("user@example.com"),
        Some("uuid") => Some(""),
        Some("date-time") => Some("2020-01-01T00:00:00Z"),
        Some("date") => Some("2020-01-01"),
        Some("uri") | Some("url") => Some("http://example.com"),
        Some("ipv4") => Some("127.0.0.1"),
        _ => None,
    };
    if let Some(value) = formatted {
        return Value::String(value.to_string());
    }

    let min = object.get("minLength").and_then(Value::as_u64).unwrap_or(0) as usize;
    let max = object.get("maxLength").and_then(Value::as_u64).map(|n| n as usize);

    let mut value = "string".to_string();
    while value.len() < min {
        value.push('s');
    }
    if let Some(max) = max {
        value.truncate(max);
    }
    Value::String(value)
}

fn sample_object(object: &Map<String, Value>, depth: usize) -> Value {
    let mut out = Map::new();
    if depth >= MAX_DEPTH {
        return Value::Object(out);
    }

    let Some(properties) = object.get("properties").and_then(Value::as_object) else {
        return Value::Object(out);
    };
    let required: Vec<&str> = object
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, property) in properties {
        if required.is_empty() || required.contains(&name.as_str()) {
            out.insert(name.clone(), sample_at_depth(property, depth + 1));
        }
    }
    Value::Object(out)
}

fn sample_array(object: &Map<String, Value>, depth: usize) -> Value {
    if depth >= MAX_DEPTH {
        return Value::Array(Vec::new());
    }

    let count = object
        .get("minItems")
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .max(1) as usize;
    let item = object
        .get("items")
        .map(|items| sample_at_depth(items, depth + 1))
        .unwrap_or_else(|| Value::String("string".to_string()));

    Value::Array(vec![item; count])
}
