//! Description of route responses.
//!
//! A route may declare several descriptors for the same status code, e.g. two
//! error types both answered with `400`. They are folded into one response:
//! arrays of the JSON schemas are unioned, objects are merged recursively and
//! scalar values keep the first declaration.

use crate::error::Result;
use crate::openapi_builder::{MediaType, Response};
use crate::route::{ResponseDescriptor, SchemaSource, StatusCode};
use crate::schema_converter::{strip_parameter_fields, to_body, BodySchema};
use crate::schema_registry::SchemaRegistry;
use crate::service_error::{ErrorCatalog, SelfDescribing};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

/// Content type responses are documented with
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// OpenAPI requires a non-empty response description
const EMPTY_DESCRIPTION: &str = " ";

/// Describe all declared responses of a route, keyed by status code.
///
/// # Errors
///
/// Returns [`crate::error::Error::SchemaNotFound`] when a named schema can
/// not be resolved. Descriptors which can not describe themselves are skipped.
pub fn describe_route_responses(
    responses: &IndexMap<StatusCode, Vec<ResponseDescriptor>>,
    registry: &SchemaRegistry,
    errors: &ErrorCatalog,
) -> Result<IndexMap<String, Response>> {
    let mut out = IndexMap::new();

    for (code, descriptors) in responses {
        let mut description: Option<String> = None;
        let mut schema = Value::Object(Map::new());

        for descriptor in descriptors {
            let Some(body) = describe_descriptor(descriptor, registry, errors)? else {
                debug!("Skipping response descriptor without description for {}", code.0);
                continue;
            };

            merge_schema(&mut schema, &body.schema);

            if description.is_none() {
                description = body.description.filter(|d| !d.trim().is_empty());
            }
        }

        let schema = strip_parameter_fields(&schema);
        let content = match schema.as_object() {
            Some(object) if object.is_empty() => None,
            _ => {
                let mut content = IndexMap::new();
                content.insert(RESPONSE_MIME_TYPE.to_string(), MediaType { schema });
                Some(content)
            }
        };

        out.insert(
            code.0.clone(),
            Response {
                description: description.unwrap_or_else(|| EMPTY_DESCRIPTION.to_string()),
                content,
            },
        );
    }

    Ok(out)
}

/// Body form of a single descriptor, `None` when it does not describe itself
fn describe_descriptor(
    descriptor: &ResponseDescriptor,
    registry: &SchemaRegistry,
    errors: &ErrorCatalog,
) -> Result<Option<BodySchema>> {
    let body = match descriptor {
        ResponseDescriptor::ErrorInstance(error) => error.describe(),
        ResponseDescriptor::ErrorType { name } => {
            errors.instantiate(name).and_then(|error| error.describe())
        }
        ResponseDescriptor::Literal { schema } => {
            let schema = registry.resolve(&SchemaSource::Inline(schema.clone()))?;
            Some(to_body(&schema))
        }
        ResponseDescriptor::NamedReference { name } => {
            let schema = registry.resolve(&SchemaSource::Named(name.clone()))?;
            Some(to_body(&schema))
        }
    };

    Ok(body)
}

/// Merge `source` into `target`.
///
/// Arrays are unioned without duplicates, objects are merged recursively and
/// any other value already present in `target` is kept.
pub fn merge_schema(target: &mut Value, source: &Value) {
    if target.is_null() {
        *target = source.clone();
        return;
    }

    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => merge_schema(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for item in source {
                if !target.contains(item) {
                    target.push(item.clone());
                }
            }
        }
        _ => {}
    }
}
