//! Description of route parameters and request bodies.
//!
//! Validation steps are translated in declaration order. Parameters declared
//! more than once keep their first declaration: a plugin registering its own
//! validation before the route's explicit `validate` call takes precedence.

use crate::error::Result;
use crate::openapi_builder::{MediaType, Parameter, RequestBody};
use crate::route::{ParameterLocation, ValidationStep};
use crate::schema_converter::{to_body, to_parameters};
use crate::schema_registry::SchemaRegistry;
use crate::url_template::path_param_names;
use indexmap::IndexMap;
use log::debug;
use serde_json::json;
use std::collections::HashSet;

/// Parameters and request body of one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParameters {
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

/// Describe the parameters and request body of a route.
///
/// * `steps` - validation steps of the route in declaration order
/// * `registry` - resolver of named schema references
/// * `url` - normalized URL (`{name}` placeholders) the operation is documented under
/// * `content_types` - request content types accepted by the route
///
/// # Errors
///
/// Returns [`crate::error::Error::SchemaNotFound`] when a named schema can
/// not be resolved.
pub fn describe_route_parameters(
    steps: &[ValidationStep],
    registry: &SchemaRegistry,
    url: &str,
    content_types: &[String],
) -> Result<RouteParameters> {
    let mut parameters = Vec::new();
    let mut request_body = None;

    for step in steps {
        let schema = registry.resolve(&step.schema)?;

        match step.target.location() {
            Some(location) => {
                let described = to_parameters(&schema, location);
                debug!("Described {} {:?} parameters", described.len(), location);
                parameters.extend(described);
            }
            None => {
                if request_body.is_some() {
                    debug!("Replacing previously described request body");
                }
                let body = to_body(&schema);
                let content: IndexMap<String, MediaType> = content_types
                    .iter()
                    .map(|mime| {
                        (
                            mime.clone(),
                            MediaType {
                                schema: body.schema.clone(),
                            },
                        )
                    })
                    .collect();

                request_body = Some(RequestBody {
                    description: body.description.unwrap_or_default(),
                    required: body.required,
                    content,
                });
            }
        }
    }

    let mut parameters = remove_duplicate_parameters(parameters);
    ensure_all_path_params_included(&mut parameters, url);
    sort_url_path_parameters(&mut parameters, url);

    Ok(RouteParameters {
        parameters,
        request_body,
    })
}

/// Keep the first declaration of every `(name, in)` pair
pub fn remove_duplicate_parameters(parameters: Vec<Parameter>) -> Vec<Parameter> {
    let mut seen = HashSet::new();
    parameters
        .into_iter()
        .filter(|param| seen.insert((param.name.clone(), param.location)))
        .collect()
}

/// Add a required string path parameter for every URL placeholder lacking one
pub fn ensure_all_path_params_included(parameters: &mut Vec<Parameter>, url: &str) {
    for name in path_param_names(url) {
        let present = parameters
            .iter()
            .any(|p| p.location == ParameterLocation::Path && p.name == name);

        if !present {
            debug!("Adding undeclared path parameter: {}", name);
            parameters.push(Parameter {
                name,
                location: ParameterLocation::Path,
                required: true,
                schema: json!({"type": "string"}),
                description: None,
            });
        }
    }
}

/// Sort path parameters first, in the order they appear in the URL.
///
/// e.g. for `/user/{username}/apps/{app_id}` the `username` parameter always
/// precedes `app_id`. Other parameters keep their relative order.
pub fn sort_url_path_parameters(parameters: &mut [Parameter], url: &str) {
    let names = path_param_names(url);

    parameters.sort_by_key(|param| match param.location {
        ParameterLocation::Path => (
            0,
            names
                .iter()
                .position(|n| *n == param.name)
                .unwrap_or(usize::MAX),
        ),
        _ => (1, 0),
    });
}
