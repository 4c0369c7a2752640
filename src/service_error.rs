//! Service error types which know how to describe themselves as response schemas.
//!
//! Routes declare error responses either with an error value carried inline or
//! with the name of an error type. Error types live in an [`ErrorCatalog`]
//! which ships with the framework's common errors and can be extended from the
//! service manifest.

use crate::schema_converter::BodySchema;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Anything that can describe itself as a response body schema
pub trait SelfDescribing {
    /// Body schema of the value, `None` when it can not be described
    fn describe(&self) -> Option<BodySchema>;
}

/// An error value as it is returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// HTTP status code
    pub code: u16,
    /// Human readable message
    pub message: String,
    /// Machine readable error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_code: Option<String>,
    /// Description of the response the error is sent with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelfDescribing for ServiceError {
    fn describe(&self) -> Option<BodySchema> {
        let mut properties = Map::new();
        properties.insert(
            "code".to_string(),
            json!({"type": "integer", "format": "int64", "example": self.code}),
        );
        properties.insert(
            "message".to_string(),
            json!({"type": "string", "example": self.message}),
        );
        properties.insert("uid".to_string(), json!({"type": "number"}));

        let mut required = vec!["code", "uid", "message"];
        if let Some(api_code) = &self.api_code {
            properties.insert(
                "apiCode".to_string(),
                json!({"type": "string", "enum": [api_code]}),
            );
            required.push("apiCode");
        }

        Some(BodySchema {
            description: Some(
                self.description
                    .clone()
                    .unwrap_or_else(|| self.message.clone()),
            ),
            required: false,
            schema: json!({
                "type": "object",
                "required": required,
                "properties": Value::Object(properties),
            }),
        })
    }
}

/// An error type: the defaults its instances are created with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorType {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether instances of the type can describe themselves
    #[serde(default = "default_self_describing")]
    pub self_describing: bool,
}

fn default_self_describing() -> bool {
    true
}

impl ErrorType {
    pub fn new(code: u16, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            api_code: None,
            description: None,
            self_describing: true,
        }
    }

    pub fn with_api_code(mut self, api_code: &str) -> Self {
        self.api_code = Some(api_code.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Create an error value with the type's defaults
    pub fn instantiate(&self) -> ServiceError {
        ServiceError {
            code: self.code,
            message: self.message.clone(),
            api_code: self.api_code.clone(),
            description: self.description.clone(),
        }
    }
}

/// Error types known to the service, by name
#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    types: IndexMap<String, ErrorType>,
}

impl ErrorCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Catalog with the framework's common error types
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            "InternalServerError",
            ErrorType::new(500, "Internal Server Error").with_description(
                "Please, contact official support. Don't repeat the request in the nearest future.",
            ),
        );
        catalog.register(
            "RequestError",
            ErrorType::new(400, "Bad Request").with_api_code("badRequest"),
        );
        catalog.register(
            "ValidationError",
            ErrorType::new(400, "Invalid request data")
                .with_api_code("validationFailed")
                .with_description("Request data did not pass validation"),
        );
        catalog.register(
            "UnauthorizedError",
            ErrorType::new(401, "Unauthorized").with_api_code("unauthorized"),
        );
        catalog
    }

    /// Register or replace an error type
    pub fn register(&mut self, name: &str, error_type: ErrorType) {
        debug!("Registering error type: {}", name);
        self.types.insert(name.to_string(), error_type);
    }

    /// Look up an error type by name
    pub fn get(&self, name: &str) -> Option<&ErrorType> {
        self.types.get(name)
    }

    /// Instantiate a named error type, `None` when the type is unknown or
    /// its instances do not describe themselves
    pub fn instantiate(&self, name: &str) -> Option<ServiceError> {
        match self.types.get(name) {
            Some(error_type) if error_type.self_describing => Some(error_type.instantiate()),
            Some(_) => {
                debug!("Error type {} does not describe itself", name);
                None
            }
            None => {
                debug!("Unknown error type: {}", name);
                None
            }
        }
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Extend<(String, ErrorType)> for ErrorCatalog {
    fn extend<T: IntoIterator<Item = (String, ErrorType)>>(&mut self, iter: T) {
        for (name, error_type) in iter {
            self.register(&name, error_type);
        }
    }
}
