//! Route registry model.
//!
//! These types describe the routers and routes of a service the way the host
//! framework registers them: URL templates in framework syntax, validation
//! steps bound to a request location and declared response descriptors. They
//! are read-only snapshots; documentation generation never mutates them.

use crate::service_error::ServiceError;
use crate::url_template::{is_param_segment, is_version_segment, normalize_url, segments};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type assumed for routes which do not declare any
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP methods a route can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    /// Lower case method name, as used for OpenAPI path item keys
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }
}

/// The location where a parameter value is read from in an HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter embedded in the URL (e.g., `/users/:id`)
    Path,
    /// Query string parameter (e.g., `?page=1&limit=10`)
    Query,
    /// HTTP header parameter
    Header,
}

/// Request data a validation step applies to.
///
/// Accepts the framework spellings `params` and `headers` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Query,
    #[serde(alias = "params")]
    Path,
    #[serde(alias = "headers")]
    Header,
    Body,
}

impl Target {
    /// Parameter location of the target, `None` for the request body
    pub fn location(&self) -> Option<ParameterLocation> {
        match self {
            Target::Query => Some(ParameterLocation::Query),
            Target::Path => Some(ParameterLocation::Path),
            Target::Header => Some(ParameterLocation::Header),
            Target::Body => None,
        }
    }
}

/// A schema given either by the name it is registered under or inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSource {
    Named(String),
    Inline(Value),
}

/// A declared schema bound to a request location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStep {
    pub schema: SchemaSource,
    pub target: Target,
}

impl ValidationStep {
    pub fn new(schema: SchemaSource, target: Target) -> Self {
        Self { schema, target }
    }
}

/// One declared response of a route.
///
/// The discriminant is explicit (`kind`), so the shape of a descriptor is
/// known as soon as it is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseDescriptor {
    /// JSON schema given inline
    #[serde(rename = "schema")]
    Literal { schema: Value },
    /// Name of a schema in the registry
    #[serde(rename = "ref")]
    NamedReference { name: String },
    /// Name of an error type, instantiated with its defaults
    ErrorType { name: String },
    /// An error value which describes itself
    #[serde(rename = "error")]
    ErrorInstance(ServiceError),
}

/// HTTP status code of a response, accepted as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawStatusCode", into = "String")]
pub struct StatusCode(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatusCode {
    Number(u16),
    Text(String),
}

impl From<RawStatusCode> for StatusCode {
    fn from(raw: RawStatusCode) -> Self {
        match raw {
            RawStatusCode::Number(n) => StatusCode(n.to_string()),
            RawStatusCode::Text(s) => StatusCode(s),
        }
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code.to_string())
    }
}

/// API version of a router, accepted as a number (`1`, `2.1`) or a string (`"v1.0"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    Number(f64),
    Text(String),
}

impl VersionTag {
    /// Version string in `v<major>.<minor>` form: `1` -> `v1.0`, `"2.1"` -> `v2.1`
    pub fn version_string(&self) -> String {
        let raw = match self {
            VersionTag::Number(n) => n.to_string(),
            VersionTag::Text(s) => s.trim().to_string(),
        };
        let raw = raw.strip_prefix('v').unwrap_or(&raw);

        if raw.contains('.') {
            format!("v{}", raw)
        } else {
            format!("v{}.0", raw)
        }
    }
}

/// One HTTP method + URL template endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(alias = "type")]
    pub method: HttpMethod,
    /// URL template relative to the router
    pub url: String,
    /// Explicit route name, used for the uid instead of the URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_method_name: Option<String>,
    /// Validation steps in declaration order
    #[serde(default)]
    pub validate: Vec<ValidationStep>,
    /// Declared responses per status code
    #[serde(default)]
    pub responses: IndexMap<StatusCode, Vec<ResponseDescriptor>>,
    /// Accepted request content types
    #[serde(default, alias = "acceptsContentType")]
    pub accepts: Vec<String>,
    /// Queue binding options of routes served over AMQP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amqp: Option<Value>,
}

impl Route {
    /// Create a new Route with minimal required fields
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            name: None,
            uid: None,
            summary: None,
            description: None,
            sdk_method_name: None,
            validate: Vec::new(),
            responses: IndexMap::new(),
            accepts: Vec::new(),
            amqp: None,
        }
    }

    /// Append a validation step
    pub fn validate(mut self, schema: SchemaSource, target: Target) -> Self {
        self.validate.push(ValidationStep::new(schema, target));
        self
    }

    /// Append a response descriptor for a status code
    pub fn responds_with(mut self, code: u16, descriptor: ResponseDescriptor) -> Self {
        self.responses
            .entry(StatusCode::from(code))
            .or_default()
            .push(descriptor);
        self
    }

    /// Content types the route accepts, `application/json` when none are declared
    pub fn accepted_content_types(&self) -> Vec<String> {
        if self.accepts.is_empty() {
            vec![DEFAULT_CONTENT_TYPE.to_string()]
        } else {
            self.accepts.clone()
        }
    }
}

/// A collection of routes sharing a URL prefix and API version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Router {
    /// Base URL template, may contain the `{version}` placeholder
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionTag>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl Router {
    pub fn new(url: &str, version: Option<VersionTag>) -> Self {
        Self {
            url: url.to_string(),
            version,
            routes: Vec::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Version string of the router, `None` for unversioned routers
    pub fn version_string(&self) -> Option<String> {
        self.version.as_ref().map(VersionTag::version_string)
    }

    /// Normalized router URL with the `{version}` placeholder substituted
    pub fn url(&self) -> String {
        match self.version_string() {
            Some(version) => normalize_url(&self.url.replace("{version}", &version)),
            None => normalize_url(&self.url),
        }
    }

    /// Normalized full URL of a route of this router
    pub fn route_url(&self, route: &Route) -> String {
        normalize_url(&format!("{}/{}", self.url(), route.url))
    }

    /// Unique identifier of a route: `<method><Name>_<version>`.
    ///
    /// An explicit `uid` wins. `Name` is the route name when given, otherwise
    /// the PascalCase join of the static segments of the route URL.
    pub fn route_uid(&self, route: &Route) -> String {
        if let Some(uid) = &route.uid {
            return uid.clone();
        }

        let base = format!("{}{}", route.method.as_str(), self.route_name(route));
        match self.version_string() {
            Some(version) => format!("{}_{}", base, version),
            None => base,
        }
    }

    /// SDK method name of a route, defaults to the uid without its version suffix
    pub fn sdk_method_name(&self, route: &Route) -> String {
        if let Some(name) = &route.sdk_method_name {
            return name.clone();
        }
        format!("{}{}", route.method.as_str(), self.route_name(route))
    }

    fn route_name(&self, route: &Route) -> String {
        if let Some(name) = &route.name {
            return capitalize(name);
        }

        segments(&self.route_url(route))
            .into_iter()
            .filter(|s| !is_param_segment(s) && !is_version_segment(s))
            .flat_map(|s| s.split(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
