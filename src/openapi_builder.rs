//! OpenAPI object model and document assembly.
//!
//! [`generate`] walks the routers of an app version by version and produces
//! one [`OpenApiDocument`] per version. Each document is put together by an
//! [`OpenApiBuilder`] from the outputs of the parameter and response
//! describers, the tag heat-map and the code sample renderer.

use crate::error::{Error, Result};
use crate::faker::generate_route_parameters;
use crate::manifest::App;
use crate::parameters::describe_route_parameters;
use crate::renderer::{Renderer, RouteLink};
use crate::responses::describe_route_responses;
use crate::route::{HttpMethod, ParameterLocation, Route, Router, DEFAULT_CONTENT_TYPE};
use crate::schema_registry::SchemaRegistry;
use crate::service_error::ErrorCatalog;
use crate::tags::TagHeatmap;
use crate::url_template::{absolute_url, normalize_url, normalize_url_parameters, segments};
use crate::versioning::{find_common_base_path, group_routers_by_version, resolve_host};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// OpenAPI version of generated documents
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Title used when neither the doc nor the app config provides one
pub const DEFAULT_TITLE: &str = "API documentation";

/// Generated documents by API version
pub type SpecMap = IndexMap<String, OpenApiDocument>;

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Server the paths are relative to
    servers: Vec<Server>,
    /// Paths collection (relative URL -> PathItem)
    paths: IndexMap<String, PathItem>,
    /// Route index rendered into the description
    links: Vec<RouteLink>,
    /// Markdown appended to the description after the route index
    readme: Option<String>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API description, markdown
    pub description: String,
    /// API version
    pub version: String,
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// URL template, e.g. `{protocol}{host}{basePath}`
    pub url: String,
    /// Default values of the URL template variables
    pub variables: IndexMap<String, ServerVariable>,
}

/// OpenAPI Server Variable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,
}

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Operation registered for a method
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Register an operation for a method, replacing a previous one
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) {
        let slot = match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Trace => &mut self.trace,
        };
        *slot = Some(operation);
    }
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID, the route uid
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// At most one tag derived from the URL structure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters (path, query, header)
    pub parameters: Vec<Parameter>,
    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code
    pub responses: IndexMap<String, Response>,
    /// Method name of the route in generated SDKs
    #[serde(rename = "x-sdkMethodName")]
    pub sdk_method_name: String,
    /// Request examples
    #[serde(rename = "x-code-samples")]
    pub code_samples: Vec<CodeSample>,
    /// Queue binding options of AMQP routes
    #[serde(rename = "x-amqp", skip_serializing_if = "Option::is_none")]
    pub amqp: Option<Value>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location (path, query, header)
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter schema
    pub schema: Value,
    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub description: String,
    /// Whether the request body is required
    pub required: bool,
    /// Content types and their schemas
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: Value,
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
    /// Response content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Entry of the `x-code-samples` extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSample {
    pub lang: String,
    pub source: String,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    pub servers: Vec<Server>,
    /// API paths
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder for an API version
    pub fn new(version: &str) -> Self {
        debug!("Initializing OpenApiBuilder for version {}", version);
        Self {
            info: Info {
                title: DEFAULT_TITLE.to_string(),
                description: String::new(),
                version: version.to_string(),
            },
            servers: Vec::new(),
            paths: IndexMap::new(),
            links: Vec::new(),
            readme: None,
        }
    }

    /// Set the document title
    pub fn with_title(mut self, title: &str) -> Self {
        self.info.title = title.to_string();
        self
    }

    /// Set markdown appended to the description
    pub fn with_readme(mut self, readme: Option<String>) -> Self {
        self.readme = readme;
        self
    }

    /// Set the server the paths are relative to.
    ///
    /// The server URL is the `{protocol}{host}{basePath}` template, the given
    /// values become the defaults of its variables. `https` and `https:` are
    /// both accepted as protocol and rendered as `https://`.
    pub fn with_server(mut self, protocol: &str, host: &str, base_path: &str) -> Self {
        let mut variables = IndexMap::new();
        variables.insert(
            "protocol".to_string(),
            ServerVariable {
                default: protocol_prefix(protocol),
            },
        );
        variables.insert(
            "host".to_string(),
            ServerVariable {
                default: host.to_string(),
            },
        );
        variables.insert(
            "basePath".to_string(),
            ServerVariable {
                default: base_path.to_string(),
            },
        );

        self.servers = vec![Server {
            url: "{protocol}{host}{basePath}".to_string(),
            variables,
        }];
        self
    }

    /// Add an operation under a relative URL
    pub fn add_operation(&mut self, url: &str, method: HttpMethod, operation: Operation) {
        debug!("Adding operation: {} {}", method.as_str().to_uppercase(), url);

        self.links.push(RouteLink {
            method: method.as_str().to_string(),
            url: url.to_string(),
            uid: operation.operation_id.clone(),
        });

        self.paths
            .entry(url.to_string())
            .or_default()
            .set_operation(method, operation);
    }

    /// Build the final OpenAPI document.
    ///
    /// The description is the rendered route index followed by the readme.
    pub fn build(self, renderer: &Renderer) -> Result<OpenApiDocument> {
        debug!("Building OpenAPI document for version {}", self.info.version);

        let mut description = renderer.render_markdown_readme(&self.links)?;
        if let Some(readme) = self.readme {
            description.push_str(&readme);
        }

        Ok(OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                description,
                ..self.info
            },
            servers: self.servers,
            paths: self.paths,
        })
    }
}

/// Generate one OpenAPI document per API version of an app.
///
/// * `app` - the app whose routers are documented
/// * `registry` - named schemas referenced by validation steps and responses
/// * `errors` - error types referenced by responses
/// * `readme` - markdown per version appended to the document description
///
/// Versions without any route are skipped, so an app without routers yields
/// an empty map.
///
/// # Errors
///
/// Returns [`crate::error::Error::SchemaNotFound`] when a route references a
/// schema missing from the registry and [`crate::error::Error::DuplicateRouteUid`]
/// when two routes of one version resolve to the same uid.
pub fn generate(
    app: &App,
    registry: &SchemaRegistry,
    errors: &ErrorCatalog,
    readme: Option<&IndexMap<String, String>>,
) -> Result<SpecMap> {
    let renderer = Renderer::new()?;
    let mut specs = SpecMap::new();

    for (version, routers) in group_routers_by_version(&app.routers) {
        if routers.iter().all(|router| router.routes.is_empty()) {
            debug!("Skipping version {} without routes", version);
            continue;
        }

        info!("Generating OpenAPI document for {} {}", app.name, version);
        ensure_unique_uids(&routers)?;

        let common_base_path = find_common_base_path(&routers);
        let (host, base_path) = resolve_host(
            app.config.host.as_deref().unwrap_or_default(),
            app.config.base_path.as_deref().unwrap_or_default(),
            &common_base_path,
        );

        let mut builder = OpenApiBuilder::new(&version)
            .with_title(&app.config.doc_title())
            .with_server(
                app.config.protocol.as_deref().unwrap_or_default(),
                &host,
                &normalize_url_parameters(&base_path),
            )
            .with_readme(readme.and_then(|r| r.get(&version)).cloned());

        let entries: Vec<(String, String)> = routers
            .iter()
            .flat_map(|router| {
                router
                    .routes
                    .iter()
                    .map(move |route| (router.route_uid(route), router.route_url(route)))
            })
            .collect();
        let heatmap = TagHeatmap::build(
            entries
                .iter()
                .map(|(uid, url)| (uid.as_str(), url.as_str())),
        );

        let base_segments = segments(&common_base_path).len();

        for router in &routers {
            for route in &router.routes {
                let full_url = router.route_url(route);
                let relative_url = relative_url(&full_url, base_segments);
                let operation = describe_operation(
                    app, router, route, &relative_url, &heatmap, registry, errors, &renderer,
                )?;
                builder.add_operation(&relative_url, route.method, operation);
            }
        }

        specs.insert(version, builder.build(&renderer)?);
    }

    info!("Generated {} OpenAPI documents for {}", specs.len(), app.name);
    Ok(specs)
}

/// Operation ids, route index anchors and tags are keyed by uid, so a uid may
/// only be used once per version.
fn ensure_unique_uids(routers: &[&Router]) -> Result<()> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for router in routers {
        for route in &router.routes {
            let uid = router.route_uid(route);
            let endpoint = format!(
                "{} {}",
                route.method.as_str().to_uppercase(),
                router.route_url(route)
            );
            if let Some(first) = seen.insert(uid.clone(), endpoint.clone()) {
                return Err(Error::DuplicateRouteUid {
                    uid,
                    first,
                    second: endpoint,
                });
            }
        }
    }
    Ok(())
}

/// URL of a route relative to the base path, in OpenAPI syntax
fn relative_url(full_url: &str, base_segments: usize) -> String {
    let rest: Vec<&str> = segments(full_url).into_iter().skip(base_segments).collect();
    normalize_url_parameters(&normalize_url(&rest.join("/")))
}

#[allow(clippy::too_many_arguments)]
fn describe_operation(
    app: &App,
    router: &Router,
    route: &Route,
    relative_url: &str,
    heatmap: &TagHeatmap,
    registry: &SchemaRegistry,
    errors: &ErrorCatalog,
    renderer: &Renderer,
) -> Result<Operation> {
    let uid = router.route_uid(route);
    debug!("Describing route {}", uid);

    let described = describe_route_parameters(
        &route.validate,
        registry,
        relative_url,
        &route.accepted_content_types(),
    )?;
    let responses = describe_route_responses(&route.responses, registry, errors)?;

    let mut operation = Operation {
        operation_id: uid.clone(),
        tags: heatmap.tags_for(&uid),
        summary: route.summary.clone(),
        description: route.description.clone(),
        parameters: described.parameters,
        // trace requests carry no body
        request_body: described
            .request_body
            .filter(|_| route.method != HttpMethod::Trace),
        responses,
        sdk_method_name: router.sdk_method_name(route),
        code_samples: Vec::new(),
        amqp: route.amqp.clone(),
    };

    operation.code_samples = generate_code_samples(
        &operation,
        route.method,
        app.config.base_url.as_deref().unwrap_or_default(),
        &router.route_url(route),
        renderer,
    )?;

    Ok(operation)
}

/// JavaScript and Curl request examples filled with synthesized values
fn generate_code_samples(
    operation: &Operation,
    method: HttpMethod,
    base_url: &str,
    url: &str,
    renderer: &Renderer,
) -> Result<Vec<CodeSample>> {
    let content_type = operation.request_body.as_ref().and_then(|body| {
        if body.content.contains_key(DEFAULT_CONTENT_TYPE) {
            Some(DEFAULT_CONTENT_TYPE.to_string())
        } else {
            body.content.keys().last().cloned()
        }
    });
    let body_schema = match (&operation.request_body, &content_type) {
        (Some(body), Some(mime)) => body.content.get(mime).map(|media| &media.schema),
        _ => None,
    };

    let mut sample = generate_route_parameters(&operation.parameters, body_schema);
    if let Some(mime) = content_type {
        if !sample.header.contains_key("content-type") {
            sample
                .header
                .insert("content-type".to_string(), Value::String(mime));
        }
    }

    Ok(vec![
        CodeSample {
            lang: "JavaScript".to_string(),
            source: renderer.render_javascript_example(
                method,
                &absolute_url(base_url, url, &sample.path, None),
                &sample,
            )?,
        },
        CodeSample {
            lang: "Curl".to_string(),
            source: renderer.render_curl_example(
                method,
                &absolute_url(base_url, url, &sample.path, Some(&sample.query)),
                &sample,
            )?,
        },
    ])
}

/// `https`, `https:` and `https://` all become `https://`
fn protocol_prefix(protocol: &str) -> String {
    let scheme = protocol.trim_end_matches('/').trim_end_matches(':');
    if scheme.is_empty() {
        String::new()
    } else {
        format!("{}://", scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::AppConfig;
    use crate::route::{ResponseDescriptor, SchemaSource, Target, VersionTag};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn app(routers: Vec<Router>) -> App {
        App {
            name: "test".to_string(),
            config: AppConfig::default(),
            routers,
        }
    }

    fn operation(uid: &str) -> Operation {
        Operation {
            operation_id: uid.to_string(),
            tags: None,
            summary: None,
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
            sdk_method_name: uid.to_string(),
            code_samples: Vec::new(),
            amqp: None,
        }
    }

    fn generate_default(app: &App) -> SpecMap {
        generate(app, &SchemaRegistry::new(), &ErrorCatalog::with_builtins(), None).unwrap()
    }

    #[test]
    fn test_new_builder() {
        let renderer = Renderer::new().unwrap();
        let doc = OpenApiBuilder::new("v1.0").build(&renderer).unwrap();

        assert_eq!(doc.openapi, "3.0.0");
        assert_eq!(doc.info.title, "API documentation");
        assert_eq!(doc.info.version, "v1.0");
        assert!(doc.servers.is_empty());
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_with_server() {
        let renderer = Renderer::new().unwrap();
        let doc = OpenApiBuilder::new("v1.0")
            .with_server("https:", "api.example.com", "/v1.0")
            .build(&renderer)
            .unwrap();

        let server = &doc.servers[0];
        assert_eq!(server.url, "{protocol}{host}{basePath}");
        assert_eq!(server.variables["protocol"].default, "https://");
        assert_eq!(server.variables["host"].default, "api.example.com");
        assert_eq!(server.variables["basePath"].default, "/v1.0");
    }

    #[test]
    fn test_protocol_prefix() {
        assert_eq!(protocol_prefix("http"), "http://");
        assert_eq!(protocol_prefix("https:"), "https://");
        assert_eq!(protocol_prefix("https://"), "https://");
        assert_eq!(protocol_prefix(""), "");
    }

    #[test]
    fn test_add_operations_share_path_item() {
        let renderer = Renderer::new().unwrap();
        let mut builder = OpenApiBuilder::new("v1.0");
        builder.add_operation("/{id}", HttpMethod::Get, operation("getUser"));
        builder.add_operation("/{id}", HttpMethod::Delete, operation("deleteUser"));

        let doc = builder.build(&renderer).unwrap();

        assert_eq!(doc.paths.len(), 1);
        let item = &doc.paths["/{id}"];
        assert_eq!(item.operation(HttpMethod::Get).unwrap().operation_id, "getUser");
        assert_eq!(item.operation(HttpMethod::Delete).unwrap().operation_id, "deleteUser");
        assert!(item.post.is_none());
        assert!(doc.info.description.contains("[/{id}](#operation/getUser)"));
    }

    #[test]
    fn test_readme_follows_route_index() {
        let renderer = Renderer::new().unwrap();
        let mut builder =
            OpenApiBuilder::new("v1.0").with_readme(Some("# Changelog\n".to_string()));
        builder.add_operation("/", HttpMethod::Get, operation("getRoot"));

        let doc = builder.build(&renderer).unwrap();

        assert!(doc.info.description.starts_with("\n<details>"));
        assert!(doc.info.description.ends_with("</details>\n# Changelog\n"));
    }

    #[test]
    fn test_operation_serialization_keys() {
        let mut op = operation("getUser_v1.0");
        op.amqp = Some(json!({"queue": "users"}));

        let value = serde_json::to_value(&op).unwrap();

        assert_eq!(value["operationId"], "getUser_v1.0");
        assert_eq!(value["x-sdkMethodName"], "getUser_v1.0");
        assert_eq!(value["x-amqp"], json!({"queue": "users"}));
        assert_eq!(value["parameters"], json!([]));
        assert!(value.get("tags").is_none());
        assert!(value.get("requestBody").is_none());
    }

    #[test]
    fn test_generate_without_routers() {
        assert!(generate_default(&app(Vec::new())).is_empty());
    }

    #[test]
    fn test_generate_skips_versions_without_routes() {
        let specs = generate_default(&app(vec![Router::new(
            "/empty",
            Some(VersionTag::Number(1.0)),
        )]));
        assert!(specs.is_empty());
    }

    #[test]
    fn test_generate_rejects_duplicate_uids() {
        let router = Router::new("/user", Some(VersionTag::Number(1.0)))
            .route(Route::new(HttpMethod::Get, "/"))
            .route(Route::new(HttpMethod::Get, "/:id"));

        let result = generate(
            &app(vec![router]),
            &SchemaRegistry::new(),
            &ErrorCatalog::with_builtins(),
            None,
        );

        match result {
            Err(Error::DuplicateRouteUid { uid, first, second }) => {
                assert_eq!(uid, "getUser_v1.0");
                assert_eq!(first, "GET /user");
                assert_eq!(second, "GET /user/:id");
            }
            other => panic!("Expected a duplicate uid error, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_named_route_resolves_uid_clash() {
        let mut by_id = Route::new(HttpMethod::Get, "/:id");
        by_id.name = Some("userById".to_string());
        let router = Router::new("/user", Some(VersionTag::Number(1.0)))
            .route(Route::new(HttpMethod::Get, "/"))
            .route(by_id);

        let specs = generate_default(&app(vec![router]));

        let doc = &specs["v1.0"];
        assert_eq!(doc.paths["/"].get.as_ref().unwrap().operation_id, "getUser_v1.0");
        assert_eq!(
            doc.paths["/{id}"].get.as_ref().unwrap().operation_id,
            "getUserById_v1.0"
        );
    }

    #[test]
    fn test_generate_trace_route_has_no_request_body() {
        let body = SchemaSource::Inline(json!({"type": "object", "properties": {}}));
        let router = Router::new("/debug", Some(VersionTag::Number(1.0)))
            .route(Route::new(HttpMethod::Trace, "/").validate(body.clone(), Target::Body))
            .route(Route::new(HttpMethod::Post, "/").validate(body, Target::Body));

        let specs = generate_default(&app(vec![router]));

        let item = &specs["v1.0"].paths["/"];
        assert!(item.trace.as_ref().unwrap().request_body.is_none());
        assert!(item.post.as_ref().unwrap().request_body.is_some());
    }

    #[test]
    fn test_generate_relative_paths_and_base_path() {
        let router = Router::new("/article", Some(VersionTag::Number(2.1)))
            .route(Route::new(HttpMethod::Get, "/:id"));
        let comments = Router::new("/article/comments", Some(VersionTag::Number(2.1)))
            .route(Route::new(HttpMethod::Get, "/"));

        let specs = generate_default(&app(vec![router, comments]));

        let doc = &specs["v2.1"];
        assert_eq!(doc.servers[0].variables["basePath"].default, "/article");
        assert!(doc.paths.contains_key("/{id}"));
        assert!(doc.paths.contains_key("/comments"));
    }

    #[test]
    fn test_generate_code_samples() {
        let route = Route::new(HttpMethod::Post, "/curl/:id")
            .validate(
                SchemaSource::Inline(json!({
                    "required": ["id"],
                    "properties": {"id": {"type": "integer", "minimum": 0}}
                })),
                Target::Path,
            )
            .validate(
                SchemaSource::Inline(json!({
                    "type": "object",
                    "required": ["username"],
                    "properties": {"username": {"type": "string"}}
                })),
                Target::Body,
            )
            .responds_with(
                200,
                ResponseDescriptor::Literal {
                    schema: json!({"type": "object"}),
                },
            );
        let mut app = app(vec![
            Router::new("/api/{version}", Some(VersionTag::Number(1.0))).route(route)
        ]);
        app.config.base_url = Some("http://127.0.0.1".to_string());

        let specs = generate_default(&app);

        let op = specs["v1.0"].paths["/curl/{id}"]
            .operation(HttpMethod::Post)
            .cloned()
            .unwrap();
        assert_eq!(op.code_samples.len(), 2);
        assert_eq!(op.code_samples[0].lang, "JavaScript");
        assert_eq!(op.code_samples[1].lang, "Curl");
        assert!(op.code_samples[1]
            .source
            .starts_with("curl -X POST http://127.0.0.1/api/v1.0/curl/0"));
        assert!(op.code_samples[1]
            .source
            .contains("-H \"content-type: application/json\""));
    }

    #[test]
    fn test_relative_url() {
        assert_eq!(relative_url("/user/:id", 1), "/{id}");
        assert_eq!(relative_url("/user", 1), "/");
        assert_eq!(relative_url("/api/v1.0/curl/:id", 2), "/curl/{id}");
    }
}
