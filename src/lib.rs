//! openapi-from-routes - OpenAPI documentation from a web service's route registry.
//!
//! This library generates OpenAPI 3.0 documents from route and validation
//! metadata: the routers and routes a service registers, the JSON schemas its
//! validation steps check request data against and the schemas or error types
//! its routes declare as responses. One document is produced per API version,
//! with request examples (curl, JavaScript) and a markdown route index.
//!
//! # Architecture
//!
//! 1. [`manifest`] - Loads the service manifest: apps, routers, schemas and error types
//! 2. [`route`] - Route registry model: routers, routes, validation steps, response descriptors
//! 3. [`url_template`] - Converts framework URL templates to OpenAPI path templates
//! 4. [`versioning`] - Groups routers by API version and resolves base paths
//! 5. [`tags`] - Derives operation tags from the URL structure
//! 6. [`schema_registry`] / [`schema_converter`] - Resolve and convert JSON schemas
//! 7. [`parameters`] / [`responses`] - Describe operation parameters, request bodies and responses
//! 8. [`faker`] / [`renderer`] - Synthesize example values and render code samples
//! 9. [`openapi_builder`] - Assembles one OpenAPI document per API version
//! 10. [`doc`] - Documentation lifecycle: readme loading, generation and spec lookup
//! 11. [`serializer`] - Serializes the documents to YAML or JSON
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_routes::{
//!     doc::DocApp,
//!     manifest::ServiceManifest,
//!     serializer::serialize_yaml,
//! };
//! use std::path::Path;
//!
//! let manifest = ServiceManifest::load(Path::new("service.json")).unwrap();
//! let registry = manifest.registry();
//! let errors = manifest.error_catalog();
//!
//! for app in &manifest.apps {
//!     let mut doc = DocApp::new(app, &registry, &errors, &manifest.project_root());
//!     let specs = doc.initialize().unwrap();
//!     println!("{}", serialize_yaml(specs).unwrap());
//! }
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod doc;
pub mod error;
pub mod faker;
pub mod manifest;
pub mod openapi_builder;
pub mod parameters;
pub mod renderer;
pub mod responses;
pub mod route;
pub mod schema_converter;
pub mod schema_registry;
pub mod serializer;
pub mod service_error;
pub mod tags;
pub mod url_template;
pub mod versioning;
