//! Service manifest loading.
//!
//! A manifest is a snapshot of a service's route registry: its apps with their
//! configuration and routers, the named validation schemas and the error
//! types routes may respond with. JSON is expected unless the file has a
//! `.yaml` or `.yml` extension.

use crate::error::{Error, Result};
use crate::openapi_builder::DEFAULT_TITLE;
use crate::route::Router;
use crate::schema_registry::SchemaRegistry;
use crate::service_error::{ErrorCatalog, ErrorType};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A service with its apps, schemas and error types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceManifest {
    pub apps: Vec<App>,
    /// Named validation schemas
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
    /// Error types in addition to the built-in ones
    #[serde(default)]
    pub errors: IndexMap<String, ErrorType>,
    /// Directory readme paths are relative to, set by [`ServiceManifest::load`]
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

/// An app of the service, documented independently of other apps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub config: AppConfig,
    #[serde(default)]
    pub routers: Vec<Router>,
}

/// App configuration relevant to documentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Host the app is reachable at, e.g. `api.example.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// URL scheme, `http` or `https`, with or without a trailing colon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Path prefix the app is served under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Absolute URL used in code samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub doc: DocConfig,
}

impl AppConfig {
    /// Document title: doc title, then app title, then a generic fallback
    pub fn doc_title(&self) -> String {
        self.doc
            .title
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

/// Documentation settings of an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown sources per API version
    #[serde(default)]
    pub readme: IndexMap<String, ReadmeSource>,
}

/// One readme path or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadmeSource {
    One(String),
    Many(Vec<String>),
}

impl ReadmeSource {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            ReadmeSource::One(path) => vec![path.as_str()],
            ReadmeSource::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

impl ServiceManifest {
    /// Load a manifest from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// * [`Error::ManifestNotFound`] when the file does not exist
    /// * [`Error::InvalidManifest`] when it does not describe a service with `apps`
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ManifestNotFound(path.to_path_buf()),
            _ => Error::IoError(e),
        })?;

        let mut manifest = if is_yaml(path) {
            serde_yaml::from_str::<ServiceManifest>(&content).map_err(|e| invalid(path, e))?
        } else {
            serde_json::from_str::<ServiceManifest>(&content).map_err(|e| invalid(path, e))?
        };

        manifest.root = path.parent().map(Path::to_path_buf);

        info!(
            "Loaded manifest with {} apps, {} schemas and {} error types",
            manifest.apps.len(),
            manifest.schemas.len(),
            manifest.errors.len()
        );
        if manifest.apps.is_empty() {
            warn!("Manifest {} does not declare any app", path.display());
        }

        Ok(manifest)
    }

    /// Registry of the manifest's named schemas
    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::from_schemas(self.schemas.clone())
    }

    /// Built-in error types extended with the manifest's ones
    pub fn error_catalog(&self) -> ErrorCatalog {
        let mut catalog = ErrorCatalog::with_builtins();
        catalog.extend(self.errors.clone());
        catalog
    }

    /// Apps whose names are listed, all apps when the list is empty
    pub fn select_apps(&self, names: &[String]) -> Vec<&App> {
        if names.is_empty() {
            return self.apps.iter().collect();
        }

        for name in names {
            if !self.apps.iter().any(|app| &app.name == name) {
                warn!("App {} is not declared in the manifest", name);
            }
        }

        self.apps
            .iter()
            .filter(|app| names.contains(&app.name))
            .collect()
    }

    /// Directory readme paths are resolved against
    pub fn project_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::InvalidManifest {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    const JSON_MANIFEST: &str = r#"{
        "apps": [
            {
                "name": "public",
                "config": {
                    "host": "api.example.com",
                    "protocol": "https:",
                    "basePath": "/gateway",
                    "doc": {"title": "Public API", "readme": {"v1.0": ["docs/a.md", "docs/b.md"]}}
                },
                "routers": [
                    {"url": "/user", "version": 1, "routes": [{"method": "put", "url": "/:id"}]}
                ]
            },
            {"name": "private"}
        ],
        "schemas": {"user": {"type": "object"}},
        "errors": {"ConflictError": {"code": 409, "message": "Conflict"}}
    }"#;

    #[test]
    fn test_load_json_manifest() {
        let dir = TempDir::new().unwrap();
        let path = create_temp_file(&dir, "service.json", JSON_MANIFEST);

        let manifest = ServiceManifest::load(&path).unwrap();

        assert_eq!(manifest.apps.len(), 2);
        let app = &manifest.apps[0];
        assert_eq!(app.config.base_path.as_deref(), Some("/gateway"));
        assert_eq!(app.config.doc_title(), "Public API");
        assert_eq!(
            app.config.doc.readme["v1.0"].paths(),
            vec!["docs/a.md", "docs/b.md"]
        );
        assert_eq!(app.routers[0].routes.len(), 1);
        assert_eq!(manifest.apps[1].config, AppConfig::default());
        assert_eq!(manifest.project_root(), dir.path());
        assert_eq!(manifest.registry().len(), 1);
        assert!(manifest.error_catalog().instantiate("ConflictError").is_some());
        assert!(manifest.error_catalog().instantiate("InternalServerError").is_some());
    }

    #[test]
    fn test_load_yaml_manifest() {
        let dir = TempDir::new().unwrap();
        let path = create_temp_file(
            &dir,
            "service.yaml",
            "apps:\n  - name: public\n    config:\n      title: Service\n      doc:\n        readme:\n          v1.0: README.md\n",
        );

        let manifest = ServiceManifest::load(&path).unwrap();

        let config = &manifest.apps[0].config;
        assert_eq!(config.doc_title(), "Service");
        assert_eq!(config.doc.readme["v1.0"], ReadmeSource::One("README.md".to_string()));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let result = ServiceManifest::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::ManifestNotFound(_))));
    }

    #[test]
    fn test_manifest_without_apps_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = create_temp_file(&dir, "service.json", r#"{"routers": []}"#);

        let result = ServiceManifest::load(&path);
        assert!(matches!(result, Err(Error::InvalidManifest { .. })));
    }

    #[test]
    fn test_select_apps() {
        let manifest: ServiceManifest = serde_json::from_str(JSON_MANIFEST).unwrap();

        assert_eq!(manifest.select_apps(&[]).len(), 2);

        let selected = manifest.select_apps(&["private".to_string(), "unknown".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "private");
    }

    #[test]
    fn test_server_options_of_doc_config_are_ignored() {
        let manifest: ServiceManifest = serde_json::from_str(
            r#"{"apps": [{"name": "public", "config": {"doc": {"title": "Docs", "tryItOut": true, "listen": 8080}}}]}"#,
        )
        .unwrap();

        assert_eq!(manifest.apps[0].config.doc_title(), "Docs");
    }

    #[test]
    fn test_default_title() {
        assert_eq!(AppConfig::default().doc_title(), "API documentation");
    }
}
