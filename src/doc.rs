//! Documentation app: readme loading, spec generation and lookup.
//!
//! A [`DocApp`] documents one app of a service. It moves through an explicit
//! lifecycle: `Uninitialized -> Initializing -> Ready | Failed`. Problems
//! that do not prevent generation, such as an unreadable readme file, are
//! recorded as [`DocEvent`]s and logged instead of aborting.

use crate::error::{Error, Result};
use crate::manifest::App;
use crate::openapi_builder::{generate, OpenApiDocument, SpecMap};
use crate::schema_registry::SchemaRegistry;
use crate::service_error::ErrorCatalog;
use indexmap::IndexMap;
use log::{debug, error, info};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static VERSION_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v?\d+(\.\d+)?$").unwrap());

/// Longest accepted version key
const MAX_VERSION_LENGTH: usize = 20;

/// Lifecycle state of a [`DocApp`]
#[derive(Debug, Clone, PartialEq)]
pub enum DocState {
    Uninitialized,
    Initializing,
    Ready(SpecMap),
    Failed(String),
}

/// A problem reported while the documentation was initialized
#[derive(Debug, Clone, PartialEq)]
pub enum DocEvent {
    /// A readme file could not be loaded, generation continued without it
    ReadmeError { path: PathBuf, message: String },
    /// Spec generation failed
    GenerationError { message: String },
}

pub struct DocApp<'a> {
    app: &'a App,
    registry: &'a SchemaRegistry,
    errors: &'a ErrorCatalog,
    /// Directory readme paths are relative to
    project_root: PathBuf,
    state: DocState,
    events: Vec<DocEvent>,
}

impl<'a> DocApp<'a> {
    pub fn new(
        app: &'a App,
        registry: &'a SchemaRegistry,
        errors: &'a ErrorCatalog,
        project_root: &Path,
    ) -> Self {
        Self {
            app,
            registry,
            errors,
            project_root: project_root.to_path_buf(),
            state: DocState::Uninitialized,
            events: Vec::new(),
        }
    }

    /// Load the readme files and generate the specs of every API version.
    ///
    /// Calling it again once the app is ready returns the existing specs.
    ///
    /// # Errors
    ///
    /// Returns the generation error; the app is left in the `Failed` state.
    pub fn initialize(&mut self) -> Result<&SpecMap> {
        if matches!(self.state, DocState::Ready(_)) {
            return self.specs();
        }

        info!("Initializing documentation of {}", self.app.name);
        self.state = DocState::Initializing;

        let readme = self.fetch_readme();
        match generate(self.app, self.registry, self.errors, Some(&readme)) {
            Ok(specs) => {
                debug!("Documentation of {} ready", self.app.name);
                self.state = DocState::Ready(specs);
            }
            Err(e) => {
                error!("Failed to generate documentation of {}: {}", self.app.name, e);
                self.events.push(DocEvent::GenerationError {
                    message: e.to_string(),
                });
                self.state = DocState::Failed(e.to_string());
                return Err(e);
            }
        }

        self.specs()
    }

    /// Markdown per API version, the files of one version joined by a newline.
    ///
    /// A directory contributes every `.md` file beneath it in path order.
    /// Files which can not be read are reported as events and skipped.
    pub fn fetch_readme(&mut self) -> IndexMap<String, String> {
        let app = self.app;
        let mut out = IndexMap::new();

        for (version, source) in &app.config.doc.readme {
            let mut parts = Vec::new();

            for path in source.paths() {
                match load_readme(&self.project_root, path) {
                    Ok(contents) => parts.extend(contents),
                    Err(e) => {
                        error!("{}", e);
                        let path = match &e {
                            Error::ReadmeLoad { path, .. } => path.clone(),
                            _ => PathBuf::from(path),
                        };
                        self.events.push(DocEvent::ReadmeError {
                            path,
                            message: e.to_string(),
                        });
                    }
                }
            }

            out.insert(version.clone(), parts.join("\n"));
        }

        out
    }

    pub fn state(&self) -> &DocState {
        &self.state
    }

    pub fn events(&self) -> &[DocEvent] {
        &self.events
    }

    /// Specs of all API versions
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentationUnavailable`] unless the app is ready.
    pub fn specs(&self) -> Result<&SpecMap> {
        match &self.state {
            DocState::Ready(specs) => Ok(specs),
            DocState::Failed(reason) => Err(Error::DocumentationUnavailable(reason.clone())),
            _ => Err(Error::DocumentationUnavailable(
                "documentation is not initialized".to_string(),
            )),
        }
    }

    /// Spec of one API version, e.g. `v1.0`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] for a malformed version key
    /// * [`Error::SpecNotFound`] when no spec exists for the version
    pub fn spec(&self, version: &str) -> Result<&OpenApiDocument> {
        if version.len() > MAX_VERSION_LENGTH || !VERSION_KEY.is_match(version) {
            return Err(Error::InvalidArgument(format!(
                "invalid API version: {}",
                version
            )));
        }

        self.specs()?.get(version).ok_or_else(|| Error::SpecNotFound {
            version: version.to_string(),
        })
    }
}

/// Contents of a readme path relative to the project root
fn load_readme(root: &Path, path: &str) -> Result<Vec<String>> {
    let full_path = root.join(path.trim_start_matches('/'));
    let load_error = |path: &Path, source: std::io::Error| Error::ReadmeLoad {
        path: path.to_path_buf(),
        source,
    };

    if !full_path.is_dir() {
        debug!("Loading readme: {}", full_path.display());
        let content = fs::read_to_string(&full_path).map_err(|e| load_error(&full_path, e))?;
        return Ok(vec![content]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&full_path) {
        let entry = entry.map_err(|e| load_error(&full_path, e.into()))?;
        let is_markdown = entry.path().extension().and_then(|ext| ext.to_str()) == Some("md");
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!("Loading {} readme files from {}", files.len(), full_path.display());
    files
        .iter()
        .map(|file| fs::read_to_string(file).map_err(|e| load_error(file, e)))
        .collect()
}
