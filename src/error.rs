use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    /// A named schema reference could not be resolved in the registry
    SchemaNotFound(String),
    /// A readme file configured for the documentation could not be read
    ReadmeLoad { path: PathBuf, source: std::io::Error },
    /// Two routes of the same API version share a uid
    DuplicateRouteUid { uid: String, first: String, second: String },
    /// The service manifest does not exist
    ManifestNotFound(PathBuf),
    /// The service manifest exists but does not have the expected shape
    InvalidManifest { path: PathBuf, message: String },
    /// No specification was generated for the requested API version
    SpecNotFound { version: String },
    /// Documentation was requested before it was generated, or generation failed
    DocumentationUnavailable(String),
    InvalidArgument(String),
    SerializationError(String),
    TemplateError(String),
}

impl Error {
    /// Machine readable code for errors that are reported to API consumers
    pub fn api_code(&self) -> Option<&'static str> {
        match self {
            Error::SpecNotFound { .. } => Some("specs.notFound"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SchemaNotFound(name) => write!(f, "Could not find validator schema: {}", name),
            Error::ReadmeLoad { path, source } => {
                write!(f, "Failed to load readme {}: {}", path.display(), source)
            }
            Error::DuplicateRouteUid { uid, first, second } => write!(
                f,
                "Routes {} and {} share the uid {}, set `name` or `uid` on one of them",
                first, second, uid
            ),
            Error::ManifestNotFound(path) => write!(f, "File {} not found.", path.display()),
            Error::InvalidManifest { path, message } => write!(
                f,
                "The provided manifest {} must describe a service with `apps`: {}",
                path.display(),
                message
            ),
            Error::SpecNotFound { version } => {
                write!(f, "API specification version {} does not exist", version)
            }
            Error::DocumentationUnavailable(msg) => {
                write!(f, "Documentation is not available: {}", msg)
            }
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::TemplateError(msg) => write!(f, "Template error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::ReadmeLoad { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_not_found_api_code() {
        let err = Error::SpecNotFound {
            version: "v9.0".to_string(),
        };
        assert_eq!(err.api_code(), Some("specs.notFound"));
        assert_eq!(
            err.to_string(),
            "API specification version v9.0 does not exist"
        );
    }

    #[test]
    fn test_other_errors_have_no_api_code() {
        assert_eq!(Error::SchemaNotFound("user".to_string()).api_code(), None);
    }

    #[test]
    fn test_readme_load_exposes_source() {
        use std::error::Error as _;

        let err = Error::ReadmeLoad {
            path: PathBuf::from("docs/v1.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("docs/v1.md"));
    }
}
