//! Serialization of generated specs to YAML or JSON.
//!
//! The functions accept any serializable value, so a single document, the
//! specs of one app or the specs of several apps are written the same way.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes specs to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml<T: Serialize + ?Sized>(specs: &T) -> Result<String> {
    debug!("Serializing specs to YAML");
    serde_yaml::to_string(specs).context("Failed to serialize specs to YAML")
}

/// Serializes specs to JSON format with pretty printing.
///
/// Keys keep their insertion order, so paths and responses are listed in the
/// order routes were declared.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json<T: Serialize + ?Sized>(specs: &T) -> Result<String> {
    debug!("Serializing specs to JSON");
    serde_json::to_string_pretty(specs).context("Failed to serialize specs to JSON")
}

/// Writes string content to a file.
///
/// Creates the file and its parent directories if they don't exist, or
/// overwrites the file if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
