//! Named schema lookup and reference inlining.
//!
//! Validation steps and response descriptors refer to schemas by name. The
//! [`SchemaRegistry`] resolves those names and inlines `$ref` pointers between
//! registered schemas, breaking circular references.

use crate::error::{Error, Result};
use crate::route::SchemaSource;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Schema registry - maps schema names to JSON schemas and inlines references.
///
/// The registry is handed down explicitly to every describer. Inline schemas
/// of validation steps are resolved as transient values and never registered.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Registered schemas by name
    schemas: IndexMap<String, Value>,
}

impl SchemaRegistry {
    /// Create an empty SchemaRegistry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a SchemaRegistry from named schemas
    pub fn from_schemas(schemas: IndexMap<String, Value>) -> Self {
        debug!("Initializing SchemaRegistry with {} schemas", schemas.len());
        Self { schemas }
    }

    /// Register or replace a named schema
    pub fn register(&mut self, name: &str, schema: Value) {
        debug!("Registering schema: {}", name);
        self.schemas.insert(name.to_string(), schema);
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schema is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Look up a schema by name.
    ///
    /// Accepts plain names as well as JSON pointer style references such as
    /// `#/definitions/user` or `#/components/schemas/user`.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let key = reference_name(name);
        self.schemas
            .get(key)
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))
    }

    /// Resolve a schema source to a self-contained schema with every `$ref` inlined
    pub fn resolve(&self, source: &SchemaSource) -> Result<Value> {
        let mut resolving_stack = HashSet::new();

        match source {
            SchemaSource::Named(name) => {
                debug!("Resolving named schema: {}", name);
                let schema = self.get(name)?;
                resolving_stack.insert(reference_name(name).to_string());
                self.inline_refs(schema, &mut resolving_stack)
            }
            SchemaSource::Inline(schema) => {
                debug!("Resolving inline schema");
                self.inline_refs(schema, &mut resolving_stack)
            }
        }
    }

    /// Recursively replace `{"$ref": name}` objects with the referenced schema
    fn inline_refs(&self, value: &Value, resolving_stack: &mut HashSet<String>) -> Result<Value> {
        match value {
            Value::Object(object) => {
                if let Some(Value::String(reference)) = object.get("$ref") {
                    let key = reference_name(reference).to_string();

                    // Check for circular reference
                    if resolving_stack.contains(&key) {
                        warn!("Circular reference detected for schema: {}", key);
                        let mut placeholder = Map::new();
                        placeholder.insert("type".to_string(), Value::String("object".to_string()));
                        return Ok(Value::Object(placeholder));
                    }

                    let target = self.get(reference)?;
                    resolving_stack.insert(key.clone());
                    let mut resolved = self.inline_refs(target, resolving_stack)?;
                    resolving_stack.remove(&key);

                    // Sibling keywords next to `$ref` refine the referenced schema
                    if let Value::Object(resolved_object) = &mut resolved {
                        for (k, v) in object.iter().filter(|(k, _)| k.as_str() != "$ref") {
                            resolved_object.insert(k.clone(), self.inline_refs(v, resolving_stack)?);
                        }
                    }
                    return Ok(resolved);
                }

                let mut out = Map::new();
                for (k, v) in object {
                    out.insert(k.clone(), self.inline_refs(v, resolving_stack)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.inline_refs(item, resolving_stack))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }
}

/// Schema name of a reference: the last JSON pointer segment without a trailing `#`
fn reference_name(reference: &str) -> &str {
    let name = reference.rsplit('/').next().unwrap_or(reference);
    name.trim_end_matches('#')
}
