//! URL template handling.
//!
//! Route URLs are declared with framework path syntax: `:name` placeholders,
//! optional `?` markers and regex constraints such as `:id(\d+)`. OpenAPI
//! expects `{name}` placeholders instead. This module converts between the two
//! and provides the segment helpers used by the tag deriver, the version
//! grouper and the code sample renderer.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PARAM_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[a-zA-Z0-9_-]+$").unwrap());
static REGEX_CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.+\)").unwrap());
static BRACE_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").unwrap());
static BRACE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\{[A-Za-z0-9_-]+\}$").unwrap());
static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?[0-9]+(\.[0-9]+){0,2}$").unwrap());

/// Converts framework path parameters to OpenAPI path parameters.
///
/// `/path/:id(\d+)` becomes `/path/{id}`. Segments which are not bound
/// parameters are left untouched, so the conversion is idempotent.
pub fn normalize_url_parameters(url: &str) -> String {
    url.split('/')
        .map(|segment| {
            let cleaned = clean_segment(segment);
            if PARAM_SEGMENT.is_match(&cleaned) {
                format!("{{{}}}", &cleaned[1..])
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical form of a URL template: one leading slash, no duplicate or
/// trailing slashes. The root URL stays `/`.
pub fn normalize_url(url: &str) -> String {
    format!("/{}", segments(url).join("/"))
}

/// Non-empty segments of a URL template
pub fn segments(url: &str) -> Vec<&str> {
    url.split('/').filter(|s| !s.is_empty()).collect()
}

/// Names of the `{name}` placeholders of a normalized URL, left to right
pub fn path_param_names(url: &str) -> Vec<String> {
    BRACE_PARAM
        .captures_iter(url)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Whether a segment is a path placeholder in either syntax (`:id`, `:id(\d+)?`, `{id}`)
pub fn is_param_segment(segment: &str) -> bool {
    PARAM_SEGMENT.is_match(&clean_segment(segment)) || BRACE_SEGMENT.is_match(segment)
}

/// Whether a segment is a bare API version such as `v1`, `2.1` or `v1.0.3`
pub fn is_version_segment(segment: &str) -> bool {
    VERSION_SEGMENT.is_match(segment)
}

/// Builds an absolute URL for a route, substituting placeholders with the
/// given path values and appending a form-url-encoded query string.
///
/// Optional placeholders without a value are dropped; required ones are kept
/// as they are.
pub fn absolute_url(
    base_url: &str,
    url: &str,
    path: &Map<String, Value>,
    query: Option<&Map<String, Value>>,
) -> String {
    let mut parts = Vec::new();
    for segment in segments(url) {
        let cleaned = clean_segment(segment);
        let name = if PARAM_SEGMENT.is_match(&cleaned) {
            Some(&cleaned[1..])
        } else if BRACE_SEGMENT.is_match(segment) {
            Some(&segment[1..segment.len() - 1])
        } else {
            None
        };

        match name.and_then(|n| path.get(n)) {
            Some(value) => parts.push(value_to_string(value)),
            None if name.is_some() && segment.ends_with('?') => {}
            None => parts.push(segment.to_string()),
        }
    }

    let mut out = format!("{}/{}", base_url.trim_end_matches('/'), parts.join("/"));

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let pairs: Vec<String> = query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    url::form_urlencoded::byte_serialize(key.as_bytes()).collect::<String>(),
                    url::form_urlencoded::byte_serialize(value_to_string(value).as_bytes())
                        .collect::<String>()
                )
            })
            .collect();
        out.push('?');
        out.push_str(&pairs.join("&"));
    }

    out
}

/// Removes `?` optional markers and a regex constraint from a segment
fn clean_segment(segment: &str) -> String {
    REGEX_CONSTRAINT
        .replace(segment.trim_matches('?'), "")
        .into_owned()
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
