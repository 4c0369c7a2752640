//! Markdown and code sample rendering.
//!
//! Templates are compiled once per [`Renderer`]. HTML escaping is disabled:
//! the output is markdown and source code, not HTML.

use crate::error::{Error, Result};
use crate::faker::SampleData;
use crate::route::HttpMethod;
use handlebars::{handlebars_helper, Handlebars};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

const README: &str = "readme";
const CURL: &str = "curl";
const JAVASCRIPT: &str = "javascript";

const README_TEMPLATE: &str = "\n<details>\n    <summary>\n        URL summary\n    </summary>\n\n\
{{#each routes}}    {{pad (upper method)}} [{{url}}](#operation/{{uid}})  \n{{/each}}</details>\n";

const CURL_TEMPLATE: &str = "curl -X {{upper verb}} {{url}}\
{{#each headers}} \\\n-H \"{{name}}: {{value}}\"{{/each}}\
{{#if body}} \\\n-d @- << EOF\n{{body}}\nEOF{{/if}}\n";

const JAVASCRIPT_TEMPLATE: &str = "
const axios = require('axios');

return axios.{{lower verb}}({{options}}).then(function(response) {
  console.log(response.data);
  console.log(response.status);
  console.log(response.headers);
}).catch(function(err) {
  if(err.response) {
    console.log(err.response.data);
    console.log(err.response.status);
    console.log(err.response.headers);
  }
});
";

/// Width the method column of the route index is padded to
const METHOD_WIDTH: usize = 6;

handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(pad: |s: str| {
    let missing = METHOD_WIDTH.saturating_sub(s.chars().count());
    format!("{}{}", s, "&ensp;".repeat(missing))
});

/// Entry of the route index rendered into the document description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLink {
    /// Lower case HTTP method
    pub method: String,
    /// Relative URL of the route
    pub url: String,
    /// Operation id the link points to
    pub uid: String,
}

#[derive(Serialize)]
struct HeaderLine {
    name: String,
    value: String,
}

pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Create a renderer with all templates registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("upper", Box::new(upper));
        handlebars.register_helper("lower", Box::new(lower));
        handlebars.register_helper("pad", Box::new(pad));

        for (name, template) in [
            (README, README_TEMPLATE),
            (CURL, CURL_TEMPLATE),
            (JAVASCRIPT, JAVASCRIPT_TEMPLATE),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::TemplateError(format!("{}: {}", name, e)))?;
        }

        Ok(Self { handlebars })
    }

    /// Markdown `<details>` block linking every route to its operation
    pub fn render_markdown_readme(&self, routes: &[RouteLink]) -> Result<String> {
        self.render(README, &serde_json::json!({ "routes": routes }))
    }

    /// Curl command performing the request, the body passed as a heredoc
    pub fn render_curl_example(
        &self,
        method: HttpMethod,
        url: &str,
        sample: &SampleData,
    ) -> Result<String> {
        let headers: Vec<HeaderLine> = sample
            .header
            .iter()
            .map(|(name, value)| HeaderLine {
                name: escape_double_quoted(name),
                value: match value {
                    Value::String(s) => escape_double_quoted(s),
                    other => escape_double_quoted(&other.to_string()),
                },
            })
            .collect();
        let body = match &sample.body {
            Some(body) => Some(serde_json::to_string_pretty(body)?),
            None => None,
        };

        self.render(
            CURL,
            &serde_json::json!({
                "verb": method.as_str(),
                "url": url,
                "headers": headers,
                "body": body,
            }),
        )
    }

    /// Axios call performing the request
    pub fn render_javascript_example(
        &self,
        method: HttpMethod,
        url: &str,
        sample: &SampleData,
    ) -> Result<String> {
        let mut options = Map::new();
        options.insert("url".to_string(), Value::String(url.to_string()));
        options.insert("headers".to_string(), Value::Object(sample.header.clone()));
        options.insert("params".to_string(), Value::Object(sample.query.clone()));
        if let Some(body) = &sample.body {
            options.insert("data".to_string(), body.clone());
        }

        self.render(
            JAVASCRIPT,
            &serde_json::json!({
                "verb": method.as_str(),
                "options": to_js_literal(&Value::Object(options)),
            }),
        )
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        debug!("Rendering template: {}", name);
        self.handlebars
            .render(name, data)
            .map_err(|e| Error::TemplateError(e.to_string()))
    }
}

/// Escape text placed inside a double-quoted shell argument
fn escape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// JavaScript object literal of a JSON value in JSON5 style: identifier keys
/// unquoted, single quoted strings, trailing commas and a 2 space indent.
pub fn to_js_literal(value: &Value) -> String {
    let mut out = String::new();
    write_js_value(&mut out, value, 0);
    out
}

fn write_js_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Object(object) if object.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(object) => {
            out.push_str("{\n");
            for (key, item) in object {
                push_indent(out, depth + 1);
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    push_js_string(out, key);
                }
                out.push_str(": ");
                write_js_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, depth + 1);
                write_js_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::String(s) => push_js_string(out, s),
        other => out.push_str(&other.to_string()),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    out.push_str(&"  ".repeat(depth));
}

fn push_js_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn link(method: &str, url: &str, uid: &str) -> RouteLink {
        RouteLink {
            method: method.to_string(),
            url: url.to_string(),
            uid: uid.to_string(),
        }
    }

    fn sample() -> SampleData {
        let data = json!({
            "query": {"param1": "test", "param2": "abcd", "param3": "test@test.test"},
            "path": {"id": 12345},
            "header": {"content-type": "application/json"},
        });
        SampleData {
            query: data["query"].as_object().cloned().unwrap(),
            path: data["path"].as_object().cloned().unwrap(),
            header: data["header"].as_object().cloned().unwrap(),
            body: Some(json!({"username": "test", "country": {"code_2": "US"}})),
        }
    }

    #[test]
    fn test_render_markdown_readme() {
        let renderer = Renderer::new().unwrap();
        let routes = vec![
            link("get", "/api/v1.0/readme1", "getReadme1_v1.0"),
            link("post", "/api/v1.0/readme1", "postReadme1_v1.0"),
            link("delete", "/api/v1.0/readme3", "deleteReadme3_v1.0"),
        ];

        let expected = concat!(
            "\n",
            "<details>\n",
            "    <summary>\n",
            "        URL summary\n",
            "    </summary>\n",
            "\n",
            "    GET&ensp;&ensp;&ensp; [/api/v1.0/readme1](#operation/getReadme1_v1.0)  \n",
            "    POST&ensp;&ensp; [/api/v1.0/readme1](#operation/postReadme1_v1.0)  \n",
            "    DELETE [/api/v1.0/readme3](#operation/deleteReadme3_v1.0)  \n",
            "</details>\n",
        );

        assert_eq!(renderer.render_markdown_readme(&routes).unwrap(), expected);
    }

    #[test]
    fn test_render_curl_example() {
        let renderer = Renderer::new().unwrap();
        let url = "http://127.0.0.1/api/v1.0/curl/12345?param1=test&param2=abcd&param3=test%40test.test";

        let expected = concat!(
            "curl -X POST http://127.0.0.1/api/v1.0/curl/12345?param1=test&param2=abcd&param3=test%40test.test \\\n",
            "-H \"content-type: application/json\" \\\n",
            "-d @- << EOF\n",
            "{\n",
            "  \"username\": \"test\",\n",
            "  \"country\": {\n",
            "    \"code_2\": \"US\"\n",
            "  }\n",
            "}\n",
            "EOF\n",
        );

        assert_eq!(
            renderer
                .render_curl_example(HttpMethod::Post, url, &sample())
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_render_curl_example_without_body() {
        let renderer = Renderer::new().unwrap();
        let curl = renderer
            .render_curl_example(HttpMethod::Get, "http://host/users", &SampleData::default())
            .unwrap();
        assert_eq!(curl, "curl -X GET http://host/users\n");
    }

    #[test]
    fn test_render_curl_example_escapes_header_values() {
        let renderer = Renderer::new().unwrap();
        let mut sample = SampleData::default();
        sample.header.insert(
            "x-filter".to_string(),
            Value::String(r#"name="a\b" $HOME `id`"#.to_string()),
        );

        let curl = renderer
            .render_curl_example(HttpMethod::Get, "http://host/users", &sample)
            .unwrap();

        assert_eq!(
            curl,
            concat!(
                "curl -X GET http://host/users \\\n",
                r#"-H "x-filter: name=\"a\\b\" \$HOME \`id\`""#,
                "\n"
            )
        );
    }

    #[test]
    fn test_render_javascript_example() {
        let renderer = Renderer::new().unwrap();
        let url = "http://127.0.0.1/api/v1.0/curl/12345";

        let expected = concat!(
            "\n",
            "const axios = require('axios');\n",
            "\n",
            "return axios.post({\n",
            "  url: 'http://127.0.0.1/api/v1.0/curl/12345',\n",
            "  headers: {\n",
            "    'content-type': 'application/json',\n",
            "  },\n",
            "  params: {\n",
            "    param1: 'test',\n",
            "    param2: 'abcd',\n",
            "    param3: 'test@test.test',\n",
            "  },\n",
            "  data: {\n",
            "    username: 'test',\n",
            "    country: {\n",
            "      code_2: 'US',\n",
            "    },\n",
            "  },\n",
            "}).then(function(response) {\n",
            "  console.log(response.data);\n",
            "  console.log(response.status);\n",
            "  console.log(response.headers);\n",
            "}).catch(function(err) {\n",
            "  if(err.response) {\n",
            "    console.log(err.response.data);\n",
            "    console.log(err.response.status);\n",
            "    console.log(err.response.headers);\n",
            "  }\n",
            "});\n",
        );

        assert_eq!(
            renderer
                .render_javascript_example(HttpMethod::Post, url, &sample())
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_to_js_literal() {
        assert_eq!(to_js_literal(&json!({})), "{}");
        assert_eq!(to_js_literal(&json!({"a": []})), "{\n  a: [],\n}");
        assert_eq!(
            to_js_literal(&json!({"it's": [1, true, null]})),
            "{\n  'it\\'s': [\n    1,\n    true,\n    null,\n  ],\n}"
        );
    }
}
