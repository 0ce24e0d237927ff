//! Directive substitution engine.

use regex::Regex;
use serde_json::Value;

use crate::dir::TemplateDir;
use crate::error::{TemplateError, TemplateResult};
use crate::vars::TemplateVars;

/// Template engine for rendering substitution directives.
pub struct TemplateEngine {
    path_pattern: Regex,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create a new template engine.
    pub fn new() -> Self {
        Self {
            // Dotted lookup path: `project_name`, `variables.region`, ...
            path_pattern: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*$")
                .unwrap(),
        }
    }

    /// Render template source against the derived variable set.
    pub fn render(&self, source: &str, vars: &TemplateVars) -> TemplateResult<String> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or(TemplateError::Unterminated(source.len() - rest.len() + start))?;
            out.push_str(&self.eval(&after[..end], vars)?);
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Load a named template from a directory and render it.
    pub fn render_file(
        &self,
        dir: &TemplateDir,
        name: &str,
        vars: &TemplateVars,
    ) -> TemplateResult<String> {
        let source = dir.load(name)?;
        self.render(&source, vars)
    }

    /// Evaluate one directive body: a lookup path followed by an optional
    /// filter pipeline.
    fn eval(&self, directive: &str, vars: &TemplateVars) -> TemplateResult<String> {
        let mut parts = directive.split('|');
        let path = parts.next().unwrap_or("").trim();
        if !self.path_pattern.is_match(path) {
            return Err(TemplateError::BadPath(path.to_string()));
        }

        let mut value = vars.lookup(path).cloned().unwrap_or(Value::Null);
        // A lookup with no value must be rescued by a `default` filter
        // somewhere in the pipeline, otherwise the render fails.
        let mut resolved = !value.is_null();

        for filter in parts {
            let (name, arg) = parse_filter(filter)?;
            match (name, arg) {
                ("quote", None) => value = Value::String(format!("\"{}\"", display(&value))),
                ("default", Some(fallback)) => {
                    if is_empty(&value) {
                        value = Value::String(fallback);
                    }
                    resolved = true;
                }
                ("sanitize", None) => value = Value::String(sanitize(&display(&value))),
                ("sanitize_label", None) => {
                    value = Value::String(sanitize_label(&display(&value)));
                }
                ("quote" | "sanitize" | "sanitize_label", Some(_)) | ("default", None) => {
                    return Err(TemplateError::BadFilterArg(filter.trim().to_string()));
                }
                (other, _) => return Err(TemplateError::UnknownFilter(other.to_string())),
            }
        }

        if !resolved {
            return Err(TemplateError::UnknownVariable(path.to_string()));
        }
        Ok(display(&value))
    }
}

/// Split a filter token into its name and optional quoted argument.
fn parse_filter(token: &str) -> TemplateResult<(&str, Option<String>)> {
    let token = token.trim();
    match token.split_once(':') {
        None => Ok((token, None)),
        Some((name, arg)) => {
            let arg = arg
                .trim()
                .strip_prefix('"')
                .and_then(|a| a.strip_suffix('"'))
                .ok_or_else(|| TemplateError::BadFilterArg(token.to_string()))?;
            Ok((name.trim(), Some(arg.to_string())))
        }
    }
}

/// Default string representation used by every transform.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Absent or empty, the values a `default` filter replaces.
fn is_empty(value: &Value) -> bool {
    matches!(value, Value::Null) || matches!(value, Value::String(s) if s.is_empty())
}

/// Sanitize a value for use in resource names.
fn sanitize(s: &str) -> String {
    s.to_lowercase().replace([' ', '_'], "-")
}

/// Sanitize a value for use in provider labels.
fn sanitize_label(s: &str) -> String {
    s.to_lowercase().replace([' ', '_'], "-")
}
