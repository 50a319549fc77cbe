//! Template interpolation for the HTML report
//!
//! Handles `{{ variable }}` placeholders. Nested access like
//! `{{ rate.value }}` walks JSON objects. Substituted text is not
//! re-scanned, so values may safely contain braces.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Variables available to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: Map<String, Value>,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a value by path (e.g., "rate.value")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.vars.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

/// Render a template string with the given context
///
/// Every placeholder must resolve; the error lists all that do not.
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |caps: &Captures<'_>| {
        let var_path = caps.get(1).map_or("", |m| m.as_str());
        match ctx.get(var_path) {
            Some(value) => value_to_string(value),
            None => {
                missing.push(var_path.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Extract all variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
