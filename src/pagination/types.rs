//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use serde_json::Value;
use std::collections::HashMap;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available
    Continue {
        /// Query parameters to add/replace on the original request
        query_params: HashMap<String, String>,
        /// Full URL to request verbatim, discarding prior params
        url: Option<String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
            url: None,
        }
    }

    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue {
            query_params: HashMap::new(),
            url: Some(url.into()),
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current cursor value
    pub cursor: Option<String>,
    /// Last next-page link followed verbatim
    pub last_url: Option<String>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Record a followed link; `false` when it repeats the previous one
    pub fn follow_url(&mut self, url: &str) -> bool {
        if self.last_url.as_deref() == Some(url) {
            return false;
        }
        self.last_url = Some(url.to_string());
        true
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Get initial query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage;
}

/// Walk a dot-separated path (`_links.next.href`) into a JSON value
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Extract a non-empty string at a dot-separated path
pub fn extract_string(value: &Value, path: &str) -> Option<String> {
    match extract_path(value, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
