//! Pagination strategy implementations
//!
//! Each strategy handles one way of following the ledger API's next link.

use super::types::{extract_string, NextPage, PaginationState, Paginator};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

/// Where HAL-style responses put the next page link
pub const DEFAULT_NEXT_LINK_PATH: &str = "_links.next.href";

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor pagination driven by the next page link
///
/// Reads the cursor query parameter out of the next link and replaces the
/// cursor parameter of the original request, keeping every other filter:
/// - `_links.next.href = ".../accounts?cursor=123&limit=200&order=asc"`
/// - next request: `{base}?asset=...&limit=200&order=asc&cursor=123`
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Path to the next page link in the response body
    pub next_link_path: String,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self::new("cursor", DEFAULT_NEXT_LINK_PATH)
    }
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor_param: impl Into<String>, next_link_path: impl Into<String>) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            next_link_path: next_link_path.into(),
        }
    }
}

impl Paginator for CursorPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(cursor) = &state.cursor {
            params.insert(self.cursor_param.clone(), cursor.clone());
        }
        params
    }

    fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage {

        let cursor = extract_string(body, &self.next_link_path)
            .and_then(|href| query_value(&href, &self.cursor_param))
            .filter(|c| !c.is_empty());

        match cursor {
            // The same cursor again would loop forever
            Some(cursor) if state.cursor.as_deref() != Some(cursor.as_str()) => {
                state.set_cursor(cursor.clone());
                NextPage::with_param(&self.cursor_param, cursor)
            }
            _ => NextPage::Done,
        }
    }
}

/// Read a query parameter from an absolute or relative URL
fn query_value(href: &str, key: &str) -> Option<String> {
    let url = Url::parse(href)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(href)))
        .ok()?;

    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination
///
/// Requests the next page link verbatim; prior query parameters are dropped
/// because the link already carries them. A link identical to the previous
/// one ends the walk.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Path to the next page link in the response body
    pub path: String,
}

impl Default for NextUrlPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_NEXT_LINK_PATH)
    }
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Paginator for NextUrlPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage {

        match extract_string(body, &self.path) {
            // The same link again would loop forever
            Some(next_url) if state.follow_url(&next_url) => NextPage::with_url(next_url),
            _ => NextPage::Done,
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(&self, _body: &Value, _state: &mut PaginationState) -> NextPage {
        NextPage::Done
    }
}
