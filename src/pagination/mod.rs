//! Pagination module
//!
//! Supports: Cursor (from next link), Next URL, single page
//!
//! # Overview
//!
//! Ledger explorer responses carry their continuation in
//! `_links.next.href`. Each strategy decides how that link turns into the
//! next request and tracks when pagination is complete.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, NextUrlPaginator, NoPaginator, DEFAULT_NEXT_LINK_PATH};
pub use types::{extract_path, extract_string, NextPage, PaginationState, Paginator};
