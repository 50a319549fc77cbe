//! Aggregator types
//!
//! Request description, limits, statistics and the typed outcome of a walk.

use crate::error::Error;
use crate::types::StringMap;
use serde_json::Value;

/// Where HAL-style responses put the page records
pub const DEFAULT_RECORDS_PATH: &str = "_embedded.records";

/// Pulls one item out of a page record, or skips it
pub trait RecordExtractor<T> {
    /// Return `Some(item)` for records that match, `None` otherwise
    fn extract(&self, record: &Value) -> Option<T>;
}

impl<T, F> RecordExtractor<T> for F
where
    F: Fn(&Value) -> Option<T>,
{
    fn extract(&self, record: &Value) -> Option<T> {
        self(record)
    }
}

/// First request of a walk: endpoint, fixed filter and headers
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Absolute endpoint URL
    pub url: String,
    /// Fixed query filter sent with every cursor-driven request
    pub query: StringMap,
    /// Extra headers sent with every request
    pub headers: StringMap,
}

impl PageRequest {
    /// Create a request for an endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Limits and layout for a walk
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Dot path to the record array in each page
    pub records_path: String,
    /// Stop once this many items were accumulated (None = unlimited)
    pub max_items: Option<usize>,
    /// Stop after this many pages (None = unlimited)
    pub max_pages: Option<usize>,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            records_path: DEFAULT_RECORDS_PATH.to_string(),
            max_items: None,
            max_pages: None,
        }
    }
}

impl AggregateConfig {
    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records path
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set the item limit
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Set the page limit
    #[must_use]
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

/// Why a walk ended normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back with zero records
    EmptyPage,
    /// The response had no usable next link
    LastPage,
    /// The accumulator reached `max_items`
    ItemLimit,
    /// `max_pages` pages were fetched
    PageLimit,
}

/// Statistics from a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Pages successfully fetched and decoded
    pub pages_fetched: usize,
    /// Raw records seen across all pages
    pub records_seen: usize,
    /// Records the extractor kept
    pub items_extracted: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl AggregateStats {
    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add raw records
    pub fn add_records(&mut self, count: usize) {
        self.records_seen += count;
    }

    /// Add an extracted item
    pub fn add_item(&mut self) {
        self.items_extracted += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of a walk
///
/// Distinguishes a clean finish from a failure that still produced data and
/// from a failure before anything was collected.
#[derive(Debug)]
pub enum Aggregate<T> {
    /// The walk ended normally
    Complete {
        /// Every extracted item
        items: Vec<T>,
        /// Walk statistics
        stats: AggregateStats,
        /// Why the walk ended
        stop: StopReason,
    },
    /// A fetch failed after some items were accumulated
    Partial {
        /// Items extracted before the failure
        items: Vec<T>,
        /// Walk statistics
        stats: AggregateStats,
        /// The failed fetch
        error: Error,
    },
    /// A fetch failed before any item was accumulated
    Failed {
        /// Walk statistics
        stats: AggregateStats,
        /// The failed fetch
        error: Error,
    },
}

impl<T> Aggregate<T> {
    /// Build the outcome of a walk that hit an error
    pub fn from_error(items: Vec<T>, stats: AggregateStats, error: Error) -> Self {
        if items.is_empty() {
            Self::Failed { stats, error }
        } else {
            Self::Partial {
                items,
                stats,
                error,
            }
        }
    }

    /// Items accumulated so far
    pub fn items(&self) -> &[T] {
        match self {
            Self::Complete { items, .. } | Self::Partial { items, .. } => items,
            Self::Failed { .. } => &[],
        }
    }

    /// Take the accumulated items, whatever the outcome
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Complete { items, .. } | Self::Partial { items, .. } => items,
            Self::Failed { .. } => Vec::new(),
        }
    }

    /// Walk statistics
    pub fn stats(&self) -> &AggregateStats {
        match self {
            Self::Complete { stats, .. } | Self::Partial { stats, .. } | Self::Failed { stats, .. } => {
                stats
            }
        }
    }

    /// The error that ended the walk, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Complete { .. } => None,
            Self::Partial { error, .. } | Self::Failed { error, .. } => Some(error),
        }
    }

    /// Check if the walk ended normally
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Post-process the item list, keeping the outcome kind
    pub fn map_items<U, F>(self, f: F) -> Aggregate<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        match self {
            Self::Complete { items, stats, stop } => Aggregate::Complete {
                items: f(items),
                stats,
                stop,
            },
            Self::Partial {
                items,
                stats,
                error,
            } => Aggregate::Partial {
                items: f(items),
                stats,
                error,
            },
            Self::Failed { stats, error } => Aggregate::Failed { stats, error },
        }
    }
}
