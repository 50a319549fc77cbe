//! Paginated aggregation
//!
//! Walks a page API, pulls matching items out of every page and accumulates
//! them until the pages run out, a limit is hit, or a request fails.
//!
//! # Overview
//!
//! - `Aggregator` - Runs one walk against the shared `HttpClient`
//! - `PageRequest` - Endpoint plus the fixed query filter
//! - `Aggregate` - Typed outcome (complete, partial, failed)
//!
//! Requests are issued strictly one after another; throttling between pages
//! is the client's rate limiter.

mod types;

pub use types::{
    Aggregate, AggregateConfig, AggregateStats, PageRequest, RecordExtractor, StopReason,
    DEFAULT_RECORDS_PATH,
};

use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{extract_path, NextPage, PaginationState, Paginator};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs paginated walks
pub struct Aggregator<'a> {
    /// HTTP client
    client: &'a HttpClient,
    /// Walk configuration
    config: AggregateConfig,
}

impl<'a> Aggregator<'a> {
    /// Create a new aggregator
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            config: AggregateConfig::default(),
        }
    }

    /// Set walk configuration
    #[must_use]
    pub fn with_config(mut self, config: AggregateConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the walk configuration
    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Walk every page starting at `request` and collect extracted items
    pub async fn collect<T, E>(
        &self,
        name: &str,
        request: &PageRequest,
        paginator: &dyn Paginator,
        extractor: &E,
    ) -> Aggregate<T>
    where
        E: RecordExtractor<T> + ?Sized,
    {
        let start = Instant::now();
        let mut stats = AggregateStats::default();
        let mut items = Vec::new();
        let mut pagination_state = PaginationState::new();

        let mut url = request.url.clone();
        let mut query = request.query.clone();
        query.extend(paginator.initial_params(&pagination_state));

        info!("Starting walk for {name}: {url}");

        let stop = loop {
            debug!(
                "{name}: requesting page {} (cursor: {:?})",
                stats.pages_fetched + 1,
                pagination_state.cursor
            );

            let req_config = RequestConfig {
                query: query.clone(),
                headers: request.headers.clone(),
                ..Default::default()
            };

            let body: Value = match self.client.get_json_with_config(&url, req_config).await {
                Ok(body) => body,
                Err(error) => {
                    stats.set_duration(start.elapsed().as_millis() as u64);
                    warn!(
                        "{name}: walk aborted after {} pages with {} items: {error}",
                        stats.pages_fetched,
                        items.len()
                    );
                    return Aggregate::from_error(items, stats, error);
                }
            };
            stats.add_page();

            let records = extract_path(&body, &self.config.records_path)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            stats.add_records(records.len());

            debug!(
                "{name}: page {} returned {} records",
                stats.pages_fetched,
                records.len()
            );

            if records.is_empty() {
                break StopReason::EmptyPage;
            }

            let mut limit_hit = false;
            for record in records {
                if let Some(item) = extractor.extract(record) {
                    items.push(item);
                    stats.add_item();
                }
                if self.config.max_items.is_some_and(|max| items.len() >= max) {
                    limit_hit = true;
                    break;
                }
            }
            if limit_hit {
                break StopReason::ItemLimit;
            }

            if self
                .config
                .max_pages
                .is_some_and(|max| stats.pages_fetched >= max)
            {
                break StopReason::PageLimit;
            }

            match paginator.process_response(&body, &mut pagination_state) {
                NextPage::Done => break StopReason::LastPage,
                NextPage::Continue {
                    url: Some(next_url),
                    ..
                } => {
                    url = next_url;
                    query.clear();
                }
                NextPage::Continue {
                    query_params,
                    url: None,
                } => {
                    query.extend(query_params);
                }
            }
        };

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Completed walk for {name}: {} items from {} records in {} pages ({stop:?})",
            items.len(),
            stats.records_seen,
            stats.pages_fetched
        );

        Aggregate::Complete { items, stats, stop }
    }
}
