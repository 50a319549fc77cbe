//! HTTP client with throttling and optional retries
//!
//! Every request is a GET against an absolute URL. Each attempt waits for
//! the rate limiter, failures are classified into typed errors, and only
//! errors that `Error::is_retryable` accepts are attempted again.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::{BackoffType, StringMap};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Seconds to wait on a 429 without a usable `retry-after` header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries (0 = a single attempt)
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Request spacing, `None` to send as fast as possible
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: format!("ledger-snapshot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Space requests by the given config
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable throttling
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query string and headers of a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, added to any already in the URL
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
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

/// HTTP client used by every fetch operation
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().and_then(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// GET `url` and parse the JSON body
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let text = self.get_text(url, &config).await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("Invalid JSON from {url}: {e}")))
    }

    /// GET `url` and return the body, retrying retryable failures
    pub async fn get_text(&self, url: &str, config: &RequestConfig) -> Result<String> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            let error = match self.send_once(url, config).await {
                Ok(body) => return Ok(body),
                Err(error) => error,
            };

            if attempt >= max_retries || !error.is_retryable() {
                return Err(error);
            }

            let delay = match &error {
                Error::RateLimited {
                    retry_after_seconds,
                } => Duration::from_secs(*retry_after_seconds),
                _ => self.calculate_backoff(attempt),
            };
            attempt += 1;
            warn!(
                "GET {url} failed ({error}), attempt {attempt}/{}, retrying in {delay:?}",
                max_retries + 1
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(&self, url: &str, config: &RequestConfig) -> Result<String> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url);
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_seconds: extract_retry_after(&response),
            });
        }
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("GET {url} -> {}", status.as_u16());
        Ok(response.text().await?)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
