//! HTTP client module
//!
//! Provides the HTTP client shared by the ledger and market fetchers.
//!
//! # Features
//!
//! - **Throttling**: Fixed request period using governor
//! - **Optional Retries**: Constant, linear and exponential backoff
//! - **Typed Failures**: Status codes and timeouts map onto `Error`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
