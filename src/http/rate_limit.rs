//! Request throttling
//!
//! Uses the governor crate to space requests by a fixed period.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::sync::Arc;
use std::time::Duration;

/// Minimum spacing between two requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Time between two permits; zero disables throttling
    pub period: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::fixed_delay(Duration::from_millis(250))
    }
}

impl RateLimiterConfig {
    /// One request per `period`
    pub fn fixed_delay(period: Duration) -> Self {
        Self { period }
    }
}

/// Single-permit throttle shared by every request of a client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Returns `None` for a zero period, which means "do not throttle".
    pub fn new(config: &RateLimiterConfig) -> Option<Self> {
        let quota = Quota::with_period(config.period)?;
        Some(Self {
            limiter: Arc::new(Governor::direct(quota)),
        })
    }

    /// Wait until the next request may go out
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
