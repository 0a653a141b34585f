//! Contract for the per-identity rate-limit check.

use async_trait::async_trait;
use std::time::Duration;

/// Result of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// How long the caller should wait before retrying; set only when denied.
    pub retry_after: Option<Duration>,
}

impl RateDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after: None,
        }
    }

    pub fn deny(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            retry_after: Some(retry_after),
        }
    }
}

/// Check-before-run rate limiting keyed by an opaque string (`discover:{identity}`).
///
/// A successful check consumes one unit of the caller's quota.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::MemoryRateLimiter`] - in-process token bucket
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - shared fixed window
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str) -> RateDecision;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Backend liveness for the health endpoint.
    async fn health_check(&self) -> bool;
}
