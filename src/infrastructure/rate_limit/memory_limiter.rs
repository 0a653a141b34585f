use crate::domain::ports::{RateDecision, RateLimiter};
use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

/// Keyed token bucket held in process memory.
///
/// `max_requests` tokens refill evenly over `window`, so a caller can burst the full
/// quota and then regains one request every `window / max_requests`.
pub struct MemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl MemoryRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        debug!(max_requests = burst.get(), window_secs = window.as_secs(), "In-memory rate limiter");

        Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn check(&self, key: &str) -> RateDecision {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => RateDecision::allow(),
            Err(not_until) => RateDecision::deny(not_until.wait_time_from(self.clock.now())),
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_up_to_quota() {
        let limiter = MemoryRateLimiter::new(5, Duration::from_secs(60));

        for _ in 0..5 {
            assert!(limiter.check("discover:alice").await.allowed);
        }

        let denied = limiter.check("discover:alice").await;
        assert!(!denied.allowed);

        let retry_after = denied.retry_after.unwrap();
        assert!(retry_after > Duration::ZERO);
        assert!(retry_after <= Duration::from_secs(12));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = MemoryRateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.check("discover:alice").await.allowed);
        assert!(!limiter.check("discover:alice").await.allowed);
        assert!(limiter.check("discover:bob").await.allowed);
    }

    #[tokio::test]
    async fn test_zero_quota_is_clamped() {
        let limiter = MemoryRateLimiter::new(0, Duration::from_secs(60));
        assert!(limiter.check("k").await.allowed);
        assert!(!limiter.check("k").await.allowed);
    }

    #[tokio::test]
    async fn test_backend_name() {
        let limiter = MemoryRateLimiter::new(5, Duration::from_secs(60));
        assert_eq!(limiter.backend(), "memory");
        assert!(limiter.health_check().await);
    }
}
