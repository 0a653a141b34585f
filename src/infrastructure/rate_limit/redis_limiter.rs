use crate::domain::ports::{RateDecision, RateLimiter};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fixed-window counter in Redis, shared by every instance pointing at the same server.
///
/// Fail-open: when Redis errors, the request is allowed and the error is logged.
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    max_requests: u32,
    window: Duration,
    key_prefix: String,
}

impl RedisRateLimiter {
    /// Connects and verifies the server with a PING.
    pub async fn connect(redis_url: &str, max_requests: u32, window: Duration) -> RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut probe = manager.clone();
        probe.ping::<()>().await?;

        info!("Connected to Redis for rate limiting");

        Ok(Self {
            conn: manager,
            max_requests: max_requests.max(1),
            window,
            key_prefix: "ratelimit:".to_string(),
        })
    }

    fn window_secs(&self) -> i64 {
        self.window.as_secs().max(1) as i64
    }

    async fn try_check(&self, key: &str) -> RedisResult<RateDecision> {
        let key = format!("{}{}", self.key_prefix, key);
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(&key, 1).await?;
        if count == 1 {
            conn.expire::<_, ()>(&key, self.window_secs()).await?;
        }

        if count <= u64::from(self.max_requests) {
            return Ok(RateDecision::allow());
        }

        let ttl: i64 = conn.ttl(&key).await?;
        if ttl < 0 {
            // Counter lost its expiry; start a fresh window.
            conn.expire::<_, ()>(&key, self.window_secs()).await?;
        }
        let wait = if ttl > 0 { ttl } else { self.window_secs() };

        debug!(key = %key, count, wait_secs = wait, "Rate limit window exhausted");
        Ok(RateDecision::deny(Duration::from_secs(wait as u64)))
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str) -> RateDecision {
        match self.try_check(key).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(key = %key, error = %e, "Redis rate limit check failed, allowing request");
                RateDecision::allow()
            }
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
