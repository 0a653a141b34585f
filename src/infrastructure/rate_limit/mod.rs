//! Per-identity quota enforcement for the discovery endpoint.
//!
//! Two [`RateLimiter`](crate::domain::ports::RateLimiter) implementations:
//! - [`MemoryRateLimiter`] - in-process keyed token bucket
//! - [`RedisRateLimiter`] - fixed window shared across instances

mod memory_limiter;
mod redis_limiter;

pub use memory_limiter::MemoryRateLimiter;
pub use redis_limiter::RedisRateLimiter;
