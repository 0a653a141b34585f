//! Trait definitions for everything the discovery core talks to.
//!
//! Implementations live in `crate::infrastructure`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`PassiveSource`] - passive reconnaissance provider
//! - [`DnsResolver`] - A / AAAA lookups
//! - [`HttpProber`] - `HEAD` liveness probes
//! - [`RateLimiter`] - per-identity request quota
//! - [`TokenRepository`] - API token → caller identity

pub mod passive_source;
pub mod prober;
pub mod rate_limiter;
pub mod resolver;
pub mod token_repository;

pub use passive_source::{PassiveSource, SourceError};
pub use prober::{HttpProber, ProbeError};
pub use rate_limiter::{RateDecision, RateLimiter};
pub use resolver::{DnsResolver, ResolveError};
pub use token_repository::{Identity, TokenRepository};

#[cfg(test)]
pub use passive_source::MockPassiveSource;
#[cfg(test)]
pub use prober::MockHttpProber;
#[cfg(test)]
pub use rate_limiter::MockRateLimiter;
#[cfg(test)]
pub use resolver::MockDnsResolver;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
