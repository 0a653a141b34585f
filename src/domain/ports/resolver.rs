//! Contract for DNS address lookups.

use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A failed lookup (NXDOMAIN, no records, timeout, resolver failure).
#[derive(Debug, Clone, thiserror::Error)]
#[error("dns lookup for {host} failed: {reason}")]
pub struct ResolveError {
    pub host: String,
    pub reason: String,
}

impl ResolveError {
    pub fn new(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            reason: reason.into(),
        }
    }
}

/// Address record lookups used by the DNS existence filter.
///
/// The A → AAAA fallback policy lives in
/// [`crate::application::services::probing::resolve_host`], not in implementations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolves A records.
    async fn lookup_ipv4(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError>;

    /// Resolves AAAA records.
    async fn lookup_ipv6(&self, host: &str) -> Result<Vec<Ipv6Addr>, ResolveError>;

    /// Cheap readiness signal for health checks.
    fn is_ready(&self) -> bool {
        true
    }
}
