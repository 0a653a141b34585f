//! Contract for passive reconnaissance data sources.

use crate::domain::entities::{DiscoverySource, RootDomain};
use async_trait::async_trait;

/// Errors raised while querying a passive source.
///
/// Never leave an adapter: [`PassiveSource::fetch`] maps them to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("source refused the query: {0}")]
    Refused(String),
}

/// A provider of previously observed hostnames for a root domain.
///
/// # Contract
///
/// - Never fails: network errors, non-success statuses and malformed payloads yield an
///   empty list
/// - Applies its own timeout to every outbound call
/// - Output is raw; cleaning happens in [`crate::domain::aggregator::CandidateMap`]
///
/// # Implementations
///
/// - [`crate::infrastructure::sources::CrtShSource`]
/// - [`crate::infrastructure::sources::HackerTargetSource`]
/// - [`crate::infrastructure::sources::SubdomainCenterSource`]
/// - [`crate::infrastructure::sources::RapidDnsSource`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassiveSource: Send + Sync {
    /// Provenance tag attached to every hostname this source returns.
    fn source(&self) -> DiscoverySource;

    /// Fetches candidate hostnames for `root`.
    async fn fetch(&self, root: &RootDomain) -> Vec<String>;
}
