//! Discovered subdomain entity and probe outcome.

use super::DiscoverySource;
use serde::Serialize;

/// Outcome of the HTTP liveness probe for one host.
///
/// `status_code` is set only when `reachable` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reachability {
    pub reachable: bool,
    pub status_code: Option<u16>,
}

impl Reachability {
    /// A probe that completed with `status_code`.
    pub fn up(status_code: u16) -> Self {
        Self {
            reachable: true,
            status_code: Some(status_code),
        }
    }

    /// No probe attempt produced a response.
    pub fn down() -> Self {
        Self::default()
    }
}

/// A hostname in the final discovery report.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredSubdomain {
    pub subdomain: String,
    pub url: String,
    pub reachable: bool,
    pub status_code: Option<u16>,
    pub sources: Vec<DiscoverySource>,
}

impl DiscoveredSubdomain {
    /// Builds an entry; `url` is always derived as `https://{subdomain}`.
    pub fn new(subdomain: String, reachability: Reachability, sources: Vec<DiscoverySource>) -> Self {
        let (reachable, status_code) = if reachability.reachable {
            (true, reachability.status_code)
        } else {
            (false, None)
        };

        Self {
            url: format!("https://{}", subdomain),
            subdomain,
            reachable,
            status_code,
            sources,
        }
    }

    /// Adds `source` unless it is already present, keeping insertion order.
    pub fn add_source(&mut self, source: DiscoverySource) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }

    /// Upgrades to reachable when `other` is; never downgrades.
    pub fn promote(&mut self, other: Reachability) {
        if other.reachable && !self.reachable {
            self.reachable = true;
            self.status_code = other.status_code;
        }
    }
}
