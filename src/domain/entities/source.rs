//! Provenance tags for discovered hostnames.

use serde::Serialize;
use std::fmt;

/// Where a hostname came from.
///
/// Serialized with the external identifiers used in reports (`crt.sh`, `brute-force`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiscoverySource {
    /// Certificate transparency search.
    #[serde(rename = "crt.sh")]
    CrtSh,
    /// Passive DNS host search.
    #[serde(rename = "hackertarget")]
    HackerTarget,
    /// Subdomain index API.
    #[serde(rename = "subdomain.center")]
    SubdomainCenter,
    /// Scraped subdomain lookup table.
    #[serde(rename = "rapiddns")]
    RapidDns,
    /// Dictionary enumeration.
    #[serde(rename = "brute-force")]
    BruteForce,
}

impl DiscoverySource {
    /// Passive sources in aggregation order.
    pub const PASSIVE: [DiscoverySource; 4] = [
        DiscoverySource::CrtSh,
        DiscoverySource::HackerTarget,
        DiscoverySource::SubdomainCenter,
        DiscoverySource::RapidDns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoverySource::CrtSh => "crt.sh",
            DiscoverySource::HackerTarget => "hackertarget",
            DiscoverySource::SubdomainCenter => "subdomain.center",
            DiscoverySource::RapidDns => "rapiddns",
            DiscoverySource::BruteForce => "brute-force",
        }
    }

    pub fn is_passive(&self) -> bool {
        !matches!(self, DiscoverySource::BruteForce)
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names_match_display() {
        for source in DiscoverySource::PASSIVE
            .into_iter()
            .chain([DiscoverySource::BruteForce])
        {
            let json = serde_json::to_value(source).unwrap();
            assert_eq!(json, source.as_str());
        }
    }

    #[test]
    fn test_passive_order_starts_with_ct() {
        assert_eq!(DiscoverySource::PASSIVE[0], DiscoverySource::CrtSh);
        assert!(DiscoverySource::PASSIVE.iter().all(|s| s.is_passive()));
        assert!(!DiscoverySource::BruteForce.is_passive());
    }
}
