//! Final discovery report.

use super::{DiscoveredSubdomain, DiscoverySource};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw candidate counts per source, taken before cleaning and merging.
///
/// `brute_force` counts dictionary hostnames that resolved via DNS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    #[serde(rename = "crt.sh")]
    pub crt_sh: usize,
    #[serde(rename = "hackertarget")]
    pub hacker_target: usize,
    #[serde(rename = "subdomain.center")]
    pub subdomain_center: usize,
    #[serde(rename = "rapiddns")]
    pub rapid_dns: usize,
    #[serde(rename = "brute-force")]
    pub brute_force: usize,
}

impl SourceCounts {
    pub fn set(&mut self, source: DiscoverySource, count: usize) {
        match source {
            DiscoverySource::CrtSh => self.crt_sh = count,
            DiscoverySource::HackerTarget => self.hacker_target = count,
            DiscoverySource::SubdomainCenter => self.subdomain_center = count,
            DiscoverySource::RapidDns => self.rapid_dns = count,
            DiscoverySource::BruteForce => self.brute_force = count,
        }
    }

    pub fn get(&self, source: DiscoverySource) -> usize {
        match source {
            DiscoverySource::CrtSh => self.crt_sh,
            DiscoverySource::HackerTarget => self.hacker_target,
            DiscoverySource::SubdomainCenter => self.subdomain_center,
            DiscoverySource::RapidDns => self.rapid_dns,
            DiscoverySource::BruteForce => self.brute_force,
        }
    }
}

/// Result of one discovery pass over a root domain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub domain: String,
    pub total: usize,
    pub reachable: usize,
    pub subdomains: Vec<DiscoveredSubdomain>,
    pub sources: SourceCounts,
    pub scanned_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl DiscoveryReport {
    /// Builds a report from an already ranked subdomain list.
    pub fn new(
        domain: String,
        subdomains: Vec<DiscoveredSubdomain>,
        sources: SourceCounts,
        scanned_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> Self {
        let reachable = subdomains.iter().filter(|s| s.reachable).count();

        Self {
            domain,
            total: subdomains.len(),
            reachable,
            subdomains,
            sources,
            scanned_at,
            duration_ms,
        }
    }
}
