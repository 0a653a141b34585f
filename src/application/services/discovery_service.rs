//! Subdomain discovery pipeline orchestration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::join_all;
use serde_json::json;
use tracing::{debug, info, warn};

use super::probing::{ProbeTimeouts, dns_filter, http_probe};
use crate::domain::aggregator::CandidateMap;
use crate::domain::entities::{
    DiscoveredSubdomain, DiscoveryReport, DiscoverySource, Reachability, RootDomain, SourceCounts,
};
use crate::domain::merge::merge_results;
use crate::domain::ports::{DnsResolver, HttpProber, PassiveSource};
use crate::domain::wordlist::{COMMON_SUBDOMAINS, brute_force_candidates};
use crate::error::AppError;

/// Breadth and latency limits for one discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Passive candidates considered for DNS/HTTP probing, in aggregation order.
    pub passive_candidate_limit: usize,
    /// Concurrent DNS lookups per batch.
    pub dns_batch_size: usize,
    /// Concurrent HTTP probes per batch for passive hosts.
    pub passive_probe_concurrency: usize,
    /// Concurrent HTTP probes per batch for brute-force hosts.
    pub brute_force_probe_concurrency: usize,
    pub probe_timeouts: ProbeTimeouts,
    /// Deadline for the whole pass; exceeding it fails the request.
    pub request_timeout: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            passive_candidate_limit: 100,
            dns_batch_size: 50,
            passive_probe_concurrency: 20,
            brute_force_probe_concurrency: 30,
            probe_timeouts: ProbeTimeouts::default(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Runs one bounded subdomain discovery pass per call.
///
/// # Pipeline
///
/// 1. Extract the root domain
/// 2. Query every passive source concurrently
/// 3. Aggregate and clean passive candidates
/// 4. Concurrently:
///    - passive: DNS filter → HTTP probe over the first `passive_candidate_limit` hosts
///    - brute-force: dictionary → DNS filter → HTTP probe
/// 5. Merge and rank
///
/// Per-source and per-host failures are absorbed by the stages. The only error a caller
/// sees is the request deadline.
pub struct DiscoveryService {
    sources: Vec<Arc<dyn PassiveSource>>,
    resolver: Arc<dyn DnsResolver>,
    prober: Arc<dyn HttpProber>,
    wordlist: Vec<String>,
    settings: DiscoverySettings,
}

impl DiscoveryService {
    /// Creates a service using the built-in brute-force dictionary.
    pub fn new(
        sources: Vec<Arc<dyn PassiveSource>>,
        resolver: Arc<dyn DnsResolver>,
        prober: Arc<dyn HttpProber>,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            sources,
            resolver,
            prober,
            wordlist: COMMON_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            settings,
        }
    }

    /// Replaces the brute-force dictionary.
    pub fn with_wordlist(mut self, labels: Vec<String>) -> Self {
        self.wordlist = labels;
        self
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn resolver_ready(&self) -> bool {
        self.resolver.is_ready()
    }

    /// Discovers subdomains of the registrable domain behind `hostname`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Timeout`] when the pass exceeds
    /// [`DiscoverySettings::request_timeout`]. No partial report is produced.
    pub async fn discover(&self, hostname: &str) -> Result<DiscoveryReport, AppError> {
        let root = RootDomain::extract(hostname);
        let scanned_at = Utc::now();
        let started = Instant::now();

        info!(domain = %root, "Starting subdomain discovery");
        metrics::counter!("discovery_requests_total").increment(1);

        let (subdomains, counts) =
            match tokio::time::timeout(self.settings.request_timeout, self.run(&root)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        domain = %root,
                        timeout_secs = self.settings.request_timeout.as_secs(),
                        "Discovery exceeded request deadline"
                    );
                    return Err(AppError::timeout(
                        "Discovery did not finish in time",
                        json!({
                            "domain": root.as_str(),
                            "timeout_secs": self.settings.request_timeout.as_secs(),
                        }),
                    ));
                }
            };

        let report = DiscoveryReport::new(
            root.to_string(),
            subdomains,
            counts,
            scanned_at,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        metrics::counter!("discovery_subdomains_total", "reachable" => "true")
            .increment(report.reachable as u64);
        metrics::counter!("discovery_subdomains_total", "reachable" => "false")
            .increment((report.total - report.reachable) as u64);

        info!(
            domain = %root,
            total = report.total,
            reachable = report.reachable,
            duration_ms = report.duration_ms,
            "Subdomain discovery finished"
        );

        Ok(report)
    }

    async fn run(&self, root: &RootDomain) -> (Vec<DiscoveredSubdomain>, SourceCounts) {
        let mut counts = SourceCounts::default();
        let candidates = self.collect_passive(root, &mut counts).await;

        let (passive, brute_force) = tokio::join!(
            self.probe_passive(&candidates),
            self.probe_brute_force(&candidates)
        );

        counts.set(DiscoverySource::BruteForce, brute_force.len());

        (merge_results(passive, brute_force), counts)
    }

    /// Queries all passive sources concurrently and aggregates their output.
    async fn collect_passive(&self, root: &RootDomain, counts: &mut SourceCounts) -> CandidateMap {
        let passive = self.sources.iter().filter(|source| {
            let tag = source.source();
            if !tag.is_passive() {
                warn!(source = %tag, "Ignoring non-passive source in passive stage");
            }
            tag.is_passive()
        });

        let mut fetched = join_all(passive.map(|source| async move {
            let tag = source.source();
            (tag, source.fetch(root).await)
        }))
        .await;

        // CT log first; aggregation order decides which candidates survive the cap.
        fetched.sort_by_key(|(tag, _)| *tag);

        let mut candidates = CandidateMap::new(root.clone());
        for (tag, hostnames) in fetched {
            let raw = hostnames.len();
            counts.set(tag, counts.get(tag) + raw);
            let accepted = candidates.ingest(tag, hostnames);

            metrics::counter!("discovery_candidates_total", "source" => tag.as_str())
                .increment(raw as u64);
            debug!(source = %tag, raw, accepted, "Passive source aggregated");
        }

        info!(
            domain = %root,
            candidates = candidates.len(),
            "Passive candidates aggregated"
        );

        candidates
    }

    async fn probe_passive(&self, candidates: &CandidateMap) -> Vec<DiscoveredSubdomain> {
        let entries = candidates.head(self.settings.passive_candidate_limit);
        let hosts: Vec<String> = entries.iter().map(|(host, _)| host.clone()).collect();

        let resolved = dns_filter(self.resolver.as_ref(), &hosts, self.settings.dns_batch_size).await;
        let with_dns: Vec<String> = hosts
            .iter()
            .filter(|host| resolved.contains(*host))
            .cloned()
            .collect();

        info!(
            considered = hosts.len(),
            resolved = with_dns.len(),
            "Passive DNS filter done"
        );

        let reachability = http_probe(
            self.prober.as_ref(),
            &with_dns,
            self.settings.passive_probe_concurrency,
            self.settings.probe_timeouts,
        )
        .await;

        entries
            .iter()
            .map(|(host, sources)| {
                let reach = if resolved.contains(host) {
                    reachability.get(host).copied().unwrap_or_default()
                } else {
                    Reachability::down()
                };
                DiscoveredSubdomain::new(host.clone(), reach, sources.clone())
            })
            .collect()
    }

    async fn probe_brute_force(&self, candidates: &CandidateMap) -> Vec<DiscoveredSubdomain> {
        let hosts = brute_force_candidates(&self.wordlist, candidates.root(), candidates);

        let resolved = dns_filter(self.resolver.as_ref(), &hosts, self.settings.dns_batch_size).await;
        let with_dns: Vec<String> = hosts
            .into_iter()
            .filter(|host| resolved.contains(host))
            .collect();

        info!(resolved = with_dns.len(), "Brute-force DNS filter done");

        let reachability = http_probe(
            self.prober.as_ref(),
            &with_dns,
            self.settings.brute_force_probe_concurrency,
            self.settings.probe_timeouts,
        )
        .await;

        with_dns
            .into_iter()
            .map(|host| {
                let reach = reachability.get(&host).copied().unwrap_or_default();
                DiscoveredSubdomain::new(host, reach, vec![DiscoverySource::BruteForce])
            })
            .collect()
    }
}
