//! Batched DNS existence filtering and HTTP reachability probing.
//!
//! Both stages split their input into fixed-size batches. Batches run one after another;
//! hosts inside a batch run concurrently. This bounds the number of in-flight resolver
//! queries and sockets to the batch size.
//!
//! Failures never leave a host's own future: each one resolves to a plain value
//! (`bool` for DNS, [`Reachability`] for HTTP).

use crate::domain::entities::Reachability;
use crate::domain::ports::{DnsResolver, HttpProber};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

/// Per-attempt timeouts for the HTTPS probe and its HTTP fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    pub https: Duration,
    pub http: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            https: Duration::from_secs(5),
            http: Duration::from_secs(4),
        }
    }
}

/// Returns `true` when `host` has at least one A record, or failing that, an AAAA record.
pub async fn resolve_host(resolver: &dyn DnsResolver, host: &str) -> bool {
    match resolver.lookup_ipv4(host).await {
        Ok(addrs) if !addrs.is_empty() => return true,
        Ok(_) => debug!(host, "no A records, trying AAAA"),
        Err(e) => debug!(host, error = %e, "A lookup failed, trying AAAA"),
    }

    match resolver.lookup_ipv6(host).await {
        Ok(addrs) => !addrs.is_empty(),
        Err(e) => {
            debug!(host, error = %e, "AAAA lookup failed");
            false
        }
    }
}

/// Keeps the hostnames that resolve, processing `batch_size` lookups at a time.
pub async fn dns_filter(
    resolver: &dyn DnsResolver,
    hosts: &[String],
    batch_size: usize,
) -> HashSet<String> {
    let mut resolved = HashSet::new();

    for batch in hosts.chunks(batch_size.max(1)) {
        let outcomes = join_all(batch.iter().map(|host| async move {
            let ok = resolve_host(resolver, host).await;
            (host, ok)
        }))
        .await;

        resolved.extend(
            outcomes
                .into_iter()
                .filter(|(_, ok)| *ok)
                .map(|(host, _)| host.clone()),
        );
    }

    resolved
}

/// Probes `https://{host}`, falling back to `http://{host}` on any failure.
pub async fn probe_host(
    prober: &dyn HttpProber,
    host: &str,
    timeouts: ProbeTimeouts,
) -> Reachability {
    match prober.head(&format!("https://{host}"), timeouts.https).await {
        Ok(status) => return Reachability::up(status),
        Err(e) => debug!(host, error = %e, "HTTPS probe failed, trying HTTP"),
    }

    match prober.head(&format!("http://{host}"), timeouts.http).await {
        Ok(status) => Reachability::up(status),
        Err(e) => {
            debug!(host, error = %e, "HTTP probe failed");
            Reachability::down()
        }
    }
}

/// Probes every host, `concurrency` at a time.
///
/// Every input host appears in the output map.
pub async fn http_probe(
    prober: &dyn HttpProber,
    hosts: &[String],
    concurrency: usize,
    timeouts: ProbeTimeouts,
) -> HashMap<String, Reachability> {
    let mut results = HashMap::with_capacity(hosts.len());

    for batch in hosts.chunks(concurrency.max(1)) {
        let outcomes = join_all(batch.iter().map(|host| async move {
            let reachability = probe_host(prober, host, timeouts).await;
            (host.clone(), reachability)
        }))
        .await;

        results.extend(outcomes);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockDnsResolver, MockHttpProber, ProbeError, ResolveError};
    use async_trait::async_trait;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn hosts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn numbered(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("h{i}.example.com")).collect()
    }

    /// Tracks concurrent calls. `starts` records the in-flight count seen by each call
    /// when it begins.
    #[derive(Default)]
    struct InFlight {
        current: AtomicUsize,
        peak: AtomicUsize,
        starts: Mutex<Vec<usize>>,
    }

    impl InFlight {
        async fn hold(&self) {
            let before = self.current.fetch_add(1, Ordering::SeqCst);
            self.peak.fetch_max(before + 1, Ordering::SeqCst);
            self.starts.lock().unwrap().push(before);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }

        /// Calls that started with nothing else in flight.
        fn idle_starts(&self) -> usize {
            self.starts.lock().unwrap().iter().filter(|n| **n == 0).count()
        }
    }

    struct SlowResolver(Arc<InFlight>);

    #[async_trait]
    impl DnsResolver for SlowResolver {
        async fn lookup_ipv4(&self, _host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
            self.0.hold().await;
            Ok(vec![Ipv4Addr::LOCALHOST])
        }

        async fn lookup_ipv6(&self, host: &str) -> Result<Vec<Ipv6Addr>, ResolveError> {
            Err(ResolveError::new(host, "unused"))
        }
    }

    struct SlowProber(Arc<InFlight>);

    #[async_trait]
    impl HttpProber for SlowProber {
        async fn head(&self, _url: &str, _timeout: Duration) -> Result<u16, ProbeError> {
            self.0.hold().await;
            Ok(200)
        }
    }

    #[tokio::test]
    async fn test_resolve_host_ipv4() {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .times(1)
            .returning(|_| Ok(vec![Ipv4Addr::new(93, 184, 216, 34)]));
        resolver.expect_lookup_ipv6().never();

        assert!(resolve_host(&resolver, "example.com").await);
    }

    #[tokio::test]
    async fn test_resolve_host_falls_back_to_ipv6() {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .times(1)
            .returning(|host| Err(ResolveError::new(host, "no A records")));
        resolver
            .expect_lookup_ipv6()
            .times(1)
            .returning(|_| Ok(vec![Ipv6Addr::LOCALHOST]));

        assert!(resolve_host(&resolver, "v6only.example.com").await);
    }

    #[tokio::test]
    async fn test_resolve_host_empty_ipv4_answer_falls_back() {
        let mut resolver = MockDnsResolver::new();
        resolver.expect_lookup_ipv4().returning(|_| Ok(vec![]));
        resolver.expect_lookup_ipv6().returning(|_| Ok(vec![]));

        assert!(!resolve_host(&resolver, "empty.example.com").await);
    }

    #[tokio::test]
    async fn test_resolve_host_both_fail() {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .returning(|host| Err(ResolveError::new(host, "NXDOMAIN")));
        resolver
            .expect_lookup_ipv6()
            .returning(|host| Err(ResolveError::new(host, "NXDOMAIN")));

        assert!(!resolve_host(&resolver, "gone.example.com").await);
    }

    #[tokio::test]
    async fn test_dns_filter_isolates_failures() {
        let mut resolver = MockDnsResolver::new();
        resolver.expect_lookup_ipv4().returning(|host| {
            if host == "api.example.com" {
                Ok(vec![Ipv4Addr::new(10, 0, 0, 1)])
            } else {
                Err(ResolveError::new(host, "NXDOMAIN"))
            }
        });
        resolver
            .expect_lookup_ipv6()
            .returning(|host| Err(ResolveError::new(host, "NXDOMAIN")));

        let input = hosts(&["www.example.com", "api.example.com", "dev.example.com"]);
        let resolved = dns_filter(&resolver, &input, 2).await;

        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains("api.example.com"));
    }

    #[tokio::test]
    async fn test_dns_filter_resolves_every_host_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut resolver = MockDnsResolver::new();
        resolver.expect_lookup_ipv4().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Ipv4Addr::LOCALHOST])
        });

        let input: Vec<String> = (0..120).map(|i| format!("h{i}.example.com")).collect();
        let resolved = dns_filter(&resolver, &input, 50).await;

        assert_eq!(resolved.len(), 120);
        assert_eq!(calls.load(Ordering::SeqCst), 120);
    }

    #[tokio::test]
    async fn test_dns_filter_bounds_lookups_in_flight() {
        let tracker = Arc::new(InFlight::default());
        let resolver = SlowResolver(tracker.clone());

        let resolved = dns_filter(&resolver, &numbered(120), 50).await;

        assert_eq!(resolved.len(), 120);
        assert_eq!(tracker.peak(), 50);
        // One idle start per batch: 50 + 50 + 20.
        assert_eq!(tracker.idle_starts(), 3);
    }

    #[tokio::test]
    async fn test_dns_filter_zero_batch_size_still_progresses() {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .returning(|_| Ok(vec![Ipv4Addr::LOCALHOST]));

        let resolved = dns_filter(&resolver, &hosts(&["a.example.com"]), 0).await;
        assert_eq!(resolved.len(), 1);
    }

    #[tokio::test]
    async fn test_probe_host_https_first() {
        let mut prober = MockHttpProber::new();
        prober
            .expect_head()
            .withf(|url, timeout| {
                url == "https://api.example.com" && *timeout == Duration::from_secs(5)
            })
            .times(1)
            .returning(|_, _| Ok(200));

        let reach = probe_host(&prober, "api.example.com", ProbeTimeouts::default()).await;
        assert_eq!(reach, Reachability::up(200));
    }

    #[tokio::test]
    async fn test_probe_host_http_fallback_after_timeout() {
        let mut prober = MockHttpProber::new();
        prober
            .expect_head()
            .withf(|url, _| url.starts_with("https://"))
            .times(1)
            .returning(|_, timeout| Err(ProbeError::Timeout(timeout)));
        prober
            .expect_head()
            .withf(|url, timeout| {
                url == "http://api.example.com" && *timeout == Duration::from_secs(4)
            })
            .times(1)
            .returning(|_, _| Ok(200));

        let reach = probe_host(&prober, "api.example.com", ProbeTimeouts::default()).await;
        assert!(reach.reachable);
        assert_eq!(reach.status_code, Some(200));
    }

    #[tokio::test]
    async fn test_probe_host_error_status_is_reachable() {
        let mut prober = MockHttpProber::new();
        prober.expect_head().times(1).returning(|_, _| Ok(503));

        let reach = probe_host(&prober, "api.example.com", ProbeTimeouts::default()).await;
        assert_eq!(reach, Reachability::up(503));
    }

    #[tokio::test]
    async fn test_probe_host_both_fail() {
        let mut prober = MockHttpProber::new();
        prober
            .expect_head()
            .times(2)
            .returning(|_, _| Err(ProbeError::Connect("refused".into())));

        let reach = probe_host(&prober, "api.example.com", ProbeTimeouts::default()).await;
        assert_eq!(reach, Reachability::down());
    }

    #[tokio::test]
    async fn test_http_probe_covers_all_hosts() {
        let mut prober = MockHttpProber::new();
        prober.expect_head().returning(|url, _| {
            if url == "https://up.example.com" {
                Ok(200)
            } else {
                Err(ProbeError::Request("tls".into()))
            }
        });

        let input = hosts(&["up.example.com", "down.example.com", "x.example.com"]);
        let results = http_probe(&prober, &input, 2, ProbeTimeouts::default()).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results["up.example.com"], Reachability::up(200));
        assert_eq!(results["down.example.com"], Reachability::down());
    }

    #[tokio::test]
    async fn test_http_probe_bounds_probes_in_flight() {
        let tracker = Arc::new(InFlight::default());
        let prober = SlowProber(tracker.clone());

        let results = http_probe(&prober, &numbered(45), 20, ProbeTimeouts::default()).await;

        assert_eq!(results.len(), 45);
        assert!(results.values().all(|r| *r == Reachability::up(200)));
        assert_eq!(tracker.peak(), 20);
        assert_eq!(tracker.idle_starts(), 3);
    }

    #[tokio::test]
    async fn test_http_probe_empty_input() {
        let prober = MockHttpProber::new();
        let results = http_probe(&prober, &[], 20, ProbeTimeouts::default()).await;
        assert!(results.is_empty());
    }
}
