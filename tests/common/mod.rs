#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use subdomain_recon::application::services::auth_service::hash_token;
use subdomain_recon::application::services::{AuthService, DiscoveryService, DiscoverySettings};
use subdomain_recon::domain::entities::{DiscoverySource, RootDomain};
use subdomain_recon::domain::ports::{
    DnsResolver, HttpProber, PassiveSource, ProbeError, RateLimiter, ResolveError,
};
use subdomain_recon::infrastructure::auth::StaticTokenRepository;
use subdomain_recon::infrastructure::rate_limit::MemoryRateLimiter;
use subdomain_recon::routes::build_router;
use subdomain_recon::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN: &str = "rcn_test-token";

/// Passive source returning a fixed list and counting calls.
pub struct FakeSource {
    tag: DiscoverySource,
    names: Vec<String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PassiveSource for FakeSource {
    fn source(&self) -> DiscoverySource {
        self.tag
    }

    async fn fetch(&self, _root: &RootDomain) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.clone()
    }
}

/// Resolver answering A records for a fixed host set.
pub struct FakeResolver {
    live: HashSet<String>,
}

#[async_trait]
impl DnsResolver for FakeResolver {
    async fn lookup_ipv4(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        if self.live.contains(host) {
            Ok(vec![Ipv4Addr::new(192, 0, 2, 1)])
        } else {
            Err(ResolveError::new(host, "NXDOMAIN"))
        }
    }

    async fn lookup_ipv6(&self, host: &str) -> Result<Vec<Ipv6Addr>, ResolveError> {
        Err(ResolveError::new(host, "no AAAA records"))
    }
}

/// Prober answering for a fixed URL → status map.
pub struct FakeProber {
    responses: HashMap<String, u16>,
}

#[async_trait]
impl HttpProber for FakeProber {
    async fn head(&self, url: &str, _timeout: Duration) -> Result<u16, ProbeError> {
        self.responses
            .get(url)
            .copied()
            .ok_or_else(|| ProbeError::Connect("connection refused".to_string()))
    }
}

/// Describes the outside world seen by a test server.
pub struct World {
    pub crtsh: Vec<&'static str>,
    pub hackertarget: Vec<&'static str>,
    pub live_hosts: Vec<&'static str>,
    pub http: Vec<(&'static str, u16)>,
    pub scan_rate_limit: u32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            crtsh: vec![],
            hackertarget: vec![],
            live_hosts: vec![],
            http: vec![],
            scan_rate_limit: 5,
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    /// Total `fetch` calls across every passive source.
    pub source_calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn source_calls(&self) -> usize {
        self.source_calls.load(Ordering::SeqCst)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn create_test_state(world: World) -> (AppState, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = |tag: DiscoverySource, names: &[&str]| -> Arc<dyn PassiveSource> {
        Arc::new(FakeSource {
            tag,
            names: names.iter().map(|s| s.to_string()).collect(),
            calls: calls.clone(),
        })
    };

    let sources = vec![
        source(DiscoverySource::CrtSh, &world.crtsh),
        source(DiscoverySource::HackerTarget, &world.hackertarget),
        source(DiscoverySource::SubdomainCenter, &[]),
        source(DiscoverySource::RapidDns, &[]),
    ];

    let resolver = Arc::new(FakeResolver {
        live: world.live_hosts.iter().map(|s| s.to_string()).collect(),
    });
    let prober = Arc::new(FakeProber {
        responses: world
            .http
            .iter()
            .map(|(url, code)| (url.to_string(), *code))
            .collect(),
    });

    let discovery_service = DiscoveryService::new(
        sources,
        resolver,
        prober,
        DiscoverySettings {
            request_timeout: Duration::from_secs(10),
            ..DiscoverySettings::default()
        },
    );

    let tokens = StaticTokenRepository::parse(&format!(
        "tester:{}",
        hash_token(SIGNING_SECRET, TEST_TOKEN)
    ))
    .unwrap();
    let auth_service = AuthService::new(Arc::new(tokens), SIGNING_SECRET.to_string());

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(MemoryRateLimiter::new(
        world.scan_rate_limit,
        Duration::from_secs(60),
    ));

    let state = AppState::new(
        Arc::new(discovery_service),
        Arc::new(auth_service),
        rate_limiter,
    );

    (state, calls)
}

pub fn create_test_app(world: World) -> TestApp {
    let (state, source_calls) = create_test_state(world);
    let server = TestServer::new(build_router(state)).unwrap();

    TestApp {
        server,
        source_calls,
    }
}
