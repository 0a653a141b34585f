use crate::domain::ports::{DnsResolver, ResolveError};
use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tracing::{info, warn};

/// [`DnsResolver`] backed by hickory's async resolver.
///
/// Uses the host's resolver configuration when it can be read, otherwise hickory's
/// default upstreams.
pub struct HickoryDnsResolver {
    resolver: TokioResolver,
}

impl HickoryDnsResolver {
    pub fn new(lookup_timeout: Duration) -> Self {
        let mut builder = match TokioResolver::builder(TokioConnectionProvider::default()) {
            Ok(builder) => builder,
            Err(e) => {
                warn!(error = %e, "System resolver config unavailable, using default upstreams");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };

        let options = builder.options_mut();
        options.timeout = lookup_timeout;
        options.attempts = 1;

        info!(timeout_ms = lookup_timeout.as_millis() as u64, "DNS resolver ready");

        Self {
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn lookup_ipv4(&self, host: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let lookup = self
            .resolver
            .ipv4_lookup(host)
            .await
            .map_err(|e| ResolveError::new(host, e.to_string()))?;

        Ok(lookup.iter().map(|a| a.0).collect())
    }

    async fn lookup_ipv6(&self, host: &str) -> Result<Vec<Ipv6Addr>, ResolveError> {
        let lookup = self
            .resolver
            .ipv6_lookup(host)
            .await
            .map_err(|e| ResolveError::new(host, e.to_string()))?;

        Ok(lookup.iter().map(|aaaa| aaaa.0).collect())
    }
}
