//! Passive reconnaissance source adapters.
//!
//! Every adapter implements [`PassiveSource`]: it performs one HTTP call with its own
//! timeout, parses the payload with a pure function, and converts any failure into an
//! empty result (logged at `warn`).

mod crtsh;
mod hackertarget;
mod rapiddns;
mod subdomain_center;

pub use crtsh::CrtShSource;
pub use hackertarget::HackerTargetSource;
pub use rapiddns::RapidDnsSource;
pub use subdomain_center::SubdomainCenterSource;

use crate::domain::ports::{PassiveSource, SourceError};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Request(e.to_string())
    }
}

/// Per-source request timeouts.
#[derive(Debug, Clone, Copy)]
pub struct SourceTimeouts {
    pub crtsh: Duration,
    pub default: Duration,
}

impl Default for SourceTimeouts {
    fn default() -> Self {
        Self {
            crtsh: Duration::from_secs(15),
            default: Duration::from_secs(10),
        }
    }
}

/// Builds the HTTP client shared by all passive sources.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("subdomain-recon/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// All four passive sources, in aggregation order.
pub fn default_sources(client: Client, timeouts: SourceTimeouts) -> Vec<Arc<dyn PassiveSource>> {
    vec![
        Arc::new(CrtShSource::new(client.clone(), timeouts.crtsh)),
        Arc::new(HackerTargetSource::new(client.clone(), timeouts.default)),
        Arc::new(SubdomainCenterSource::new(client.clone(), timeouts.default)),
        Arc::new(RapidDnsSource::new(client, timeouts.default)),
    ]
}

/// Sends a GET and returns the body of a successful response.
async fn get_text(client: &Client, url: &str, timeout: Duration) -> Result<String, SourceError> {
    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    Ok(response.text().await?)
}

/// Lowercases, trims and strips one leading `*.` label.
fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_prefix("*.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Removes duplicates while keeping first-seen order.
fn dedup_in_order(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
