//! subdomain.center lookup API.

use super::{get_text, normalize_name};
use crate::domain::entities::{DiscoverySource, RootDomain};
use crate::domain::ports::{PassiveSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.subdomain.center/";

pub struct SubdomainCenterSource {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl SubdomainCenterSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn query(&self, root: &RootDomain) -> Result<Vec<String>, SourceError> {
        let url = Url::parse_with_params(&self.base_url, &[("domain", root.as_str())])
            .map_err(|e| SourceError::Request(e.to_string()))?;
        let body = get_text(&self.client, url.as_str(), self.timeout).await?;
        parse_listing(&body, root)
    }
}

/// The API answers with a JSON array of hostnames. Any other shape yields nothing.
fn parse_listing(body: &str, root: &RootDomain) -> Result<Vec<String>, SourceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Payload(e.to_string()))?;

    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(normalize_name)
        .filter(|name| root.is_parent_of(name))
        .collect())
}

#[async_trait]
impl PassiveSource for SubdomainCenterSource {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::SubdomainCenter
    }

    async fn fetch(&self, root: &RootDomain) -> Vec<String> {
        match self.query(root).await {
            Ok(names) => {
                debug!(domain = %root, count = names.len(), "subdomain.center returned names");
                names
            }
            Err(e) => {
                warn!(domain = %root, error = %e, "subdomain.center query failed");
                Vec::new()
            }
        }
    }
}
