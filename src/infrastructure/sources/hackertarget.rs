//! HackerTarget host search.

use super::{get_text, normalize_name};
use crate::domain::entities::{DiscoverySource, RootDomain};
use crate::domain::ports::{PassiveSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.hackertarget.com/hostsearch/";

pub struct HackerTargetSource {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl HackerTargetSource {
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
        let url = Url::parse_with_params(&self.base_url, &[("q", root.as_str())])
            .map_err(|e| SourceError::Request(e.to_string()))?;
        let body = get_text(&self.client, url.as_str(), self.timeout).await?;
        parse_host_search(&body, root)
    }
}

/// Parses `host,ip` lines. Quota and error banners come back as a 200 with plain text.
fn parse_host_search(body: &str, root: &RootDomain) -> Result<Vec<String>, SourceError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with("error") || body.contains("API count exceeded") {
        return Err(SourceError::Refused(
            trimmed.lines().next().unwrap_or_default().to_string(),
        ));
    }

    Ok(body
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(normalize_name)
        .filter(|name| root.is_parent_of(name))
        .collect())
}

#[async_trait]
impl PassiveSource for HackerTargetSource {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::HackerTarget
    }

    async fn fetch(&self, root: &RootDomain) -> Vec<String> {
        match self.query(root).await {
            Ok(names) => {
                debug!(domain = %root, count = names.len(), "hackertarget returned names");
                names
            }
            Err(e) => {
                warn!(domain = %root, error = %e, "hackertarget query failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RootDomain {
        RootDomain::extract("example.com")
    }

    #[test]
    fn test_parse_lines() {
        let body = "www.example.com,93.184.216.34\nMail.Example.com,10.0.0.1\nexample.org,1.1.1.1\n";
        let names = parse_host_search(body, &root()).unwrap();
        assert_eq!(names, vec!["www.example.com", "mail.example.com"]);
    }

    #[test]
    fn test_parse_skips_bare_root() {
        let body = "example.com,1.2.3.4\napi.example.com,1.2.3.5";
        let names = parse_host_search(body, &root()).unwrap();
        assert_eq!(names, vec!["api.example.com"]);
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let body = "a.example.com,1.1.1.1\na.example.com,2.2.2.2";
        assert_eq!(parse_host_search(body, &root()).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_error_banner() {
        let err = parse_host_search("error check your search parameter", &root()).unwrap_err();
        assert!(matches!(err, SourceError::Refused(_)));
    }

    #[test]
    fn test_parse_quota_exceeded() {
        let body = "API count exceeded - Increase Quota with Membership";
        assert!(matches!(
            parse_host_search(body, &root()),
            Err(SourceError::Refused(_))
        ));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_host_search("", &root()).unwrap().is_empty());
    }
}
