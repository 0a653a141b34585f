//! RapidDNS subdomain listing, scraped from HTML.

use super::{dedup_in_order, get_text};
use crate::domain::entities::{DiscoverySource, RootDomain};
use crate::domain::ports::{PassiveSource, SourceError};
use async_trait::async_trait;
use regex::RegexBuilder;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://rapiddns.io/subdomain/";

pub struct RapidDnsSource {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl RapidDnsSource {
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

    fn query_url(&self, root: &RootDomain) -> String {
        format!("{}{}?full=1", self.base_url, root)
    }

    async fn query(&self, root: &RootDomain) -> Result<Vec<String>, SourceError> {
        let body = get_text(&self.client, &self.query_url(root), self.timeout).await?;
        scrape_hostnames(&body, root)
    }
}

/// Pulls every `label(s).{root}` token out of the page.
fn scrape_hostnames(html: &str, root: &RootDomain) -> Result<Vec<String>, SourceError> {
    let pattern = format!(r"[a-z0-9._-]+\.{}", regex::escape(root.as_str()));
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SourceError::Payload(e.to_string()))?;

    let names = re
        .find_iter(html)
        .map(|m| m.as_str().to_lowercase())
        .filter(|name| root.is_parent_of(name));

    Ok(dedup_in_order(names))
}

#[async_trait]
impl PassiveSource for RapidDnsSource {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::RapidDns
    }

    async fn fetch(&self, root: &RootDomain) -> Vec<String> {
        match self.query(root).await {
            Ok(names) => {
                debug!(domain = %root, count = names.len(), "rapiddns returned names");
                names
            }
            Err(e) => {
                warn!(domain = %root, error = %e, "rapiddns query failed");
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
    fn test_scrape_table_cells() {
        let html = r#"
            <tr><td>Blog.Example.com</td><td>A</td></tr>
            <tr><td>vpn.example.com</td><td>CNAME</td><td>edge.exampleXcom.net</td></tr>
            <tr><td>blog.example.com</td><td>AAAA</td></tr>
        "#;

        let names = scrape_hostnames(html, &root()).unwrap();

        assert_eq!(names, vec!["blog.example.com", "vpn.example.com"]);
    }

    #[test]
    fn test_scrape_escapes_dots_in_root() {
        let html = "<td>a.exampleXcom</td><td>b.example.com</td>";
        assert_eq!(scrape_hostnames(html, &root()).unwrap(), vec!["b.example.com"]);
    }

    #[test]
    fn test_scrape_no_matches() {
        assert!(scrape_hostnames("<html></html>", &root()).unwrap().is_empty());
    }

    #[test]
    fn test_query_url() {
        let source = RapidDnsSource::new(Client::new(), Duration::from_secs(1));
        assert_eq!(
            source.query_url(&root()),
            "https://rapiddns.io/subdomain/example.com?full=1"
        );
    }
}
