//! Certificate transparency search (crt.sh).

use super::{dedup_in_order, get_text, normalize_name};
use crate::domain::entities::{DiscoverySource, RootDomain};
use crate::domain::ports::{PassiveSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://crt.sh/";

/// One certificate record from the JSON output.
#[derive(Debug, Deserialize)]
struct CertEntry {
    #[serde(default)]
    common_name: Option<String>,
    /// Newline-separated SAN list.
    #[serde(default)]
    name_value: Option<String>,
}

/// Queries crt.sh for every certificate issued under `%.{domain}`.
pub struct CrtShSource {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl CrtShSource {
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

    fn query_url(&self, root: &RootDomain) -> Result<Url, SourceError> {
        Url::parse_with_params(
            &self.base_url,
            &[("q", format!("%.{}", root)), ("output", "json".to_string())],
        )
        .map_err(|e| SourceError::Request(e.to_string()))
    }

    async fn query(&self, root: &RootDomain) -> Result<Vec<String>, SourceError> {
        let url = self.query_url(root)?;
        let body = get_text(&self.client, url.as_str(), self.timeout).await?;
        parse_certificates(&body, root)
    }
}

/// Extracts hostnames under `root` from crt.sh JSON output.
fn parse_certificates(body: &str, root: &RootDomain) -> Result<Vec<String>, SourceError> {
    let entries: Vec<CertEntry> =
        serde_json::from_str(body).map_err(|e| SourceError::Payload(e.to_string()))?;

    let names = entries.into_iter().flat_map(|entry| {
        let common = entry.common_name.unwrap_or_default();
        let sans = entry.name_value.unwrap_or_default();
        std::iter::once(common)
            .chain(sans.lines().map(str::to_string).collect::<Vec<_>>())
            .map(|name| normalize_name(&name))
            .filter(|name| root.covers(name))
            .collect::<Vec<_>>()
    });

    Ok(dedup_in_order(names))
}

#[async_trait]
impl PassiveSource for CrtShSource {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::CrtSh
    }

    async fn fetch(&self, root: &RootDomain) -> Vec<String> {
        match self.query(root).await {
            Ok(names) => {
                debug!(domain = %root, count = names.len(), "crt.sh returned names");
                names
            }
            Err(e) => {
                warn!(domain = %root, error = %e, "crt.sh query failed");
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
    fn test_parse_common_name_and_sans() {
        let body = r#"[
            {"common_name": "example.com", "name_value": "example.com\n*.staging.example.com\nAPI.example.com"},
            {"common_name": "mail.example.com", "name_value": "mail.example.com"},
            {"common_name": "other.org", "name_value": "other.org"}
        ]"#;

        let names = parse_certificates(body, &root()).unwrap();

        assert_eq!(
            names,
            vec![
                "example.com",
                "staging.example.com",
                "api.example.com",
                "mail.example.com"
            ]
        );
    }

    #[test]
    fn test_parse_missing_fields() {
        let body = r#"[{"issuer_name": "R3"}, {"name_value": "x.example.com"}]"#;
        let names = parse_certificates(body, &root()).unwrap();
        assert_eq!(names, vec!["x.example.com"]);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_certificates("<html>busy</html>", &root()).unwrap_err();
        assert!(matches!(err, SourceError::Payload(_)));
    }

    #[test]
    fn test_query_url_encodes_wildcard() {
        let source = CrtShSource::new(Client::new(), Duration::from_secs(1));
        let url = source.query_url(&root()).unwrap();
        assert_eq!(url.as_str(), "https://crt.sh/?q=%25.example.com&output=json");
    }

    #[tokio::test]
    async fn test_fetch_swallows_network_errors() {
        let source = CrtShSource::new(Client::new(), Duration::from_millis(200))
            .with_base_url("http://127.0.0.1:9/");
        assert!(source.fetch(&root()).await.is_empty());
    }
}
