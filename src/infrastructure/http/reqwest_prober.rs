use crate::domain::ports::{HttpProber, ProbeError};
use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// [`HttpProber`] issuing `HEAD` requests through a shared reqwest client.
///
/// Redirects are followed; the reported code is the one from the final hop.
#[derive(Clone)]
pub struct ReqwestProber {
    client: Client,
}

impl ReqwestProber {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("subdomain-recon/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }
}

fn classify(e: reqwest::Error, timeout: Duration) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout(timeout)
    } else if e.is_connect() {
        ProbeError::Connect(e.to_string())
    } else {
        ProbeError::Request(e.to_string())
    }
}

#[async_trait]
impl HttpProber for ReqwestProber {
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError> {
        let response = self
            .client
            .head(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        Ok(response.status().as_u16())
    }
}
