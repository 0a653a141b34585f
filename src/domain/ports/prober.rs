//! Contract for HTTP liveness probes.

use async_trait::async_trait;
use std::time::Duration;

/// A probe attempt that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Issues a single `HEAD` request and reports the final status code.
///
/// Redirects are followed by the implementation. Any status code counts as a response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpProber: Send + Sync {
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError>;
}
